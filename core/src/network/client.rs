//! DNS client speaking the CH class to a single name server.
//!
//! Zone transfers go over TCP. Host queries go over UDP and are retried over
//! TCP when the answer comes back truncated. Every exchange is awaited before
//! the next one starts.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket, lookup_host};
use tokio::time::timeout;
use tracing::{debug, trace};

use chaoshosts_common::config::Config;
use chaoshosts_common::directory::ChaosDirectory;
use chaoshosts_common::host::HostInfo;
use chaoshosts_common::name::DomainName;
use chaoshosts_common::zone::{RecordData, ResourceRecord, Zone};
use chaoshosts_protocols::axfr::{self, ZoneTransfer};
use chaoshosts_protocols::chaos::{self, Question, Response, WireError};
use chaoshosts_protocols::next_query_id;

const UDP_BUFFER_SIZE: usize = 4096;

pub struct ChaosDnsClient {
    server: SocketAddr,
    timeout: Duration,
}

impl ChaosDnsClient {
    /// Resolves the configured server name and keeps its first address.
    pub async fn connect(cfg: &Config) -> anyhow::Result<Self> {
        let server: SocketAddr = lookup_host((cfg.server.as_str(), cfg.port))
            .await
            .with_context(|| format!("resolving name server {}", cfg.server))?
            .next()
            .ok_or_else(|| anyhow!("name server {} has no addresses", cfg.server))?;
        debug!("Using name server {} at {server}", cfg.server);

        Ok(Self {
            server,
            timeout: cfg.timeout,
        })
    }

    async fn open_stream(&self) -> anyhow::Result<TcpStream> {
        timeout(self.timeout, TcpStream::connect(self.server))
            .await
            .with_context(|| format!("connecting to {} timed out", self.server))?
            .with_context(|| format!("connecting to {}", self.server))
    }

    async fn read_message(&self, stream: &mut TcpStream) -> anyhow::Result<Vec<u8>> {
        let read = async {
            let len: usize = stream.read_u16().await? as usize;
            let mut message: Vec<u8> = vec![0u8; len];
            stream.read_exact(&mut message).await?;
            Ok::<Vec<u8>, std::io::Error>(message)
        };
        timeout(self.timeout, read)
            .await
            .with_context(|| format!("reading from {} timed out", self.server))?
            .with_context(|| format!("reading from {}", self.server))
    }

    async fn query_tcp(&self, query: &[u8], id: u16) -> anyhow::Result<Response> {
        let mut stream: TcpStream = self.open_stream().await?;
        stream.write_all(&axfr::frame(query)?).await?;
        let message: Vec<u8> = self.read_message(&mut stream).await?;
        Ok(chaos::parse_response(&message, id)?)
    }

    async fn query_udp(&self, query: &[u8], id: u16) -> anyhow::Result<Response> {
        let local: SocketAddr = if self.server.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket: UdpSocket = UdpSocket::bind(local).await.context("binding UDP socket")?;
        socket.connect(self.server).await?;
        socket.send(query).await?;

        let mut buf: Vec<u8> = vec![0u8; UDP_BUFFER_SIZE];
        loop {
            let len: usize = timeout(self.timeout, socket.recv(&mut buf))
                .await
                .with_context(|| format!("no answer from {}", self.server))??;
            match chaos::parse_response(&buf[..len], id) {
                Err(WireError::IdMismatch { got, .. }) => {
                    trace!("Dropping stray answer with id {got}");
                }
                other => return Ok(other?),
            }
        }
    }
}

#[async_trait]
impl ChaosDirectory for ChaosDnsClient {
    async fn transfer_zone(&self, origin: &DomainName) -> anyhow::Result<Zone> {
        let id: u16 = next_query_id();
        let query: Vec<u8> = chaos::create_query(id, origin, Question::Axfr)?;

        let mut stream: TcpStream = self.open_stream().await?;
        stream.write_all(&axfr::frame(&query)?).await?;

        let mut transfer: ZoneTransfer = ZoneTransfer::new(origin.clone());
        let mut messages: usize = 0;
        while !transfer.is_complete() {
            let message: Vec<u8> = self.read_message(&mut stream).await?;
            let response: Response = chaos::parse_response(&message, id)?;
            transfer.push(response.answers)?;
            messages += 1;
        }
        debug!("Transfer of {origin} took {messages} messages");

        Ok(transfer.finish()?)
    }

    async fn host_info(&self, host: &DomainName) -> anyhow::Result<HostInfo> {
        let id: u16 = next_query_id();
        let query: Vec<u8> = chaos::create_query(id, host, Question::Any)?;

        let mut response: Response = self.query_udp(&query, id).await?;
        if response.truncated {
            debug!("Answer for {host} truncated, retrying over TCP");
            response = self.query_tcp(&query, id).await?;
        }

        Ok(host_info_from(response.answers))
    }
}

/// Folds the answer to an `ANY` query into [`HostInfo`].
pub fn host_info_from(answers: Vec<ResourceRecord>) -> HostInfo {
    let mut info: HostInfo = HostInfo::default();

    for record in answers {
        match record.data {
            RecordData::Hinfo { cpu, os } => {
                info.os = Some(os);
                info.cpu = Some(cpu);
            }
            RecordData::ChaosA { address, .. } => info.addresses.push(address),
            RecordData::Txt(strings) => info.txt.extend(strings),
            RecordData::Rp { mailbox, .. } => {
                info.responsible.push(chaos::mailbox_to_address(&mailbox))
            }
            other => trace!("Ignoring {other:?} for {}", record.owner),
        }
    }

    info
}
