use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chaoshosts_common::directory::ChaosDirectory;
use chaoshosts_common::host::HostInfo;
use chaoshosts_common::name::DomainName;
use chaoshosts_common::zone::{RecordData, ResourceRecord, Zone};
use tracing::subscriber::DefaultGuard;

pub fn name(s: &str) -> DomainName {
    s.parse().unwrap()
}

pub fn zone(origin: &str, serial: u32, records: Vec<(&str, RecordData)>) -> Zone {
    Zone {
        origin: name(origin),
        serial,
        records: records
            .into_iter()
            .map(|(owner, data)| ResourceRecord::new(name(owner), data))
            .collect(),
    }
}

pub fn ptr(target: &str) -> RecordData {
    RecordData::Ptr(name(target))
}

pub fn cname(target: &str) -> RecordData {
    RecordData::Cname(name(target))
}

pub fn hinfo(os: &str, cpu: &str, addresses: &[u16]) -> HostInfo {
    HostInfo {
        addresses: addresses.to_vec(),
        os: Some(os.into()),
        cpu: Some(cpu.into()),
        ..Default::default()
    }
}

/// Answers from literal zones and host records. Anything unknown fails like
/// an unreachable server would.
#[derive(Default)]
pub struct FakeDirectory {
    zones: HashMap<DomainName, Zone>,
    hosts: HashMap<DomainName, HostInfo>,
}

impl FakeDirectory {
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.insert(zone.origin.to_lowercase(), zone);
        self
    }

    pub fn with_host(mut self, host: &str, info: HostInfo) -> Self {
        self.hosts.insert(name(host).to_lowercase(), info);
        self
    }
}

#[async_trait]
impl ChaosDirectory for FakeDirectory {
    async fn transfer_zone(&self, origin: &DomainName) -> anyhow::Result<Zone> {
        self.zones
            .get(&origin.to_lowercase())
            .cloned()
            .ok_or_else(|| anyhow!("transfer of {origin} refused"))
    }

    async fn host_info(&self, host: &DomainName) -> anyhow::Result<HostInfo> {
        self.hosts
            .get(&host.to_lowercase())
            .cloned()
            .ok_or_else(|| anyhow!("no answer for {host}"))
    }
}

/// Collects WARN and ERROR events logged on the current thread.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn install(&self) -> DefaultGuard {
        let writer: LogCapture = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        let bytes: Vec<u8> = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
