//! # Host Table Service
//!
//! Implements the one-shot "generate a host table" use case:
//! 1. transfer the address zone and build the host and network tables,
//! 2. transfer every candidate domain and collect aliases,
//! 3. walk the result in table order, fetching live host information and
//!    handing each entry to the selected [`HostTableFormat`].

use std::collections::BTreeSet;
use std::io::Write;

use anyhow::Context;
use chaoshosts_common::catalog::Catalog;
use chaoshosts_common::config::Config;
use chaoshosts_common::directory::ChaosDirectory;
use chaoshosts_common::host::HostInfo;
use chaoshosts_common::name::DomainName;
use chaoshosts_common::zone::Zone;
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::aliases::{self, AliasTable};
use crate::builder::{self, HostTable};
use crate::format::{HostEntry, HostTableFormat, Provenance, RenderError, Style};

/// Below this many live addresses a mismatch usually means a secondary that
/// has not caught up with the zone yet.
const LAGGING_SERVER_THRESHOLD: usize = 3;

pub struct HostTableService<'a> {
    directory: &'a dyn ChaosDirectory,
    cfg: &'a Config,
}

impl<'a> HostTableService<'a> {
    pub fn new(directory: &'a dyn ChaosDirectory, cfg: &'a Config) -> Self {
        Self { directory, cfg }
    }

    /// Reads the address zone and every domain its hosts live in.
    ///
    /// Any failed zone transfer is fatal.
    pub async fn load_catalog(&self) -> anyhow::Result<Catalog> {
        let origin: &DomainName = &self.cfg.address_zone;
        let zone: Zone = self
            .directory
            .transfer_zone(origin)
            .await
            .with_context(|| format!("zone transfer of {origin} failed"))?;
        info!("Read {origin} serial {} ({} records)", zone.serial, zone.records.len());

        let table: HostTable = builder::build(&zone);
        info!(
            "Found {} hosts and {} networks in {} domains",
            table.hosts.len(),
            table.networks.len(),
            table.candidate_domains.len()
        );

        let alias_table: AliasTable = aliases::scan(self.directory, &table.candidate_domains).await?;

        Ok(Catalog {
            address_zone: zone.origin,
            address_serial: zone.serial,
            hosts: table.hosts,
            networks: table.networks,
            aliases: alias_table.aliases,
            serials: alias_table.serials,
        })
    }

    /// Renders `catalog` in `style` to `out`.
    ///
    /// Hosts that cannot be rendered are reported and left out.
    pub async fn render<W>(
        &self,
        catalog: &Catalog,
        style: Style,
        generated: NaiveDate,
        out: &mut W,
    ) -> anyhow::Result<()>
    where
        W: Write,
    {
        let mut format: Box<dyn HostTableFormat + '_> = style.formatter(self.cfg);
        let provenance: Provenance = Provenance::from_catalog(catalog, generated);

        write_lines(out, format.render_header(&provenance))?;
        for (number, name) in &catalog.networks {
            write_lines(out, format.render_network(*number, name))?;
        }
        write_lines(out, format.end_networks())?;

        for (host, stored) in catalog.hosts_in_order() {
            let live: HostInfo = self.fetch_host_info(host).await;
            let addresses: Vec<u16> = reconcile_addresses(host, stored, &live.addresses);
            let entry: HostEntry = HostEntry {
                name: host,
                addresses: &addresses,
                aliases: catalog.aliases_of(host),
                info: &live,
            };
            match format.render_host(&entry) {
                Ok(lines) => write_lines(out, lines)?,
                Err(err @ RenderError::NoAliases { .. }) => error!("{err}"),
                Err(err) => warn!("{err}"),
            }
        }

        write_lines(out, format.finish())?;
        out.flush().context("flushing host table")?;
        Ok(())
    }

    /// Live information for `host`; a failed query yields empty information.
    async fn fetch_host_info(&self, host: &DomainName) -> HostInfo {
        match self.directory.host_info(host).await {
            Ok(info) => {
                if !info.txt.is_empty() || !info.responsible.is_empty() {
                    debug!("{host}: TXT {:?}, RP {:?}", info.txt, info.responsible);
                }
                info
            }
            Err(err) => {
                error!("Query for {host} failed: {err:#}");
                HostInfo::default()
            }
        }
    }
}

/// Picks the address list to print: the live answer unless it is shorter
/// than the PTR-derived set. Size differences are reported, never merged.
pub fn reconcile_addresses(host: &DomainName, stored: &BTreeSet<u16>, live: &[u16]) -> Vec<u16> {
    let live_set: BTreeSet<u16> = live.iter().copied().collect();

    if !live_set.is_empty() && live_set.len() != stored.len() {
        warn!(
            "For {host} A is {} which is different from PTR data {}",
            octal_list(&live_set),
            octal_list(stored)
        );
        if live_set.len() < LAGGING_SERVER_THRESHOLD && stored.len() >= LAGGING_SERVER_THRESHOLD {
            warn!("This is probably caused by the DNS server not being updated yet");
        }
    }

    let chosen: &BTreeSet<u16> = if live_set.len() < stored.len() {
        stored
    } else {
        &live_set
    };
    chosen.iter().copied().collect()
}

fn octal_list(addresses: &BTreeSet<u16>) -> String {
    let octal: Vec<String> = addresses.iter().map(|a| format!("{a:o}")).collect();
    format!("[{}]", octal.join(", "))
}

fn write_lines<W: Write>(out: &mut W, lines: Vec<String>) -> anyhow::Result<()> {
    for line in lines {
        writeln!(out, "{line}").context("writing host table")?;
    }
    Ok(())
}

/// Number of hosts in `catalog` without any alias.
pub fn hosts_without_aliases(catalog: &Catalog) -> usize {
    catalog
        .hosts
        .keys()
        .filter(|host| catalog.aliases_of(host).is_empty())
        .count()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
