//! # Alias Scanner
//!
//! Transfers each candidate domain and indexes its CNAME records by target.
//! Aliases are kept in discovery order; duplicates survive until rendering.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::Context;
use chaoshosts_common::directory::ChaosDirectory;
use chaoshosts_common::name::DomainName;
use chaoshosts_common::zone::Zone;
use tracing::info;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AliasTable {
    /// Lower-cased canonical name to its aliases.
    pub aliases: HashMap<DomainName, Vec<DomainName>>,
    pub serials: BTreeMap<DomainName, u32>,
}

impl AliasTable {
    /// Records the serial of `zone` and every alias it defines.
    pub fn add_zone(&mut self, zone: &Zone) {
        self.serials.insert(zone.origin.clone(), zone.serial);
        for (alias, host) in zone.cname_records() {
            self.aliases
                .entry(host.to_lowercase())
                .or_default()
                .push(alias.clone());
        }
    }
}

/// Scans every domain in turn. A failed transfer aborts the whole scan.
pub async fn scan(
    directory: &dyn ChaosDirectory,
    domains: &BTreeSet<DomainName>,
) -> anyhow::Result<AliasTable> {
    let mut table: AliasTable = AliasTable::default();

    for domain in domains {
        let zone: Zone = directory
            .transfer_zone(domain)
            .await
            .with_context(|| format!("zone transfer of {domain} failed"))?;
        info!(
            "Scanned {domain} (serial {}, {} records)",
            zone.serial,
            zone.records.len()
        );
        table.add_zone(&zone);
    }

    Ok(table)
}
