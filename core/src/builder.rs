//! # Host Table Builder
//!
//! Turns the PTR records of the address zone into per-host address sets and
//! per-network names. A PTR owner's first label is the Chaosnet address in
//! octal; an address with a zero low byte names a network rather than a host.

use std::collections::{BTreeMap, BTreeSet};

use chaoshosts_common::name::DomainName;
use chaoshosts_common::zone::Zone;
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HostTable {
    pub hosts: BTreeMap<DomainName, BTreeSet<u16>>,
    pub networks: BTreeMap<u16, DomainName>,
    /// Domains to scan for aliases of the hosts above.
    pub candidate_domains: BTreeSet<DomainName>,
}

/// A PTR owner decoded against the address zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressEntry {
    Host(u16),
    Network(u16),
}

impl AddressEntry {
    pub fn classify(address: u16) -> Self {
        if address & 0xff != 0 {
            AddressEntry::Host(address)
        } else {
            AddressEntry::Network(address >> 8)
        }
    }
}

pub fn build(zone: &Zone) -> HostTable {
    let mut table: HostTable = HostTable::default();

    for (owner, target) in zone.ptr_records() {
        let Some(address) = decode_address(owner, &zone.origin) else {
            debug!("Skipping PTR {owner} -> {target}: owner is not an octal address");
            continue;
        };

        match AddressEntry::classify(address) {
            AddressEntry::Host(address) => {
                table
                    .hosts
                    .entry(target.clone())
                    .or_default()
                    .insert(address);
                table.candidate_domains.insert(alias_domain(target));
            }
            AddressEntry::Network(number) => {
                table.networks.insert(number, target.clone());
            }
        }
    }

    table
}

/// Parses the single octal label left of `origin`.
fn decode_address(owner: &DomainName, origin: &DomainName) -> Option<u16> {
    match owner.relative_to(origin)? {
        [label] => u16::from_str_radix(label, 8).ok(),
        _ => None,
    }
}

/// The domain whose zone may hold aliases for `host`: its parent, unless the
/// host is itself a top-level name.
fn alias_domain(host: &DomainName) -> DomainName {
    match host.parent() {
        Some(parent) if !parent.is_root() => parent,
        _ => host.clone(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
