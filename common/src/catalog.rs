//! # Host Catalog
//!
//! Everything collected from the name server before rendering: the hosts and
//! their PTR-derived addresses, the network names, the aliases found in the
//! host domains, and the serial of every zone read along the way.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::name::DomainName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub address_zone: DomainName,
    pub address_serial: u32,
    /// Host name to the set of its Chaosnet addresses.
    pub hosts: BTreeMap<DomainName, BTreeSet<u16>>,
    /// Network number (address without its low byte) to network name.
    pub networks: BTreeMap<u16, DomainName>,
    /// Lower-cased host name to aliases, in discovery order, duplicates kept.
    pub aliases: HashMap<DomainName, Vec<DomainName>>,
    /// Serial of every scanned alias domain.
    pub serials: BTreeMap<DomainName, u32>,
}

impl Catalog {
    pub fn new(address_zone: DomainName, address_serial: u32) -> Self {
        Self {
            address_zone,
            address_serial,
            hosts: BTreeMap::new(),
            networks: BTreeMap::new(),
            aliases: HashMap::new(),
            serials: BTreeMap::new(),
        }
    }

    /// Aliases recorded for `host`, matched without regard to case.
    pub fn aliases_of(&self, host: &DomainName) -> &[DomainName] {
        self.aliases
            .get(&host.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Hosts sorted by their reversed label sequence.
    pub fn hosts_in_order(&self) -> Vec<(&DomainName, &BTreeSet<u16>)> {
        let mut hosts: Vec<(&DomainName, &BTreeSet<u16>)> = self.hosts.iter().collect();
        hosts.sort_by(|(a, _), (b, _)| a.cmp_reversed(b));
        hosts
    }
}
