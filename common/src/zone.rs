//! # Zone Records
//!
//! The subset of resource records the host table generator understands,
//! already decoded from the wire. Anything else is carried as [`RecordData::Other`].

use crate::name::DomainName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// Reverse mapping from an address label to a host or network name.
    Ptr(DomainName),
    /// The owner is an alias of the target.
    Cname(DomainName),
    Soa { serial: u32 },
    Hinfo { cpu: String, os: String },
    /// Chaosnet address record: the network domain and a 16-bit address.
    ChaosA { domain: DomainName, address: u16 },
    Txt(Vec<String>),
    /// Responsible person: mailbox and the name of a TXT record with details.
    Rp { mailbox: DomainName, txt: DomainName },
    Other { rtype: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub owner: DomainName,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(owner: DomainName, data: RecordData) -> Self {
        Self { owner, data }
    }
}

/// A complete zone as returned by a zone transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub origin: DomainName,
    pub serial: u32,
    pub records: Vec<ResourceRecord>,
}

impl Zone {
    pub fn ptr_records(&self) -> impl Iterator<Item = (&DomainName, &DomainName)> {
        self.records.iter().filter_map(|record| match &record.data {
            RecordData::Ptr(target) => Some((&record.owner, target)),
            _ => None,
        })
    }

    pub fn cname_records(&self) -> impl Iterator<Item = (&DomainName, &DomainName)> {
        self.records.iter().filter_map(|record| match &record.data {
            RecordData::Cname(target) => Some((&record.owner, target)),
            _ => None,
        })
    }
}
