//! # Host Information
//!
//! Live data returned by a per-host `ANY` query, and the check that decides
//! whether it is complete enough to appear in a host table.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Os,
    Cpu,
    OsAndCpu,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::Os => write!(f, "OS"),
            MissingField::Cpu => write!(f, "CPU"),
            MissingField::OsAndCpu => write!(f, "OS and CPU"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostInfoError {
    #[error("HINFO is missing {0}")]
    Incomplete(MissingField),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostInfo {
    /// Chaosnet addresses from the live `A` answer, in answer order.
    pub addresses: Vec<u16>,
    pub os: Option<String>,
    pub cpu: Option<String>,
    pub txt: Vec<String>,
    /// Mailboxes from `RP` records, written as `user@domain`.
    pub responsible: Vec<String>,
}

/// HINFO with both fields present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostDescriptor<'a> {
    pub os: &'a str,
    pub cpu: &'a str,
}

impl HostInfo {
    pub fn descriptor(&self) -> Result<HostDescriptor<'_>, HostInfoError> {
        match (self.os.as_deref(), self.cpu.as_deref()) {
            (Some(os), Some(cpu)) => Ok(HostDescriptor { os, cpu }),
            (Some(_), None) => Err(HostInfoError::Incomplete(MissingField::Cpu)),
            (None, Some(_)) => Err(HostInfoError::Incomplete(MissingField::Os)),
            (None, None) => Err(HostInfoError::Incomplete(MissingField::OsAndCpu)),
        }
    }
}
