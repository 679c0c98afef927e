//! # chaoshosts core
//!
//! Builds legacy host tables from Chaosnet-class DNS data.
//!
//! * [`builder`]: host and network tables from the address zone's PTR records.
//! * [`aliases`]: CNAME scan of the domains the hosts live in.
//! * [`prune`]: shortening of names for the legacy tables.
//! * [`format`]: the output styles.
//! * [`service`]: orchestration of a complete run.
//! * [`network`]: the DNS client behind the directory port.

pub mod aliases;
pub mod builder;
pub mod format;
pub mod network;
pub mod prune;
pub mod service;
