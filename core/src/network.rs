//! Network adapters for the [`ChaosDirectory`](chaoshosts_common::directory::ChaosDirectory) port.

pub mod client;
