//! Shared models and contracts for the Chaosnet host table generator.
//!
//! * [`name`]: absolute domain names and their comparison rules.
//! * [`zone`]: decoded zone records.
//! * [`host`]: live host information and its completeness check.
//! * [`catalog`]: the table assembled before rendering.
//! * [`directory`]: the outbound port to the name server.
//! * [`config`]: run configuration.

pub mod catalog;
pub mod config;
pub mod directory;
pub mod host;
pub mod name;
pub mod zone;
