//! # Host Table Formats
//!
//! Every output style implements [`HostTableFormat`]. The service walks the
//! catalog once (header, networks in numeric order, hosts in reversed-label
//! order) and hands each piece to the selected format, which answers with the
//! lines to print.
//!
//! * [`h3text`]: ITS HOSTS3 source, colon-delimited.
//! * [`lispm`]: Lisp Machine `HOSTS TEXT`, comma-delimited.
//! * [`shortnames`]: one line with the short names of all legacy-OS hosts.

use std::collections::BTreeMap;

use chaoshosts_common::catalog::Catalog;
use chaoshosts_common::config::Config;
use chaoshosts_common::host::{HostInfo, HostInfoError};
use chaoshosts_common::name::DomainName;
use chrono::NaiveDate;
use thiserror::Error;

mod h3text;
mod lispm;
mod shortnames;

pub use h3text::H3TextFormat;
pub use lispm::LispmFormat;
pub use shortnames::ShortnamesFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    H3Text,
    Lispm,
    Shortnames,
}

impl Style {
    pub fn formatter<'a>(self, cfg: &'a Config) -> Box<dyn HostTableFormat + 'a> {
        match self {
            Style::H3Text => Box::new(H3TextFormat::new(cfg)),
            Style::Lispm => Box::new(LispmFormat::new(cfg)),
            Style::Shortnames => Box::new(ShortnamesFormat::new(cfg)),
        }
    }
}

/// A host entry that failed to render. The rest of the table is unaffected.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Skipping {host}: {source}")]
    Incomplete {
        host: DomainName,
        #[source]
        source: HostInfoError,
    },
    #[error("Skipping {host}: no addresses")]
    NoAddresses { host: DomainName },
    #[error("No aliases recorded for {host}, cannot pick a short name")]
    NoAliases { host: DomainName },
}

/// Zone serials the table was generated from.
#[derive(Debug, Clone)]
pub struct Provenance<'a> {
    pub generated: NaiveDate,
    pub address_zone: &'a DomainName,
    pub address_serial: u32,
    pub serials: &'a BTreeMap<DomainName, u32>,
}

impl<'a> Provenance<'a> {
    pub fn from_catalog(catalog: &'a Catalog, generated: NaiveDate) -> Self {
        Self {
            generated,
            address_zone: &catalog.address_zone,
            address_serial: catalog.address_serial,
            serials: &catalog.serials,
        }
    }

    pub fn comment_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = vec![format!(
            ";;; Generated on {} based on {} serial {}",
            self.generated.format("%Y-%m-%d"),
            self.address_zone.without_final_dot(),
            self.address_serial
        )];
        lines.extend(
            self.serials
                .iter()
                .map(|(domain, serial)| format!(";; and on serial {serial} of {domain}")),
        );
        lines
    }
}

/// One host, ready to render.
#[derive(Debug, Clone, Copy)]
pub struct HostEntry<'a> {
    pub name: &'a DomainName,
    /// Reconciled addresses, ascending.
    pub addresses: &'a [u16],
    /// Raw aliases in discovery order.
    pub aliases: &'a [DomainName],
    pub info: &'a HostInfo,
}

pub trait HostTableFormat {
    fn render_header(&mut self, provenance: &Provenance<'_>) -> Vec<String> {
        let mut lines: Vec<String> = provenance.comment_lines();
        lines.push(String::new());
        lines
    }

    fn render_network(&mut self, number: u16, name: &DomainName) -> Vec<String>;

    /// Separator between the network and host sections.
    fn end_networks(&mut self) -> Vec<String> {
        vec![String::new()]
    }

    fn render_host(&mut self, host: &HostEntry<'_>) -> Result<Vec<String>, RenderError>;

    /// Lines emitted after the last host.
    fn finish(&mut self) -> Vec<String> {
        Vec::new()
    }
}

pub(crate) fn chaos_address(address: u16) -> String {
    format!("CHAOS {address:o}")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_should_list_every_serial() {
        let zone: DomainName = "CH-ADDR.NET.".parse().unwrap();
        let serials: BTreeMap<DomainName, u32> = BTreeMap::from([
            ("CHAOSNET.NET.".parse().unwrap(), 2023),
            ("AOSNET.CH.".parse().unwrap(), 17),
        ]);
        let provenance: Provenance = Provenance {
            generated: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            address_zone: &zone,
            address_serial: 99,
            serials: &serials,
        };

        assert_eq!(
            provenance.comment_lines(),
            vec![
                ";;; Generated on 2024-03-09 based on CH-ADDR.NET serial 99",
                ";; and on serial 17 of AOSNET.CH.",
                ";; and on serial 2023 of CHAOSNET.NET.",
            ]
        );
    }

    #[test]
    fn chaos_address_should_be_octal() {
        assert_eq!(chaos_address(0o3040), "CHAOS 3040");
        assert_eq!(chaos_address(65), "CHAOS 101");
    }
}
