//! ITS HOSTS3 source (`H3TEXT`).
//!
//! ```text
//! HOST : CHAOS 101, CHAOS 102 : FOO, F : PDP10 : ITS : :
//! ```

use chaoshosts_common::config::Config;
use chaoshosts_common::host::HostDescriptor;
use chaoshosts_common::name::DomainName;

use super::{HostEntry, HostTableFormat, RenderError, chaos_address};
use crate::prune::{maybe_prune_domain_parent, prune_aliases};

/// Wired into the ITS monitor; printed once, whatever the networks are.
const CHAOS_NET_DEFINITION: [&str; 3] = [
    ";;; Definition of Chaosnet for HOSTS3 UNTERNET scheme.",
    ";;; This is not a value you can change, it's wired into the ITS monitor.",
    "NET : UN 7.0.0.0 : CHAOS :",
];

pub struct H3TextFormat<'a> {
    cfg: &'a Config,
    net_printed: bool,
}

impl<'a> H3TextFormat<'a> {
    pub fn new(cfg: &'a Config) -> Self {
        Self {
            cfg,
            net_printed: false,
        }
    }
}

impl HostTableFormat for H3TextFormat<'_> {
    fn render_network(&mut self, _number: u16, _name: &DomainName) -> Vec<String> {
        if self.net_printed {
            return Vec::new();
        }
        self.net_printed = true;
        CHAOS_NET_DEFINITION.iter().map(|line| line.to_string()).collect()
    }

    fn render_host(&mut self, host: &HostEntry<'_>) -> Result<Vec<String>, RenderError> {
        let descriptor: HostDescriptor = host.info.descriptor().map_err(|source| {
            RenderError::Incomplete {
                host: host.name.clone(),
                source,
            }
        })?;
        if host.addresses.is_empty() {
            return Err(RenderError::NoAddresses {
                host: host.name.clone(),
            });
        }

        let addresses: String = host
            .addresses
            .iter()
            .map(|address| chaos_address(*address))
            .collect::<Vec<String>>()
            .join(", ");

        let os: Option<&str> = Some(descriptor.os);
        let mut names: Vec<String> =
            vec![maybe_prune_domain_parent(host.name, os, self.cfg).without_final_dot()];
        names.extend(prune_aliases(host.aliases, os, self.cfg));

        Ok(vec![format!(
            "HOST : {} : {} : {} : {} : :",
            addresses,
            names.join(", "),
            descriptor.cpu.to_uppercase(),
            descriptor.os.to_uppercase()
        )])
    }
}
