//! Lisp Machine `HOSTS TEXT`.
//!
//! ```text
//! NET 1, MIT-NET
//! HOST FOO.CHAOSNET.NET, [CHAOS 101, CHAOS 102], USER, ITS, PDP10, [F.CHAOSNET.NET]
//! ```

use chaoshosts_common::config::Config;
use chaoshosts_common::host::HostDescriptor;
use chaoshosts_common::name::DomainName;

use super::{HostEntry, HostTableFormat, RenderError, chaos_address};
use crate::prune::{maybe_prune_domain_parent, prune_aliases};

pub struct LispmFormat<'a> {
    cfg: &'a Config,
}

impl<'a> LispmFormat<'a> {
    pub fn new(cfg: &'a Config) -> Self {
        Self { cfg }
    }
}

impl HostTableFormat for LispmFormat<'_> {
    fn render_network(&mut self, number: u16, name: &DomainName) -> Vec<String> {
        vec![format!("NET {}, {}", number, name.without_final_dot())]
    }

    fn render_host(&mut self, host: &HostEntry<'_>) -> Result<Vec<String>, RenderError> {
        let descriptor: HostDescriptor = host.info.descriptor().map_err(|source| {
            RenderError::Incomplete {
                host: host.name.clone(),
                source,
            }
        })?;

        let addresses: String = match host.addresses {
            [] => {
                return Err(RenderError::NoAddresses {
                    host: host.name.clone(),
                });
            }
            [single] => chaos_address(*single),
            many => format!(
                "[{}]",
                many.iter()
                    .map(|address| chaos_address(*address))
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
        };

        let os: Option<&str> = Some(descriptor.os);
        let name: String = maybe_prune_domain_parent(host.name, os, self.cfg).without_final_dot();
        let aliases: Vec<String> = prune_aliases(host.aliases, os, self.cfg);
        let aliases: String = if aliases.is_empty() {
            String::new()
        } else {
            format!(", [{}]", aliases.join(", "))
        };

        Ok(vec![format!(
            "HOST {}, {}, USER, {}, {}{}",
            name,
            addresses,
            descriptor.os.to_uppercase(),
            descriptor.cpu.to_uppercase(),
            aliases
        )])
    }
}
