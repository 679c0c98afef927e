//! Short names of every legacy-OS host, space separated on a single line.

use chaoshosts_common::config::Config;
use chaoshosts_common::name::DomainName;

use super::{HostEntry, HostTableFormat, Provenance, RenderError};
use crate::prune::prune_aliases;

pub struct ShortnamesFormat<'a> {
    cfg: &'a Config,
    shortnames: Vec<String>,
}

impl<'a> ShortnamesFormat<'a> {
    pub fn new(cfg: &'a Config) -> Self {
        Self {
            cfg,
            shortnames: Vec::new(),
        }
    }
}

impl HostTableFormat for ShortnamesFormat<'_> {
    fn render_header(&mut self, _provenance: &Provenance<'_>) -> Vec<String> {
        Vec::new()
    }

    fn render_network(&mut self, _number: u16, _name: &DomainName) -> Vec<String> {
        Vec::new()
    }

    fn end_networks(&mut self) -> Vec<String> {
        Vec::new()
    }

    fn render_host(&mut self, host: &HostEntry<'_>) -> Result<Vec<String>, RenderError> {
        let os: Option<&str> = host.info.os.as_deref();
        if !os.is_some_and(|os| self.cfg.is_legacy_os(os)) {
            return Ok(Vec::new());
        }

        let shortest: String = prune_aliases(host.aliases, os, self.cfg)
            .into_iter()
            .min_by_key(String::len)
            .ok_or_else(|| RenderError::NoAliases {
                host: host.name.clone(),
            })?;
        self.shortnames.push(shortest);
        Ok(Vec::new())
    }

    fn finish(&mut self) -> Vec<String> {
        vec![self.shortnames.join(" ")]
    }
}
