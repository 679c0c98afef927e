//! # Name Normalizer
//!
//! Shortens names for the legacy tables. A name is cut down to its first
//! label when its immediate parent is the legacy root (for hosts running the
//! legacy OS, if enabled) or the configured local domain.

use chaoshosts_common::config::Config;
use chaoshosts_common::name::DomainName;

pub fn maybe_prune_domain_parent(name: &DomainName, os: Option<&str>, cfg: &Config) -> DomainName {
    let legacy_host: bool = cfg.prune_legacy_root
        && os.is_some_and(|os| cfg.is_legacy_os(os))
        && name.parent_eq_ignore_case(&cfg.legacy_root);
    let local_host: bool = cfg
        .local_domain
        .as_ref()
        .is_some_and(|domain| name.parent_eq_ignore_case(domain));

    if legacy_host || local_host {
        name.truncate_to_first_label()
    } else {
        name.clone()
    }
}

/// Prunes every alias, then drops repeats of an already pruned spelling.
pub fn prune_aliases(aliases: &[DomainName], os: Option<&str>, cfg: &Config) -> Vec<String> {
    let mut pruned: Vec<String> = Vec::with_capacity(aliases.len());
    for alias in aliases {
        let short: String = maybe_prune_domain_parent(alias, os, cfg).without_final_dot();
        if !pruned.contains(&short) {
            pruned.push(short);
        }
    }
    pruned
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
