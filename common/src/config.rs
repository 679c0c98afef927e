use std::time::Duration;

use crate::name::DomainName;

pub const DEFAULT_SERVER: &str = "dns.chaosnet.net";
pub const DEFAULT_PORT: u16 = 53;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ADDRESS_ZONE: &str = "CH-ADDR.NET.";
pub const DEFAULT_LEGACY_ROOT: &str = "CHAOSNET.NET.";
pub const LEGACY_OS: &str = "ITS";

pub struct Config {
    /// Strips [`Config::legacy_root`] from the names of hosts running [`Config::legacy_os`].
    pub prune_legacy_root: bool,
    /// Names directly below this domain are shortened to their first label.
    pub local_domain: Option<DomainName>,
    pub legacy_root: DomainName,
    pub legacy_os: String,
    /// Reverse zone holding the PTR records for every Chaosnet address.
    pub address_zone: DomainName,
    /// Name server queried with the CH class. Resolved through the system resolver.
    pub server: String,
    pub port: u16,
    /// Upper bound for a single exchange with the name server.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prune_legacy_root: false,
            local_domain: None,
            legacy_root: DomainName::from_static(&["CHAOSNET", "NET"]),
            legacy_os: LEGACY_OS.to_string(),
            address_zone: DomainName::from_static(&["CH-ADDR", "NET"]),
            server: DEFAULT_SERVER.to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn is_legacy_os(&self, os: &str) -> bool {
        os.eq_ignore_ascii_case(&self.legacy_os)
    }
}
