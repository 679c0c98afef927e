pub mod generate;

use clap::{ArgAction, ArgGroup, Parser};
use chaoshosts_common::config::{
    Config, DEFAULT_ADDRESS_ZONE, DEFAULT_LEGACY_ROOT, DEFAULT_PORT, DEFAULT_SERVER,
    DEFAULT_TIMEOUT_SECS, LEGACY_OS,
};
use chaoshosts_common::name::DomainName;
use chaoshosts_core::format::Style;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "chaoshosts", version)]
#[command(about = "Generate legacy Chaosnet host tables from DNS.")]
#[command(group(
    ArgGroup::new("style")
        .required(true)
        .multiple(true)
        .args(["h3text", "lispm", "shortnames"])
))]
pub struct CommandLine {
    /// Generate an ITS HOSTS3 table (H3TEXT)
    #[arg(short = '3')]
    pub h3text: bool,

    /// Generate a Lisp Machine HOSTS TEXT table
    #[arg(short = 'l')]
    pub lispm: bool,

    /// List the short names of all ITS hosts on one line
    #[arg(short = 'i')]
    pub shortnames: bool,

    /// Remove the legacy root domain from the names of ITS hosts
    #[arg(short = 'a')]
    pub prune_legacy_root: bool,

    /// Local domain, removed from host names and aliases directly below it
    #[arg(short = 'd', value_name = "DOMAIN")]
    pub local_domain: Option<DomainName>,

    /// Name server to query
    #[arg(long, default_value = DEFAULT_SERVER)]
    pub server: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Reverse zone holding the Chaosnet address PTR records
    #[arg(long = "zone", value_name = "ZONE", default_value = DEFAULT_ADDRESS_ZONE)]
    pub address_zone: DomainName,

    /// Domain removed from ITS host names by -a
    #[arg(long, value_name = "DOMAIN", default_value = DEFAULT_LEGACY_ROOT)]
    pub legacy_root: DomainName,

    /// Seconds to wait for each exchange with the name server
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    /// Parses the process arguments. Usage errors exit with status 1.
    pub fn parse_args() -> Self {
        match Self::try_parse() {
            Ok(commands) => commands,
            Err(err) => {
                let code: i32 = if err.use_stderr() { 1 } else { 0 };
                let _ = err.print();
                std::process::exit(code);
            }
        }
    }

    /// The table to generate. `-3` wins over `-l`, which wins over `-i`.
    pub fn style(&self) -> Style {
        if self.h3text {
            Style::H3Text
        } else if self.lispm {
            Style::Lispm
        } else {
            Style::Shortnames
        }
    }

    pub fn to_config(&self) -> Config {
        Config {
            prune_legacy_root: self.prune_legacy_root,
            local_domain: self.local_domain.clone(),
            legacy_root: self.legacy_root.clone(),
            legacy_os: LEGACY_OS.to_string(),
            address_zone: self.address_zone.clone(),
            server: self.server.clone(),
            port: self.port,
            timeout: Duration::from_secs(self.timeout),
        }
    }
}
