mod commands;
mod terminal;

use commands::{CommandLine, generate};
use chaoshosts_common::config::Config;

use crate::terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands: CommandLine = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg: Config = commands.to_config();
    generate::generate(&cfg, commands.style()).await
}
