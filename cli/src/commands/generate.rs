use std::io::{self, BufWriter, StdoutLock};
use std::time::Instant;

use chaoshosts_common::catalog::Catalog;
use chaoshosts_common::config::Config;
use chaoshosts_core::format::Style;
use chaoshosts_core::network::client::ChaosDnsClient;
use chaoshosts_core::service::{self, HostTableService};
use chrono::Local;
use tracing::info;

/// Reads the Chaosnet zones and writes the requested table to stdout.
pub async fn generate(cfg: &Config, style: Style) -> anyhow::Result<()> {
    let start_time: Instant = Instant::now();

    let client: ChaosDnsClient = ChaosDnsClient::connect(cfg).await?;
    let service: HostTableService = HostTableService::new(&client, cfg);
    let catalog: Catalog = service.load_catalog().await?;

    let mut out: BufWriter<StdoutLock<'static>> = BufWriter::new(io::stdout().lock());
    service
        .render(&catalog, style, Local::now().date_naive(), &mut out)
        .await?;

    info!(
        "Generated {:?} table: {} hosts ({} without aliases), {} networks in {:.2}s",
        style,
        catalog.hosts.len(),
        service::hosts_without_aliases(&catalog),
        catalog.networks.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
