use async_trait::async_trait;

use crate::host::HostInfo;
use crate::name::DomainName;
use crate::zone::Zone;

/// Defines the contract for reading Chaosnet-class DNS data.
///
/// Implemented by the network client in `chaoshosts-core`; tests substitute
/// an in-memory directory.
#[async_trait]
pub trait ChaosDirectory: Send + Sync {
    /// Transfers the complete zone rooted at `origin`.
    async fn transfer_zone(&self, origin: &DomainName) -> anyhow::Result<Zone>;

    /// Fetches everything the server knows about `host` with an `ANY` query.
    async fn host_info(&self, host: &DomainName) -> anyhow::Result<HostInfo>;
}
