//! Discovery scan port.

use crate::discovery::domain::ServerDescriptor;
use async_trait::async_trait;

/// Runs one full discovery scan.
///
/// Scans never fail as a whole: servers that cannot be probed are left out
/// of the result.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscoveryProber: Send + Sync {
    /// Probes every configured candidate and returns the live servers.
    async fn probe(&self) -> Vec<ServerDescriptor>;
}
