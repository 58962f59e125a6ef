//! Cached snapshot access port.

use crate::discovery::domain::DiscoverySnapshot;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for snapshot access.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Read and refresh access to the latest discovery snapshot.
#[async_trait]
pub trait DiscoverySnapshots: Send + Sync {
    /// Returns the cached snapshot, probing first when it is stale.
    async fn snapshot(&self) -> DiscoveryResult<Arc<DiscoverySnapshot>>;

    /// Drops the cached snapshot so the next read probes.
    fn invalidate(&self) -> DiscoveryResult<()>;

    /// Invalidates and immediately probes.
    async fn refresh(&self) -> DiscoveryResult<Arc<DiscoverySnapshot>> {
        self.invalidate()?;
        self.snapshot().await
    }
}

/// Errors returned by snapshot access.
#[derive(Debug, Clone, Error)]
pub enum DiscoveryError {
    /// The shared snapshot slot was poisoned by a panicking writer.
    #[error("discovery snapshot state poisoned: {0}")]
    StatePoisoned(String),
}
