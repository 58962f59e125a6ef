//! Repository port for catalog sources and their hosts.

use crate::host_catalog::domain::{HostCatalogEntry, ModelId, Source, SourceId, SourceSetName};
use crate::host_url::HostUrl;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for host catalog operations.
pub type HostCatalogResult<T> = Result<T, HostCatalogError>;

/// Persistence contract for sources and attached hosts.
///
/// Host lists are returned in registration order and may contain the same
/// URL more than once when it is attached to several sources.
#[async_trait]
pub trait HostCatalogRepository: Send + Sync {
    /// Stores a new source.
    ///
    /// # Errors
    ///
    /// Returns [`HostCatalogError::DuplicateSource`] when the identifier
    /// already exists.
    async fn register_source(&self, source: &Source) -> HostCatalogResult<()>;

    /// Attaches a host to an existing source.
    ///
    /// Attaching a host the source already lists is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HostCatalogError::SourceNotFound`] when the source does not
    /// exist.
    async fn attach_host(
        &self,
        source_id: SourceId,
        host_url: &HostUrl,
    ) -> HostCatalogResult<HostCatalogEntry>;

    /// Finds a source by identifier.
    async fn find_source(&self, source_id: SourceId) -> HostCatalogResult<Option<Source>>;

    /// Returns `true` when at least one source of `model_id` is in
    /// `source_set`.
    async fn source_set_exists(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
    ) -> HostCatalogResult<bool>;

    /// Returns hosts across every source of `model_id`.
    async fn hosts_for_model(&self, model_id: &ModelId) -> HostCatalogResult<Vec<HostUrl>>;

    /// Returns hosts of the sources in one source set of `model_id`.
    async fn hosts_for_source_set(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
    ) -> HostCatalogResult<Vec<HostUrl>>;

    /// Returns the hosts of one source, or `None` when the source is unknown.
    async fn hosts_for_source(
        &self,
        source_id: SourceId,
    ) -> HostCatalogResult<Option<Vec<HostUrl>>>;

    /// Returns every registered entry.
    async fn list_entries(&self) -> HostCatalogResult<Vec<HostCatalogEntry>>;
}

/// Errors returned by host catalog repository implementations.
#[derive(Debug, Clone, Error)]
pub enum HostCatalogError {
    /// A source with the same identifier already exists.
    #[error("duplicate source identifier: {0}")]
    DuplicateSource(SourceId),

    /// The source was not found.
    #[error("source not found: {0}")]
    SourceNotFound(SourceId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted host catalog data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl HostCatalogError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
