//! Service layer for registering sources and their hosts.

use crate::host_catalog::{
    domain::{HostCatalogDomainError, HostCatalogEntry, ModelId, Source, SourceId, SourceSetName},
    ports::{HostCatalogError, HostCatalogRepository},
};
use crate::host_url::HostUrl;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSourceRequest {
    /// Model the source serves.
    pub model_id: String,
    /// Source set the source joins.
    pub source_set: String,
    /// Display name.
    pub name: String,
}

impl RegisterSourceRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        model_id: impl Into<String>,
        source_set: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            source_set: source_set.into(),
            name: name.into(),
        }
    }
}

/// Service-level errors for catalog registration.
#[derive(Debug, Error)]
pub enum HostCatalogServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] HostCatalogDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] HostCatalogError),
}

/// Result type for catalog service operations.
pub type HostCatalogServiceResult<T> = Result<T, HostCatalogServiceError>;

/// Catalog registration service.
#[derive(Clone)]
pub struct HostCatalogService<R, C>
where
    R: HostCatalogRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> HostCatalogService<R, C>
where
    R: HostCatalogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new source.
    ///
    /// # Errors
    ///
    /// Returns [`HostCatalogServiceError`] when validation fails or
    /// persistence rejects the source.
    pub async fn register_source(
        &self,
        request: RegisterSourceRequest,
    ) -> HostCatalogServiceResult<Source> {
        let model_id = ModelId::new(request.model_id)?;
        let source_set = SourceSetName::new(request.source_set)?;
        let source = Source::new(model_id, source_set, request.name, &*self.clock)?;
        self.repository.register_source(&source).await?;
        info!(
            source_id = %source.id(),
            model_id = %source.model_id(),
            source_set = %source.source_set(),
            "source registered"
        );
        Ok(source)
    }

    /// Registers `host_url` against a source.
    ///
    /// Registering the same host twice for one source leaves a single entry.
    ///
    /// # Errors
    ///
    /// Returns [`HostCatalogServiceError::Domain`] for an invalid URL or
    /// [`HostCatalogServiceError::Repository`] when the source is unknown or
    /// persistence fails.
    pub async fn register_host(
        &self,
        source_id: SourceId,
        host_url: &str,
    ) -> HostCatalogServiceResult<HostCatalogEntry> {
        let url = HostUrl::parse(host_url).map_err(HostCatalogDomainError::from)?;
        let entry = self.repository.attach_host(source_id, &url).await?;
        info!(%source_id, host_url = %entry.host_url, "host registered");
        Ok(entry)
    }

    /// Lists every registered entry.
    ///
    /// # Errors
    ///
    /// Returns [`HostCatalogServiceError::Repository`] when persistence fails.
    pub async fn list_entries(&self) -> HostCatalogServiceResult<Vec<HostCatalogEntry>> {
        Ok(self.repository.list_entries().await?)
    }
}
