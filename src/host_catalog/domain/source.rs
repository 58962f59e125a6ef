//! Catalog sources and the host entries attached to them.

use super::{HostCatalogDomainError, ModelId, SourceId, SourceSetName};
use crate::host_url::HostUrl;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A data source registered for a model within a source set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    id: SourceId,
    model_id: ModelId,
    source_set: SourceSetName,
    name: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSourceData {
    /// Persisted source identifier.
    pub id: SourceId,
    /// Persisted model identifier.
    pub model_id: ModelId,
    /// Persisted source set name.
    pub source_set: SourceSetName,
    /// Persisted display name.
    pub name: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Source {
    /// Creates a new source.
    ///
    /// # Errors
    ///
    /// Returns [`HostCatalogDomainError::EmptySourceName`] when the trimmed
    /// name is empty.
    pub fn new(
        model_id: ModelId,
        source_set: SourceSetName,
        name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, HostCatalogDomainError> {
        let trimmed = name.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(HostCatalogDomainError::EmptySourceName);
        }
        Ok(Self {
            id: SourceId::new(),
            model_id,
            source_set,
            name: trimmed,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a source from persistence.
    #[must_use]
    pub fn from_persisted(data: PersistedSourceData) -> Self {
        Self {
            id: data.id,
            model_id: data.model_id,
            source_set: data.source_set,
            name: data.name,
            created_at: data.created_at,
        }
    }

    /// Returns the source identifier.
    #[must_use]
    pub const fn id(&self) -> SourceId {
        self.id
    }

    /// Returns the model this source serves.
    #[must_use]
    pub const fn model_id(&self) -> &ModelId {
        &self.model_id
    }

    /// Returns the source set this source belongs to.
    #[must_use]
    pub const fn source_set(&self) -> &SourceSetName {
        &self.source_set
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// One host registered against a source, flattened for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostCatalogEntry {
    /// Source the host is attached to.
    pub source_id: SourceId,
    /// Model the source serves.
    pub model_id: ModelId,
    /// Source set the source belongs to.
    pub source_set: SourceSetName,
    /// Registered host.
    pub host_url: HostUrl,
}

impl HostCatalogEntry {
    /// Builds an entry attaching `host_url` to `source`.
    #[must_use]
    pub fn for_source(source: &Source, host_url: HostUrl) -> Self {
        Self {
            source_id: source.id(),
            model_id: source.model_id().clone(),
            source_set: source.source_set().clone(),
            host_url,
        }
    }
}
