//! Error types for host catalog domain validation.

use crate::host_url::HostUrlError;
use thiserror::Error;

/// Errors returned while constructing host catalog domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostCatalogDomainError {
    /// The model identifier is empty after trimming.
    #[error("model identifier must not be empty")]
    EmptyModelId,

    /// The model identifier exceeds the storage limit.
    #[error("model identifier exceeds 255 character limit: {0}")]
    ModelIdTooLong(String),

    /// The source set name is empty after trimming.
    #[error("source set name must not be empty")]
    EmptySourceSetName,

    /// The source set name exceeds the storage limit.
    #[error("source set name exceeds 100 character limit: {0}")]
    SourceSetNameTooLong(String),

    /// The source display name is empty after trimming.
    #[error("source name must not be empty")]
    EmptySourceName,

    /// A host URL failed validation.
    #[error(transparent)]
    InvalidHostUrl(#[from] HostUrlError),
}
