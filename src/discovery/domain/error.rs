//! Error types for discovery domain validation.

use crate::host_url::HostUrlError;
use thiserror::Error;

/// Errors returned while constructing discovery domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryDomainError {
    /// No probe-able port remains once reserved ports are removed.
    #[error("probe port set is empty after removing reserved ports")]
    EmptyPortSet,

    /// The per-probe timeout is zero.
    #[error("probe timeout must be greater than zero")]
    ZeroProbeTimeout,

    /// A candidate URL could not be built from the probe scheme and host.
    #[error(transparent)]
    InvalidCandidate(#[from] HostUrlError),
}
