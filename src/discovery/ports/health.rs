//! Outbound health-probe port.

use crate::discovery::domain::HealthReport;
use crate::host_url::HostUrl;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for health probes.
pub type HealthEndpointResult<T> = Result<T, HealthEndpointError>;

/// Client contract for `GET <base>/health`.
#[async_trait]
pub trait HealthEndpoint: Send + Sync {
    /// Probes one server, giving up after `timeout`.
    async fn check(
        &self,
        base_url: &HostUrl,
        timeout: Duration,
    ) -> HealthEndpointResult<HealthReport>;
}

/// Reasons a single probe contributes nothing to a scan.
#[derive(Debug, Clone, Error)]
pub enum HealthEndpointError {
    /// Connection refused, DNS failure, or another transport error.
    #[error("health endpoint {url} unreachable: {cause}")]
    Unreachable {
        /// Probed base URL.
        url: HostUrl,
        /// Transport failure.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The probe did not complete within its timeout.
    #[error("health endpoint {0} timed out")]
    Timeout(HostUrl),

    /// The server answered with a non-success status.
    #[error("health endpoint {url} returned status {status}")]
    Status {
        /// Probed base URL.
        url: HostUrl,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not a JSON object matching the health contract.
    #[error("health endpoint {url} returned a malformed body: {reason}")]
    Malformed {
        /// Probed base URL.
        url: HostUrl,
        /// Decoder message.
        reason: String,
    },
}

impl HealthEndpointError {
    /// Wraps a transport failure.
    pub fn unreachable(url: HostUrl, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unreachable {
            url,
            cause: Arc::new(err),
        }
    }
}
