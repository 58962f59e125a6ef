//! Descriptors of live servers and the snapshots that hold them.

use super::HealthReport;
use crate::host_url::HostUrl;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Placeholder identifier for servers that do not report a model.
pub const UNKNOWN_MODEL: &str = "unknown";

/// One live backend observed during a discovery scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerDescriptor {
    port: u16,
    model_id: String,
    base_url: HostUrl,
    healthy: bool,
}

impl ServerDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(port: u16, model_id: impl Into<String>, base_url: HostUrl, healthy: bool) -> Self {
        Self {
            port,
            model_id: model_id.into(),
            base_url,
            healthy,
        }
    }

    /// Builds a descriptor from a successful probe.
    #[must_use]
    pub fn from_report(port: u16, base_url: HostUrl, report: &HealthReport) -> Self {
        Self::new(
            port,
            report.model_identifier().unwrap_or(UNKNOWN_MODEL),
            base_url,
            report.is_healthy(),
        )
    }

    /// Returns the probed port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the model identifier the server reported.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Returns the server's base URL.
    #[must_use]
    pub const fn base_url(&self) -> &HostUrl {
        &self.base_url
    }

    /// Returns whether the server reported itself healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.healthy
    }
}

/// Immutable result of one discovery cycle.
///
/// Snapshots are replaced whole; nothing mutates one after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoverySnapshot {
    servers: Vec<ServerDescriptor>,
    count: usize,
    timestamp: DateTime<Utc>,
}

impl DiscoverySnapshot {
    /// Creates a snapshot taken at `timestamp`.
    #[must_use]
    pub fn new(servers: Vec<ServerDescriptor>, timestamp: DateTime<Utc>) -> Self {
        let count = servers.len();
        Self {
            servers,
            count,
            timestamp,
        }
    }

    /// Creates the empty snapshot stamped at the Unix epoch.
    ///
    /// This is the state of a cache that has never probed or was
    /// invalidated; it is always stale.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Returns the descriptors in the order the scan produced them.
    #[must_use]
    pub fn servers(&self) -> &[ServerDescriptor] {
        &self.servers
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the number of descriptors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` when the scan found no servers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates over healthy descriptors only.
    pub fn healthy(&self) -> impl Iterator<Item = &ServerDescriptor> {
        self.servers.iter().filter(|server| server.is_healthy())
    }
}
