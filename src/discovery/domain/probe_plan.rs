//! Port range and request settings for a discovery scan.

use super::DiscoveryDomainError;
use crate::host_url::HostUrl;
use std::time::Duration;

/// Ports held by other subsystems; never probed.
pub const RESERVED_PORTS: [u16; 2] = [5003, 5004];

/// Default scheme for probe candidates.
pub const DEFAULT_PROBE_SCHEME: &str = "http";

/// Default host for probe candidates.
pub const DEFAULT_PROBE_HOST: &str = "localhost";

/// Default bound on a single health probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Path probed on every candidate.
pub const HEALTH_PATH: &str = "/health";

const DEFAULT_LEAD_PORT: u16 = 5002;
const DEFAULT_BLOCK_START: u16 = 5005;
const DEFAULT_BLOCK_END: u16 = 5020;

/// Ordered, de-duplicated set of ports to probe.
///
/// Reserved ports are removed on construction, so no value of this type can
/// ever name them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePorts(Vec<u16>);

impl ProbePorts {
    /// Builds a port set, dropping duplicates and reserved ports.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError::EmptyPortSet`] when nothing remains.
    pub fn new(ports: impl IntoIterator<Item = u16>) -> Result<Self, DiscoveryDomainError> {
        let mut kept: Vec<u16> = Vec::new();
        for port in ports {
            if !RESERVED_PORTS.contains(&port) && !kept.contains(&port) {
                kept.push(port);
            }
        }
        if kept.is_empty() {
            return Err(DiscoveryDomainError::EmptyPortSet);
        }
        Ok(Self(kept))
    }

    /// Returns the ports in probe order.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    /// Returns the number of ports.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no ports are present. Never true for a constructed
    /// value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ProbePorts {
    fn default() -> Self {
        Self(
            std::iter::once(DEFAULT_LEAD_PORT)
                .chain(DEFAULT_BLOCK_START..=DEFAULT_BLOCK_END)
                .collect(),
        )
    }
}

/// Everything the prober needs to run one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePlan {
    scheme: String,
    host: String,
    ports: ProbePorts,
    timeout: Duration,
}

impl ProbePlan {
    /// Creates a probe plan.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError`] when the timeout is zero or the scheme
    /// and host cannot form a valid base URL.
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        ports: ProbePorts,
        timeout: Duration,
    ) -> Result<Self, DiscoveryDomainError> {
        if timeout.is_zero() {
            return Err(DiscoveryDomainError::ZeroProbeTimeout);
        }
        let plan = Self {
            scheme: scheme.into(),
            host: host.into(),
            ports,
            timeout,
        };
        if let Some(&port) = plan.ports.as_slice().first() {
            HostUrl::from_parts(&plan.scheme, &plan.host, port)?;
        }
        Ok(plan)
    }

    /// Returns the ports to probe.
    #[must_use]
    pub const fn ports(&self) -> &ProbePorts {
        &self.ports
    }

    /// Returns the per-probe timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds one candidate base URL per port.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError::InvalidCandidate`] when a URL cannot be
    /// assembled.
    pub fn candidates(&self) -> Result<Vec<(u16, HostUrl)>, DiscoveryDomainError> {
        self.ports
            .as_slice()
            .iter()
            .map(|&port| {
                HostUrl::from_parts(&self.scheme, &self.host, port)
                    .map(|url| (port, url))
                    .map_err(DiscoveryDomainError::from)
            })
            .collect()
    }
}

impl Default for ProbePlan {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_PROBE_SCHEME.to_owned(),
            host: DEFAULT_PROBE_HOST.to_owned(),
            ports: ProbePorts::default(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}
