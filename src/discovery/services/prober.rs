//! Concurrent port-scan prober.

use crate::discovery::{
    domain::{DiscoveryDomainError, ProbePlan, ServerDescriptor},
    ports::{DiscoveryProber, HealthEndpoint},
};
use crate::host_url::HostUrl;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

/// Prober that issues one health check per planned port, all at once.
///
/// Each check carries its own timeout. A slow or failing port never delays
/// or cancels its siblings, and contributes nothing to the result.
#[derive(Debug)]
pub struct PortScanProber<H>
where
    H: HealthEndpoint,
{
    endpoint: Arc<H>,
    plan: ProbePlan,
    candidates: Vec<(u16, HostUrl)>,
}

impl<H> PortScanProber<H>
where
    H: HealthEndpoint,
{
    /// Creates a prober for `plan`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryDomainError`] when a candidate URL cannot be built.
    pub fn new(endpoint: Arc<H>, plan: ProbePlan) -> Result<Self, DiscoveryDomainError> {
        let candidates = plan.candidates()?;
        Ok(Self {
            endpoint,
            plan,
            candidates,
        })
    }

    /// Returns the probe plan.
    #[must_use]
    pub const fn plan(&self) -> &ProbePlan {
        &self.plan
    }

    async fn probe_one(&self, port: u16, url: &HostUrl) -> Option<ServerDescriptor> {
        let timeout = self.plan.timeout();
        match tokio::time::timeout(timeout, self.endpoint.check(url, timeout)).await {
            Ok(Ok(report)) => Some(ServerDescriptor::from_report(port, url.clone(), &report)),
            Ok(Err(err)) => {
                debug!(port, error = %err, "health probe failed");
                None
            }
            Err(_) => {
                debug!(port, timeout_ms = timeout.as_millis(), "health probe timed out");
                None
            }
        }
    }
}

#[async_trait]
impl<H> DiscoveryProber for PortScanProber<H>
where
    H: HealthEndpoint,
{
    async fn probe(&self) -> Vec<ServerDescriptor> {
        let probes = self
            .candidates
            .iter()
            .map(|(port, url)| self.probe_one(*port, url));
        let servers: Vec<ServerDescriptor> = join_all(probes).await.into_iter().flatten().collect();

        info!(
            candidates = self.candidates.len(),
            live = servers.len(),
            healthy = servers.iter().filter(|server| server.is_healthy()).count(),
            "discovery scan complete"
        );
        servers
    }
}
