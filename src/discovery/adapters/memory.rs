//! In-memory health endpoint for deterministic discovery runs.

use crate::discovery::{
    domain::HealthReport,
    ports::{HealthEndpoint, HealthEndpointError, HealthEndpointResult},
};
use crate::host_url::HostUrl;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Scripted outcome for one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedHealth {
    /// Answer with this report.
    Report(HealthReport),
    /// Answer with a non-success HTTP status.
    Status(u16),
    /// Answer with a body that breaks the health contract.
    Malformed,
}

/// Health endpoint that answers from a script instead of the network.
///
/// URLs without a script behave like a closed port. Every probed URL is
/// recorded so tests can assert which candidates a scan touched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHealthEndpoint {
    state: Arc<RwLock<InMemoryHealthState>>,
}

#[derive(Debug, Default)]
struct InMemoryHealthState {
    scripts: HashMap<HostUrl, ScriptedHealth>,
    delays: HashMap<HostUrl, Duration>,
    requests: Vec<HostUrl>,
}

impl InMemoryHealthEndpoint {
    /// Creates an endpoint where every port is closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the outcome for `url`, replacing any previous script.
    pub fn script(&self, url: HostUrl, outcome: ScriptedHealth) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.scripts.insert(url, outcome);
    }

    /// Scripts a healthy server reporting `model_id`.
    pub fn serve_model(&self, url: HostUrl, model_id: impl Into<String>) {
        self.script(url, ScriptedHealth::Report(HealthReport::for_model(model_id)));
    }

    /// Delays every answer for `url`.
    pub fn delay(&self, url: HostUrl, delay: Duration) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.delays.insert(url, delay);
    }

    /// Removes the script for `url`, closing the port.
    pub fn close(&self, url: &HostUrl) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.scripts.remove(url);
    }

    /// Returns every URL probed so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<HostUrl> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.requests.clone()
    }
}

#[async_trait]
impl HealthEndpoint for InMemoryHealthEndpoint {
    async fn check(
        &self,
        base_url: &HostUrl,
        _timeout: Duration,
    ) -> HealthEndpointResult<HealthReport> {
        let (outcome, delay) = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.requests.push(base_url.clone());
            (
                state.scripts.get(base_url).cloned(),
                state.delays.get(base_url).copied(),
            )
        };

        if let Some(pause) = delay {
            tokio::time::sleep(pause).await;
        }

        match outcome {
            Some(ScriptedHealth::Report(report)) => Ok(report),
            Some(ScriptedHealth::Status(status)) => Err(HealthEndpointError::Status {
                url: base_url.clone(),
                status,
            }),
            Some(ScriptedHealth::Malformed) => Err(HealthEndpointError::Malformed {
                url: base_url.clone(),
                reason: String::from("scripted malformed body"),
            }),
            None => Err(HealthEndpointError::unreachable(
                base_url.clone(),
                io::Error::from(io::ErrorKind::ConnectionRefused),
            )),
        }
    }
}
