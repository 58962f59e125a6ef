//! `reqwest`-backed health endpoint client.

use crate::discovery::{
    domain::{HEALTH_PATH, HealthReport},
    ports::{HealthEndpoint, HealthEndpointError, HealthEndpointResult},
};
use crate::host_url::HostUrl;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Health endpoint adapter issuing real HTTP requests.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHealthEndpoint {
    client: reqwest::Client,
}

impl ReqwestHealthEndpoint {
    /// Creates an adapter with a default client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter around an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn transport_error(url: &HostUrl, err: reqwest::Error) -> HealthEndpointError {
    if err.is_timeout() {
        HealthEndpointError::Timeout(url.clone())
    } else {
        HealthEndpointError::unreachable(url.clone(), err)
    }
}

#[async_trait]
impl HealthEndpoint for ReqwestHealthEndpoint {
    async fn check(
        &self,
        base_url: &HostUrl,
        timeout: Duration,
    ) -> HealthEndpointResult<HealthReport> {
        let response = self
            .client
            .get(base_url.join(HEALTH_PATH))
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| transport_error(base_url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HealthEndpointError::Status {
                url: base_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| transport_error(base_url, err))?;
        let malformed = |reason: String| HealthEndpointError::Malformed {
            url: base_url.clone(),
            reason,
        };

        let value: Value =
            serde_json::from_slice(&body).map_err(|err| malformed(err.to_string()))?;
        if !value.is_object() {
            return Err(malformed(String::from("body is not a JSON object")));
        }
        serde_json::from_value(value).map_err(|err| malformed(err.to_string()))
    }
}
