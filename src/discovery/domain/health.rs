//! Typed contract for the `/health` body served by inference servers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status strings a server uses to say it cannot serve yet.
const UNHEALTHY_STATUSES: [&str; 6] = [
    "error",
    "unhealthy",
    "down",
    "loading",
    "starting",
    "unavailable",
];

/// Body returned by `GET <base>/health`.
///
/// Servers report their model under different keys. [`Self::model_identifier`]
/// reads them in this order: `model_id`, `model`, `model_name`,
/// `served_model_name`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Status as reported, string or otherwise.
    #[serde(default)]
    pub status: Option<Value>,
    /// Preferred model identifier key.
    #[serde(default)]
    pub model_id: Option<String>,
    /// Second-choice model identifier key.
    #[serde(default)]
    pub model: Option<String>,
    /// Third-choice model identifier key.
    #[serde(default)]
    pub model_name: Option<String>,
    /// Key used by vLLM-style servers.
    #[serde(default)]
    pub served_model_name: Option<String>,
}

impl HealthReport {
    /// Creates a report carrying only a model identifier under `model_id`.
    #[must_use]
    pub fn for_model(model_id: impl Into<String>) -> Self {
        Self {
            model_id: Some(model_id.into()),
            ..Self::default()
        }
    }

    /// Sets the reported status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(Value::String(status.into()));
        self
    }

    /// Returns the first non-blank model identifier by key precedence.
    #[must_use]
    pub fn model_identifier(&self) -> Option<&str> {
        [
            &self.model_id,
            &self.model,
            &self.model_name,
            &self.served_model_name,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .map(str::trim)
        .find(|value| !value.is_empty())
    }

    /// Returns whether the report describes a healthy server.
    ///
    /// Answering the probe is the signal. Only an explicit negative status,
    /// such as `"loading"` or `false`, marks the server unhealthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        match &self.status {
            Some(Value::String(status)) => {
                let normalized = status.trim().to_ascii_lowercase();
                !UNHEALTHY_STATUSES.contains(&normalized.as_str())
            }
            Some(Value::Bool(flag)) => *flag,
            _ => true,
        }
    }
}
