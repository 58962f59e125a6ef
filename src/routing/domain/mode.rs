//! Process-wide routing mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Where host selection looks for backends.
///
/// Fixed at start-up; nothing mutates it afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMode {
    /// Probe local ports and match against what the servers report.
    #[default]
    Dynamic,
    /// Consult the persistent host catalog.
    Static,
}

impl RoutingMode {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dynamic => "dynamic",
            Self::Static => "static",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned when a routing mode string is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown routing mode '{0}', expected 'dynamic' or 'static'")]
pub struct RoutingModeParseError(pub String);

impl FromStr for RoutingMode {
    type Err = RoutingModeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dynamic" => Ok(Self::Dynamic),
            "static" => Ok(Self::Static),
            _ => Err(RoutingModeParseError(value.to_owned())),
        }
    }
}
