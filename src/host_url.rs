//! Canonical `scheme://host:port` URLs for inference backends.
//!
//! Every URL handed to callers, whether discovered by probing or read from the
//! host catalog, passes through [`HostUrl`] so the routing layer never returns
//! a URL carrying a path, query string, or credentials.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Errors returned while validating a host URL.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostUrlError {
    /// The input is empty after trimming.
    #[error("host URL must not be empty")]
    Empty,

    /// The input could not be parsed as a URL.
    #[error("host URL '{0}' is not a valid URL")]
    Unparseable(String),

    /// The scheme is neither `http` nor `https`.
    #[error("host URL '{0}' must use the http or https scheme")]
    UnsupportedScheme(String),

    /// The URL has no host component.
    #[error("host URL '{0}' has no host")]
    MissingHost(String),

    /// The URL carries a path, query string, fragment, or credentials.
    #[error("host URL '{0}' must not carry a path, query, fragment, or credentials")]
    UnexpectedComponent(String),
}

/// Validated backend base URL in `scheme://host:port` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostUrl {
    scheme: String,
    host: String,
    port: u16,
}

impl HostUrl {
    /// Parses and canonicalises a host URL.
    ///
    /// A missing port is filled from the scheme default. A single trailing
    /// `/` is accepted and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`HostUrlError`] when the input is not a bare
    /// `scheme://host[:port]` URL.
    pub fn parse(value: &str) -> Result<Self, HostUrlError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(HostUrlError::Empty);
        }

        let parsed =
            Url::parse(trimmed).map_err(|_| HostUrlError::Unparseable(trimmed.to_owned()))?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(HostUrlError::UnsupportedScheme(trimmed.to_owned()));
        }

        let host = parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| HostUrlError::MissingHost(trimmed.to_owned()))?;

        let has_extra = (parsed.path() != "/" && !parsed.path().is_empty())
            || parsed.query().is_some()
            || parsed.fragment().is_some()
            || !parsed.username().is_empty()
            || parsed.password().is_some();
        if has_extra {
            return Err(HostUrlError::UnexpectedComponent(trimmed.to_owned()));
        }

        let port = parsed
            .port_or_known_default()
            .ok_or_else(|| HostUrlError::Unparseable(trimmed.to_owned()))?;

        Ok(Self {
            scheme: scheme.to_owned(),
            host: host.to_owned(),
            port,
        })
    }

    /// Builds a host URL from its components.
    ///
    /// # Errors
    ///
    /// Returns [`HostUrlError`] when the components do not form a valid URL.
    pub fn from_parts(scheme: &str, host: &str, port: u16) -> Result<Self, HostUrlError> {
        Self::parse(&format!("{scheme}://{host}:{port}"))
    }

    /// Returns the URL scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the host name or address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the explicit port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Appends an absolute path to the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        let trimmed = path.trim_start_matches('/');
        format!("{self}/{trimmed}")
    }
}

impl fmt::Display for HostUrl {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}://{}:{}", self.scheme, self.host, self.port)
    }
}

impl FromStr for HostUrl {
    type Err = HostUrlError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for HostUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HostUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
