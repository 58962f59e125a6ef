//! Command-line and environment configuration for the router process.
//!
//! Every flag has a `WAYSTATION_*` environment fallback so the binary can be
//! configured from a `.env` file. [`RouterArgs::into_config`] validates the
//! raw values into a [`RouterConfig`].

use crate::discovery::domain::{DiscoveryDomainError, ProbePlan, ProbePorts};
use crate::discovery::services::MatchPolicy;
use crate::host_url::{HostUrl, HostUrlError};
use crate::routing::domain::RoutingMode;
use crate::routing::services::SelectorSettings;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Model-aware backend router with local inference-server discovery.
#[derive(Parser, Debug, Clone)]
#[command(name = "waystation")]
#[command(about = "Routes model requests to discovered or catalogued inference hosts")]
pub struct RouterArgs {
    /// Routing mode: `dynamic` probes local ports, `static` reads the catalog
    #[arg(long, env = "WAYSTATION_ROUTING_MODE", default_value = "dynamic")]
    pub routing_mode: RoutingMode,

    /// Host used by dynamic lookups when no discovered server matches
    #[arg(long, env = "WAYSTATION_DEFAULT_HOST", default_value = "http://localhost:5002")]
    pub default_host: String,

    /// Scheme used to reach probed servers
    #[arg(long, env = "WAYSTATION_PROBE_SCHEME", default_value = "http")]
    pub probe_scheme: String,

    /// Host name probed for inference servers
    #[arg(long, env = "WAYSTATION_PROBE_HOST", default_value = "localhost")]
    pub probe_host: String,

    /// Ports to probe, as a comma-separated list of ports and `start-end` ranges
    #[arg(long, env = "WAYSTATION_PROBE_PORTS")]
    pub probe_ports: Option<String>,

    /// Per-probe timeout in milliseconds
    #[arg(long, env = "WAYSTATION_PROBE_TIMEOUT_MS", default_value = "2000")]
    pub probe_timeout_ms: u64,

    /// Lifetime of a cached discovery snapshot in seconds
    #[arg(long, env = "WAYSTATION_CACHE_TTL_SECS", default_value = "30")]
    pub cache_ttl_secs: u64,

    /// Distinct name tokens a partial model match must share
    #[arg(long, env = "WAYSTATION_MATCH_MIN_SHARED_TOKENS", default_value = "2")]
    pub match_min_shared_tokens: usize,

    /// Address the admin HTTP surface listens on
    #[arg(long, env = "WAYSTATION_LISTEN", default_value = "127.0.0.1:8090")]
    pub listen: SocketAddr,

    /// `PostgreSQL` URL of the host catalog; required in static mode
    #[arg(long, env = "WAYSTATION_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Log level directive used when `RUST_LOG` is unset
    #[arg(long, env = "WAYSTATION_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "WAYSTATION_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Errors raised while validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The default host is not a usable base URL.
    #[error("invalid default host: {0}")]
    InvalidDefaultHost(#[source] HostUrlError),

    /// A probe port entry could not be parsed.
    #[error("invalid probe port entry '{0}'")]
    InvalidProbePort(String),

    /// The probe settings do not form a valid plan.
    #[error("invalid probe settings: {0}")]
    Probe(#[from] DiscoveryDomainError),

    /// The match threshold is zero.
    #[error("match threshold must be at least 1")]
    ZeroMatchThreshold,

    /// The cache lifetime is zero.
    #[error("cache TTL must be at least one second")]
    ZeroCacheTtl,

    /// Static routing was requested without a catalog database.
    #[error("static routing requires WAYSTATION_DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Logging settings for subscriber installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Fallback filter directive.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

/// Validated router configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Host selector settings.
    pub selector: SelectorSettings,
    /// Discovery scan plan.
    pub probe_plan: ProbePlan,
    /// Snapshot lifetime.
    pub cache_ttl: Duration,
    /// Admin listen address.
    pub listen: SocketAddr,
    /// Catalog database URL.
    pub database_url: Option<String>,
    /// Logging settings.
    pub log: LogSettings,
}

impl RouterArgs {
    /// Validates the raw arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first invalid setting.
    pub fn into_config(self) -> Result<RouterConfig, ConfigError> {
        let default_host =
            HostUrl::parse(&self.default_host).map_err(ConfigError::InvalidDefaultHost)?;

        if self.match_min_shared_tokens == 0 {
            return Err(ConfigError::ZeroMatchThreshold);
        }
        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::ZeroCacheTtl);
        }

        let database_url = self
            .database_url
            .filter(|url| !url.trim().is_empty());
        if self.routing_mode == RoutingMode::Static && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let ports = match self.probe_ports.as_deref() {
            Some(spec) => ProbePorts::new(parse_port_list(spec)?)?,
            None => ProbePorts::default(),
        };
        let probe_plan = ProbePlan::new(
            self.probe_scheme,
            self.probe_host,
            ports,
            Duration::from_millis(self.probe_timeout_ms),
        )?;

        let selector = SelectorSettings::new(self.routing_mode, default_host)
            .with_match_policy(MatchPolicy::new(self.match_min_shared_tokens));

        Ok(RouterConfig {
            selector,
            probe_plan,
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            listen: self.listen,
            database_url,
            log: LogSettings {
                level: self.log_level,
                format: self.log_format,
            },
        })
    }
}

/// Parses `5002,5005-5020` style port lists.
fn parse_port_list(spec: &str) -> Result<Vec<u16>, ConfigError> {
    let mut ports = Vec::new();
    for raw in spec.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let invalid = || ConfigError::InvalidProbePort(raw.to_owned());
        if let Some((start, end)) = raw.split_once('-') {
            let first: u16 = start.trim().parse().map_err(|_| invalid())?;
            let last: u16 = end.trim().parse().map_err(|_| invalid())?;
            if first > last {
                return Err(invalid());
            }
            ports.extend(first..=last);
        } else {
            ports.push(raw.parse().map_err(|_| invalid())?);
        }
    }
    Ok(ports)
}
