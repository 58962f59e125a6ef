//! Domain model for inference-server discovery.
//!
//! Covers the probe plan (which ports to scan and how), the typed `/health`
//! contract, the descriptors and snapshots a scan produces, and the name
//! normalisation used by the matcher.

mod descriptor;
mod error;
mod health;
mod normalize;
mod probe_plan;

pub use descriptor::{DiscoverySnapshot, ServerDescriptor, UNKNOWN_MODEL};
pub use error::DiscoveryDomainError;
pub use health::HealthReport;
pub use normalize::{model_tokens, normalize_model_name};
pub use probe_plan::{
    DEFAULT_PROBE_HOST, DEFAULT_PROBE_SCHEME, DEFAULT_PROBE_TIMEOUT, HEALTH_PATH, ProbePlan,
    ProbePorts, RESERVED_PORTS,
};
