//! Port contracts for discovery probing and snapshot caching.

mod health;
mod prober;
mod snapshots;

#[cfg(test)]
pub use prober::MockDiscoveryProber;

pub use health::{HealthEndpoint, HealthEndpointError, HealthEndpointResult};
pub use prober::DiscoveryProber;
pub use snapshots::{DiscoveryError, DiscoveryResult, DiscoverySnapshots};
