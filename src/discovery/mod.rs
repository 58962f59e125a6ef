//! Inference-server discovery and model matching.
//!
//! Probes a range of local ports for live model servers, keeps the latest
//! result in a time-limited cache, and matches requested model identifiers
//! against what the servers report about themselves. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
