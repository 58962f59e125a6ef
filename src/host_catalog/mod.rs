//! Persistent catalog of inference hosts registered against data sources.
//!
//! Static routing consults this catalog instead of probing. A source belongs
//! to one model and one named source set; hosts attach to sources
//! many-to-many. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
