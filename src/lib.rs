//! Waystation: model-aware routing of inference requests.
//!
//! Given a model identifier, Waystation decides which backend inference host
//! should serve it. Hosts come from one of two places, chosen once at start
//! up:
//!
//! - **Dynamic discovery**: a port scan of local inference servers, cached
//!   for a short TTL and matched against the requested model with layered
//!   exact, normalised, and token-overlap strategies.
//! - **Static catalog**: a persistent catalog of hosts registered against
//!   data sources, with random selection among candidates.
//!
//! # Architecture
//!
//! Waystation follows hexagonal architecture principles:
//!
//! - **Domain**: Pure values with no infrastructure dependencies
//! - **Ports**: Trait interfaces for probing, caching, persistence, access
//! - **Adapters**: Concrete implementations (reqwest, `PostgreSQL`, memory)
//!
//! # Modules
//!
//! - [`discovery`]: Port scanning, snapshot caching, model matching
//! - [`host_catalog`]: Sources, source sets, and their registered hosts
//! - [`routing`]: The host selector that ties both together
//! - [`admin`]: HTTP surface for discovery inspection and refresh
//! - [`config`]: Command-line and environment configuration

pub mod admin;
pub mod config;
pub mod discovery;
pub mod host_catalog;
pub mod host_url;
pub mod routing;
