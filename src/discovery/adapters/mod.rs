//! Adapter implementations for discovery ports.

pub mod http;
pub mod memory;

pub use http::ReqwestHealthEndpoint;
pub use memory::{InMemoryHealthEndpoint, ScriptedHealth};
