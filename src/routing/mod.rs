//! Backend host selection for model requests.
//!
//! A [`services::HostSelector`] answers "which backend should serve this
//! model?" either by consulting local discovery or the persistent host
//! catalog, depending on the process-wide [`domain::RoutingMode`].

pub mod domain;
pub mod services;
