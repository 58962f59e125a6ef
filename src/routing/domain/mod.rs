//! Routing mode and selection result types.

mod mode;
mod pair;

pub use mode::{RoutingMode, RoutingModeParseError};
pub use pair::HostPair;
