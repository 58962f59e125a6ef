//! Step definitions for host selection BDD scenarios.

mod given;
mod when;
pub mod world;
