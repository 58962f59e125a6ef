//! Host selection service.

mod selector;

pub use selector::{HostSelectionError, HostSelectionResult, HostSelector, SelectorSettings};
