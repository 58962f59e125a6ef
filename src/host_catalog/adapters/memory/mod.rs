//! In-memory adapters for the host catalog.

mod access;
mod repository;

pub use access::InMemorySourceAccessPolicy;
pub use repository::InMemoryHostCatalog;
