//! Port contracts for catalog persistence and source-set authorisation.

mod access;
mod repository;

pub use access::{AccessPolicyError, AccessPolicyResult, SourceAccessPolicy};
pub use repository::{HostCatalogError, HostCatalogRepository, HostCatalogResult};
