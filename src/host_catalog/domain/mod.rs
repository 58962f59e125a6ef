//! Domain model for the host catalog.
//!
//! Sources, source sets, and the host entries attached to them. Persistence
//! and authorisation live behind the ports in [`crate::host_catalog::ports`].

mod access;
mod error;
mod ids;
mod source;

pub use access::{AccessContext, SourceSetAccess};
pub use error::HostCatalogDomainError;
pub use ids::{ModelId, SourceId, SourceSetName, UserId};
pub use source::{HostCatalogEntry, PersistedSourceData, Source};
