//! `PostgreSQL` adapter for host catalog persistence.

mod models;
mod repository;
mod schema;

pub use repository::{HostCatalogPgPool, PostgresHostCatalog};
