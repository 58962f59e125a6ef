//! Adapter implementations for the host catalog ports.

pub mod memory;
pub mod postgres;

mod catalog_access;

pub use catalog_access::CatalogAccessPolicy;
