//! Application services for catalog registration.

mod registry;

pub use registry::{
    HostCatalogService, HostCatalogServiceError, HostCatalogServiceResult, RegisterSourceRequest,
};
