//! Access policy that admits every caller to catalogued source sets.

use crate::host_catalog::{
    domain::{AccessContext, ModelId, SourceSetAccess, SourceSetName},
    ports::{AccessPolicyError, AccessPolicyResult, HostCatalogRepository, SourceAccessPolicy},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Treats every source set present in the catalog as public.
///
/// Used when no per-user grants are configured; unknown sets still report
/// [`SourceSetAccess::NotFound`].
pub struct CatalogAccessPolicy<R: HostCatalogRepository> {
    catalog: Arc<R>,
}

impl<R: HostCatalogRepository> CatalogAccessPolicy<R> {
    /// Creates a policy over `catalog`.
    #[must_use]
    pub const fn new(catalog: Arc<R>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl<R: HostCatalogRepository> SourceAccessPolicy for CatalogAccessPolicy<R> {
    async fn check(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
        _context: &AccessContext,
    ) -> AccessPolicyResult<SourceSetAccess> {
        let exists = self
            .catalog
            .source_set_exists(model_id, source_set)
            .await
            .map_err(AccessPolicyError::backend)?;
        Ok(if exists {
            SourceSetAccess::Granted
        } else {
            SourceSetAccess::NotFound
        })
    }
}
