//! Authorisation port for source-set scoped routing.

use crate::host_catalog::domain::{AccessContext, ModelId, SourceSetAccess, SourceSetName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for access policy checks.
pub type AccessPolicyResult<T> = Result<T, AccessPolicyError>;

/// Decides whether a caller may route to a (model, source set) pair.
#[async_trait]
pub trait SourceAccessPolicy: Send + Sync {
    /// Checks access for `context`.
    ///
    /// Returns [`SourceSetAccess::NotFound`] when the pair does not exist,
    /// whoever is asking.
    async fn check(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
        context: &AccessContext,
    ) -> AccessPolicyResult<SourceSetAccess>;
}

/// Errors returned by access policy implementations.
#[derive(Debug, Clone, Error)]
pub enum AccessPolicyError {
    /// The policy backend could not answer.
    #[error("access policy backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl AccessPolicyError {
    /// Wraps a backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
