//! In-memory source-set access policy.

use crate::host_catalog::{
    domain::{AccessContext, ModelId, SourceSetAccess, SourceSetName, UserId},
    ports::{AccessPolicyError, AccessPolicyResult, SourceAccessPolicy},
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

type SourceSetKey = (ModelId, SourceSetName);

/// Access policy backed by an in-memory table of source sets.
///
/// Public sets admit everyone, including anonymous callers. Private sets
/// admit only users holding an explicit grant.
#[derive(Debug, Clone, Default)]
pub struct InMemorySourceAccessPolicy {
    state: Arc<RwLock<HashMap<SourceSetKey, SourceSetVisibility>>>,
}

#[derive(Debug, Clone, Default)]
struct SourceSetVisibility {
    public: bool,
    grants: HashSet<UserId>,
}

impl InMemorySourceAccessPolicy {
    /// Creates a policy that knows no source sets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a source set visible to every caller.
    ///
    /// # Errors
    ///
    /// Returns [`AccessPolicyError::Backend`] when the state lock is poisoned.
    pub fn add_public_set(
        &self,
        model_id: ModelId,
        source_set: SourceSetName,
    ) -> AccessPolicyResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.entry((model_id, source_set)).or_default().public = true;
        Ok(())
    }

    /// Declares a private source set, or keeps an existing one as is.
    ///
    /// # Errors
    ///
    /// Returns [`AccessPolicyError::Backend`] when the state lock is poisoned.
    pub fn add_private_set(
        &self,
        model_id: ModelId,
        source_set: SourceSetName,
    ) -> AccessPolicyResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.entry((model_id, source_set)).or_default();
        Ok(())
    }

    /// Grants `user` access to a source set, declaring it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AccessPolicyError::Backend`] when the state lock is poisoned.
    pub fn grant(
        &self,
        model_id: ModelId,
        source_set: SourceSetName,
        user: UserId,
    ) -> AccessPolicyResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .entry((model_id, source_set))
            .or_default()
            .grants
            .insert(user);
        Ok(())
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> AccessPolicyError {
    AccessPolicyError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SourceAccessPolicy for InMemorySourceAccessPolicy {
    async fn check(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
        context: &AccessContext,
    ) -> AccessPolicyResult<SourceSetAccess> {
        let state = self.state.read().map_err(poisoned)?;
        let key = (model_id.clone(), source_set.clone());
        let Some(visibility) = state.get(&key) else {
            return Ok(SourceSetAccess::NotFound);
        };

        let allowed = visibility.public
            || context
                .user
                .is_some_and(|user| visibility.grants.contains(&user));
        Ok(if allowed {
            SourceSetAccess::Granted
        } else {
            SourceSetAccess::Denied
        })
    }
}
