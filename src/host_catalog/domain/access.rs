//! Access decisions for source-set scoped routing.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Who is asking for a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessContext {
    /// Acting user, if the request is authenticated.
    pub user: Option<UserId>,
}

impl AccessContext {
    /// Context for an unauthenticated request.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    /// Context for a request made by `user`.
    #[must_use]
    pub const fn for_user(user: UserId) -> Self {
        Self { user: Some(user) }
    }
}

/// Outcome of checking a (model, source set) pair for a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSetAccess {
    /// The pair exists and the caller may use it.
    Granted,
    /// The pair exists but the caller may not use it.
    Denied,
    /// No such source set exists for the model.
    NotFound,
}
