//! Layered model-identifier matching against a discovery snapshot.

use crate::discovery::domain::{
    DiscoverySnapshot, ServerDescriptor, model_tokens, normalize_model_name,
};
use crate::host_url::HostUrl;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Default number of shared tokens the partial strategy requires.
pub const DEFAULT_MIN_SHARED_TOKENS: usize = 2;

/// Tunables for the fuzzy strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Distinct tokens two names must share for a partial match.
    pub min_shared_tokens: usize,
}

impl MatchPolicy {
    /// Creates a policy with the given shared-token threshold.
    #[must_use]
    pub const fn new(min_shared_tokens: usize) -> Self {
        Self { min_shared_tokens }
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SHARED_TOKENS)
    }
}

/// Strategy that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Identifiers are byte-for-byte equal.
    Exact,
    /// Identifiers are equal after normalisation.
    Normalized,
    /// Core tokens agree and enough tokens are shared.
    SharedTokens,
    /// Nothing matched; first healthy server chosen.
    Fallback,
}

impl MatchStrategy {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Normalized => "normalized",
            Self::SharedTokens => "shared_tokens",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Server chosen for a requested model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMatch {
    base_url: HostUrl,
    model_id: String,
    strategy: MatchStrategy,
}

impl ModelMatch {
    fn from_descriptor(descriptor: &ServerDescriptor, strategy: MatchStrategy) -> Self {
        Self {
            base_url: descriptor.base_url().clone(),
            model_id: descriptor.model_id().to_owned(),
            strategy,
        }
    }

    /// Returns the chosen server's base URL.
    #[must_use]
    pub const fn base_url(&self) -> &HostUrl {
        &self.base_url
    }

    /// Returns the model identifier the chosen server reported.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Returns the strategy that selected the server.
    #[must_use]
    pub const fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Consumes the match, returning the base URL.
    #[must_use]
    pub fn into_base_url(self) -> HostUrl {
        self.base_url
    }
}

/// Picks the best server for a model identifier.
///
/// Strategies run in order and the first hit wins: exact, normalised,
/// shared tokens, then any healthy server. Only healthy descriptors are
/// considered, so the result is empty exactly when no server is healthy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelMatcher {
    policy: MatchPolicy,
}

impl ModelMatcher {
    /// Creates a matcher with the given policy.
    #[must_use]
    pub const fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Finds the best server for `requested`.
    #[must_use]
    pub fn best_match(&self, requested: &str, snapshot: &DiscoverySnapshot) -> Option<ModelMatch> {
        let found = self
            .exact(requested, snapshot)
            .or_else(|| self.normalized(requested, snapshot))
            .or_else(|| self.shared_tokens(requested, snapshot))
            .or_else(|| {
                snapshot
                    .healthy()
                    .next()
                    .map(|server| ModelMatch::from_descriptor(server, MatchStrategy::Fallback))
            });

        match &found {
            Some(hit) => debug!(
                requested,
                matched = hit.model_id(),
                strategy = %hit.strategy(),
                base_url = %hit.base_url(),
                "model matched"
            ),
            None => debug!(requested, "no healthy server to match"),
        }
        found
    }

    /// Finds the best server for `requested` and returns only its URL.
    #[must_use]
    pub fn match_url(&self, requested: &str, snapshot: &DiscoverySnapshot) -> Option<HostUrl> {
        self.best_match(requested, snapshot).map(ModelMatch::into_base_url)
    }

    #[expect(
        clippy::unused_self,
        reason = "strategies share one signature so they chain uniformly"
    )]
    fn exact(&self, requested: &str, snapshot: &DiscoverySnapshot) -> Option<ModelMatch> {
        snapshot
            .healthy()
            .find(|server| server.model_id() == requested)
            .map(|server| ModelMatch::from_descriptor(server, MatchStrategy::Exact))
    }

    #[expect(
        clippy::unused_self,
        reason = "strategies share one signature so they chain uniformly"
    )]
    fn normalized(&self, requested: &str, snapshot: &DiscoverySnapshot) -> Option<ModelMatch> {
        let wanted = normalize_model_name(requested);
        if wanted.is_empty() {
            return None;
        }
        snapshot
            .healthy()
            .find(|server| normalize_model_name(server.model_id()) == wanted)
            .map(|server| ModelMatch::from_descriptor(server, MatchStrategy::Normalized))
    }

    fn shared_tokens(&self, requested: &str, snapshot: &DiscoverySnapshot) -> Option<ModelMatch> {
        let wanted = model_tokens(requested);
        let wanted_core = wanted.first()?;
        let wanted_set: HashSet<&str> = wanted.iter().map(String::as_str).collect();

        snapshot
            .healthy()
            .find(|server| {
                let offered = model_tokens(server.model_id());
                if offered.first() != Some(wanted_core) {
                    return false;
                }
                let offered_set: HashSet<&str> = offered.iter().map(String::as_str).collect();
                wanted_set.intersection(&offered_set).count() >= self.policy.min_shared_tokens
            })
            .map(|server| ModelMatch::from_descriptor(server, MatchStrategy::SharedTokens))
    }
}
