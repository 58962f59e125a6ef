//! Chooses backend hosts for model requests.

use crate::discovery::{
    ports::{DiscoveryError, DiscoverySnapshots},
    services::{MatchPolicy, ModelMatcher},
};
use crate::host_catalog::{
    domain::{AccessContext, ModelId, SourceId, SourceSetAccess, SourceSetName},
    ports::{AccessPolicyError, HostCatalogError, HostCatalogRepository, SourceAccessPolicy},
};
use crate::host_url::HostUrl;
use crate::routing::domain::{HostPair, RoutingMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors returned by host selection.
#[derive(Debug, Error)]
pub enum HostSelectionError {
    /// The caller may not use the requested source set.
    #[error("not authorised for source set '{source_set}' of model '{model_id}'")]
    NotAuthorized {
        /// Requested model.
        model_id: ModelId,
        /// Requested source set.
        source_set: SourceSetName,
    },
    /// The model has no such source set.
    #[error("source set '{source_set}' not found for model '{model_id}'")]
    SourceSetNotFound {
        /// Requested model.
        model_id: ModelId,
        /// Requested source set.
        source_set: SourceSetName,
    },
    /// The catalog has no such source.
    #[error("source not found: {0}")]
    SourceNotFound(SourceId),
    /// The catalog lists no hosts for the request.
    #[error("no hosts available for model '{0}'")]
    NoHosts(ModelId),
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] HostCatalogError),
    /// Access check failed.
    #[error(transparent)]
    Access(#[from] AccessPolicyError),
    /// Discovery snapshot could not be read.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

/// Result type for host selection.
pub type HostSelectionResult<T> = Result<T, HostSelectionError>;

/// Start-up settings for a [`HostSelector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSettings {
    /// Where hosts come from.
    pub mode: RoutingMode,
    /// Host returned by dynamic lookups when nothing matches.
    pub default_host: HostUrl,
    /// Matching tunables for dynamic lookups.
    pub match_policy: MatchPolicy,
}

impl SelectorSettings {
    /// Creates settings with the default match policy.
    #[must_use]
    pub fn new(mode: RoutingMode, default_host: HostUrl) -> Self {
        Self {
            mode,
            default_host,
            match_policy: MatchPolicy::default(),
        }
    }

    /// Replaces the match policy.
    #[must_use]
    pub const fn with_match_policy(mut self, match_policy: MatchPolicy) -> Self {
        self.match_policy = match_policy;
        self
    }
}

/// Picks one or two backend hosts for a model.
///
/// In dynamic mode every operation resolves a single host through the
/// discovery snapshot and the matcher, falling back to the default host when
/// nothing healthy matches. In static mode hosts come from the catalog:
/// model-wide single lookups are deterministic, all others pick uniformly at
/// random from the de-duplicated candidates.
///
/// Source-set scoped operations check access first in both modes.
pub struct HostSelector<S, R, A>
where
    S: DiscoverySnapshots,
    R: HostCatalogRepository,
    A: SourceAccessPolicy,
{
    mode: RoutingMode,
    default_host: HostUrl,
    matcher: ModelMatcher,
    snapshots: Arc<S>,
    catalog: Arc<R>,
    access: Arc<A>,
    rng: Mutex<StdRng>,
}

impl<S, R, A> HostSelector<S, R, A>
where
    S: DiscoverySnapshots,
    R: HostCatalogRepository,
    A: SourceAccessPolicy,
{
    /// Creates a selector seeded from the operating system.
    #[must_use]
    pub fn new(
        settings: SelectorSettings,
        snapshots: Arc<S>,
        catalog: Arc<R>,
        access: Arc<A>,
    ) -> Self {
        Self {
            mode: settings.mode,
            default_host: settings.default_host,
            matcher: ModelMatcher::new(settings.match_policy),
            snapshots,
            catalog,
            access,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reseeds the random source so picks are reproducible.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Returns the routing mode.
    #[must_use]
    pub const fn mode(&self) -> RoutingMode {
        self.mode
    }

    /// Returns the dynamic-mode fallback host.
    #[must_use]
    pub const fn default_host(&self) -> &HostUrl {
        &self.default_host
    }

    /// Selects one host for `model_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HostSelectionError::NoHosts`] in static mode when the model
    /// has no hosts, or a wrapped lookup failure.
    pub async fn select_host(&self, model_id: &ModelId) -> HostSelectionResult<HostUrl> {
        match self.mode {
            RoutingMode::Dynamic => self.resolve_dynamic(model_id).await,
            RoutingMode::Static => {
                let hosts = distinct(self.catalog.hosts_for_model(model_id).await?);
                let host = hosts
                    .into_iter()
                    .next()
                    .ok_or_else(|| HostSelectionError::NoHosts(model_id.clone()))?;
                debug!(%model_id, %host, "static host selected");
                Ok(host)
            }
        }
    }

    /// Selects one host for `model_id` within a source set.
    ///
    /// # Errors
    ///
    /// Returns [`HostSelectionError::NotAuthorized`] or
    /// [`HostSelectionError::SourceSetNotFound`] when the access check fails,
    /// [`HostSelectionError::NoHosts`] in static mode when the set has no
    /// hosts, or a wrapped lookup failure.
    pub async fn select_host_for_source_set(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
        context: &AccessContext,
    ) -> HostSelectionResult<HostUrl> {
        self.authorize(model_id, source_set, context).await?;
        match self.mode {
            RoutingMode::Dynamic => self.resolve_dynamic(model_id).await,
            RoutingMode::Static => {
                let hosts = self.catalog.hosts_for_source_set(model_id, source_set).await?;
                self.pick_one(model_id, distinct(hosts))
            }
        }
    }

    /// Selects one host for `model_id` from a specific source.
    ///
    /// # Errors
    ///
    /// Returns [`HostSelectionError::SourceNotFound`] in static mode when the
    /// catalog does not know the source, [`HostSelectionError::NoHosts`] when
    /// it has no hosts, or a wrapped lookup failure.
    pub async fn select_host_for_source(
        &self,
        model_id: &ModelId,
        source_id: SourceId,
    ) -> HostSelectionResult<HostUrl> {
        match self.mode {
            RoutingMode::Dynamic => self.resolve_dynamic(model_id).await,
            RoutingMode::Static => {
                let hosts = self
                    .catalog
                    .hosts_for_source(source_id)
                    .await?
                    .ok_or(HostSelectionError::SourceNotFound(source_id))?;
                self.pick_one(model_id, distinct(hosts))
            }
        }
    }

    /// Selects two hosts for `model_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HostSelectionError::NoHosts`] in static mode when the model
    /// has no hosts, or a wrapped lookup failure.
    pub async fn select_host_pair(&self, model_id: &ModelId) -> HostSelectionResult<HostPair> {
        match self.mode {
            RoutingMode::Dynamic => Ok(HostPair::repeated(self.resolve_dynamic(model_id).await?)),
            RoutingMode::Static => {
                let hosts = self.catalog.hosts_for_model(model_id).await?;
                self.pick_pair(model_id, distinct(hosts))
            }
        }
    }

    /// Selects two hosts for `model_id` within a source set.
    ///
    /// # Errors
    ///
    /// Returns [`HostSelectionError::NotAuthorized`] or
    /// [`HostSelectionError::SourceSetNotFound`] when the access check fails,
    /// [`HostSelectionError::NoHosts`] in static mode when the set has no
    /// hosts, or a wrapped lookup failure.
    pub async fn select_host_pair_for_source_set(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
        context: &AccessContext,
    ) -> HostSelectionResult<HostPair> {
        self.authorize(model_id, source_set, context).await?;
        match self.mode {
            RoutingMode::Dynamic => Ok(HostPair::repeated(self.resolve_dynamic(model_id).await?)),
            RoutingMode::Static => {
                let hosts = self.catalog.hosts_for_source_set(model_id, source_set).await?;
                self.pick_pair(model_id, distinct(hosts))
            }
        }
    }

    async fn authorize(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
        context: &AccessContext,
    ) -> HostSelectionResult<()> {
        match self.access.check(model_id, source_set, context).await? {
            SourceSetAccess::Granted => Ok(()),
            SourceSetAccess::Denied => {
                info!(%model_id, %source_set, user = ?context.user, "source set access denied");
                Err(HostSelectionError::NotAuthorized {
                    model_id: model_id.clone(),
                    source_set: source_set.clone(),
                })
            }
            SourceSetAccess::NotFound => Err(HostSelectionError::SourceSetNotFound {
                model_id: model_id.clone(),
                source_set: source_set.clone(),
            }),
        }
    }

    async fn resolve_dynamic(&self, model_id: &ModelId) -> HostSelectionResult<HostUrl> {
        let snapshot = self.snapshots.snapshot().await?;
        if let Some(url) = self.matcher.match_url(model_id.as_str(), &snapshot) {
            return Ok(url);
        }
        warn!(
            %model_id,
            default_host = %self.default_host,
            "no discovered server matched, using default host"
        );
        Ok(self.default_host.clone())
    }

    fn pick_one(&self, model_id: &ModelId, hosts: Vec<HostUrl>) -> HostSelectionResult<HostUrl> {
        if hosts.is_empty() {
            return Err(HostSelectionError::NoHosts(model_id.clone()));
        }
        let index = self.with_rng(|rng| rng.gen_range(0..hosts.len()));
        let host = hosts
            .into_iter()
            .nth(index)
            .ok_or_else(|| HostSelectionError::NoHosts(model_id.clone()))?;
        debug!(%model_id, %host, "static host selected");
        Ok(host)
    }

    fn pick_pair(&self, model_id: &ModelId, hosts: Vec<HostUrl>) -> HostSelectionResult<HostPair> {
        let count = hosts.len();
        let pair = match hosts.as_slice() {
            [] => return Err(HostSelectionError::NoHosts(model_id.clone())),
            [only] => HostPair::repeated(only.clone()),
            _ => {
                let (first_index, second_index) = self.with_rng(|rng| {
                    let first = rng.gen_range(0..count);
                    let mut second = rng.gen_range(0..count);
                    while second == first {
                        second = rng.gen_range(0..count);
                    }
                    (first, second)
                });
                match (hosts.get(first_index), hosts.get(second_index)) {
                    (Some(primary), Some(secondary)) => {
                        HostPair::new(primary.clone(), secondary.clone())
                    }
                    _ => return Err(HostSelectionError::NoHosts(model_id.clone())),
                }
            }
        };
        debug!(
            %model_id,
            primary = %pair.primary(),
            secondary = %pair.secondary(),
            candidates = count,
            "static host pair selected"
        );
        Ok(pair)
    }

    fn with_rng<T>(&self, pick: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pick(&mut rng)
    }
}

/// Drops repeated hosts, keeping first-seen order.
fn distinct(hosts: Vec<HostUrl>) -> Vec<HostUrl> {
    let mut seen = HashSet::new();
    hosts
        .into_iter()
        .filter(|host| seen.insert(host.clone()))
        .collect()
}
