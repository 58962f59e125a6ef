//! Time-limited cache over discovery scans.

use crate::discovery::{
    domain::DiscoverySnapshot,
    ports::{DiscoveryError, DiscoveryProber, DiscoveryResult, DiscoverySnapshots},
};
use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info};

/// Default lifetime of a cached snapshot.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Holds the latest discovery snapshot and re-probes when it goes stale.
///
/// A snapshot is served from cache only while it is younger than the TTL and
/// lists at least one server; otherwise the prober runs and its result,
/// empty or not, replaces the cached value whole. Concurrent readers that all
/// observe a stale snapshot each run their own scan and the last writer wins.
pub struct DiscoveryCache<P, C>
where
    P: DiscoveryProber,
    C: Clock + Send + Sync,
{
    prober: Arc<P>,
    clock: Arc<C>,
    ttl: TimeDelta,
    current: RwLock<Arc<DiscoverySnapshot>>,
}

impl<P, C> DiscoveryCache<P, C>
where
    P: DiscoveryProber,
    C: Clock + Send + Sync,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new(prober: Arc<P>, clock: Arc<C>, ttl: Duration) -> Self {
        Self {
            prober,
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            current: RwLock::new(Arc::new(DiscoverySnapshot::empty())),
        }
    }

    /// Returns the configured TTL.
    #[must_use]
    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    fn cached(&self) -> DiscoveryResult<Arc<DiscoverySnapshot>> {
        self.current
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|err| DiscoveryError::StatePoisoned(err.to_string()))
    }

    fn replace(&self, snapshot: Arc<DiscoverySnapshot>) -> DiscoveryResult<()> {
        let mut guard = self
            .current
            .write()
            .map_err(|err| DiscoveryError::StatePoisoned(err.to_string()))?;
        *guard = snapshot;
        Ok(())
    }

    fn is_fresh(&self, snapshot: &DiscoverySnapshot) -> bool {
        let age = self.clock.utc().signed_duration_since(snapshot.timestamp());
        !snapshot.is_empty() && age < self.ttl
    }
}

#[async_trait]
impl<P, C> DiscoverySnapshots for DiscoveryCache<P, C>
where
    P: DiscoveryProber,
    C: Clock + Send + Sync,
{
    async fn snapshot(&self) -> DiscoveryResult<Arc<DiscoverySnapshot>> {
        let cached = self.cached()?;
        if self.is_fresh(&cached) {
            debug!(servers = cached.len(), "serving cached discovery snapshot");
            return Ok(cached);
        }

        let servers = self.prober.probe().await;
        let fresh = Arc::new(DiscoverySnapshot::new(servers, self.clock.utc()));
        self.replace(Arc::clone(&fresh))?;
        info!(
            servers = fresh.len(),
            timestamp = %fresh.timestamp(),
            "discovery snapshot replaced"
        );
        Ok(fresh)
    }

    fn invalidate(&self) -> DiscoveryResult<()> {
        self.replace(Arc::new(DiscoverySnapshot::empty()))?;
        debug!("discovery snapshot invalidated");
        Ok(())
    }
}
