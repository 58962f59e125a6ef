//! Shared world state for host selection BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::MockClock;
use rstest::fixture;
use waystation::{
    discovery::{
        adapters::InMemoryHealthEndpoint,
        domain::ProbePlan,
        services::{DEFAULT_CACHE_TTL, DiscoveryCache, PortScanProber},
    },
    host_catalog::{
        adapters::memory::{InMemoryHostCatalog, InMemorySourceAccessPolicy},
        services::HostCatalogService,
    },
    host_url::HostUrl,
    routing::{
        domain::{HostPair, RoutingMode},
        services::{HostSelectionError, HostSelector, SelectorSettings},
    },
};

/// Snapshot source used by the BDD world.
pub type TestSnapshots = DiscoveryCache<PortScanProber<InMemoryHealthEndpoint>, MockClock>;

/// Selector type used by the BDD world.
pub type TestSelector =
    HostSelector<TestSnapshots, InMemoryHostCatalog, InMemorySourceAccessPolicy>;

/// Scenario world for host selection behaviour tests.
pub struct SelectionWorld {
    /// Routing mode under test.
    pub mode: RoutingMode,
    /// Scripted health endpoint for dynamic discovery.
    pub endpoint: Arc<InMemoryHealthEndpoint>,
    /// Catalog repository for static routing.
    pub catalog: Arc<InMemoryHostCatalog>,
    /// Access policy for source-set lookups.
    pub access: Arc<InMemorySourceAccessPolicy>,
    /// Registration service over the catalog.
    pub service: HostCatalogService<InMemoryHostCatalog, MockClock>,
    /// Clock shared by the cache and the service.
    pub clock: Arc<MockClock>,
    /// Hosts registered in the catalog during the scenario.
    pub catalogued_hosts: Vec<HostUrl>,
    /// Result of the last single-host selection.
    pub last_single: Option<Result<HostUrl, HostSelectionError>>,
    /// Result of the last pair selection.
    pub last_pair: Option<Result<HostPair, HostSelectionError>>,
}

impl SelectionWorld {
    /// Creates a world in dynamic mode with nothing discovered or catalogued.
    #[must_use]
    pub fn new() -> Self {
        let clock = frozen_clock();
        let catalog = Arc::new(InMemoryHostCatalog::new());
        let service = HostCatalogService::new(Arc::clone(&catalog), Arc::clone(&clock));
        Self {
            mode: RoutingMode::Dynamic,
            endpoint: Arc::new(InMemoryHealthEndpoint::new()),
            catalog,
            access: Arc::new(InMemorySourceAccessPolicy::new()),
            service,
            clock,
            catalogued_hosts: Vec::new(),
            last_single: None,
            last_pair: None,
        }
    }

    /// Builds a selector over the current world state.
    ///
    /// # Errors
    ///
    /// Returns an error when the probe plan or default host is rejected.
    pub fn selector(&self) -> Result<TestSelector, eyre::Report> {
        let prober = PortScanProber::new(Arc::clone(&self.endpoint), ProbePlan::default())
            .map_err(|err| eyre::eyre!("probe plan rejected: {err}"))?;
        let cache = DiscoveryCache::new(
            Arc::new(prober),
            Arc::clone(&self.clock),
            DEFAULT_CACHE_TTL,
        );
        let default_host = HostUrl::parse("http://localhost:5002")
            .map_err(|err| eyre::eyre!("default host rejected: {err}"))?;
        Ok(HostSelector::new(
            SelectorSettings::new(self.mode, default_host),
            Arc::new(cache),
            Arc::clone(&self.catalog),
            Arc::clone(&self.access),
        )
        .with_seed(42))
    }
}

impl Default for SelectionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock pinned to the Unix epoch.
fn frozen_clock() -> Arc<MockClock> {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(DateTime::<Utc>::UNIX_EPOCH);
    Arc::new(clock)
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SelectionWorld {
    SelectionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
