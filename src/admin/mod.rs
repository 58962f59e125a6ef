//! Admin HTTP surface for inspecting discovery and previewing routes.
//!
//! - `GET /admin/discovery` returns the current snapshot, probing when the
//!   cache is stale.
//! - `POST /admin/discovery` with `{"action":"refresh"}` forces a new scan.
//! - `GET /admin/route?model=..` shows which host(s) a request would use.
//! - `GET /healthz` reports router liveness.

mod error;
mod handlers;

pub use error::AdminError;
pub use handlers::{AdminCommand, REFRESH_ACTION, RoutePreview, RouteQuery};

use crate::discovery::ports::DiscoverySnapshots;
use crate::host_catalog::ports::{HostCatalogRepository, SourceAccessPolicy};
use crate::routing::services::HostSelector;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Path of the discovery admin endpoint.
pub const DISCOVERY_PATH: &str = "/admin/discovery";

/// Path of the route preview endpoint.
pub const ROUTE_PATH: &str = "/admin/route";

/// Path of the liveness endpoint.
pub const HEALTHZ_PATH: &str = "/healthz";

/// Shared state for admin handlers.
pub struct AdminState<S, R, A>
where
    S: DiscoverySnapshots,
    R: HostCatalogRepository,
    A: SourceAccessPolicy,
{
    snapshots: Arc<S>,
    selector: Arc<HostSelector<S, R, A>>,
}

impl<S, R, A> Clone for AdminState<S, R, A>
where
    S: DiscoverySnapshots,
    R: HostCatalogRepository,
    A: SourceAccessPolicy,
{
    fn clone(&self) -> Self {
        Self {
            snapshots: Arc::clone(&self.snapshots),
            selector: Arc::clone(&self.selector),
        }
    }
}

/// Builds the admin router.
///
/// `snapshots` should be the same source the selector reads so a refresh is
/// visible to route previews.
#[must_use]
pub fn router<S, R, A>(snapshots: Arc<S>, selector: Arc<HostSelector<S, R, A>>) -> Router
where
    S: DiscoverySnapshots + 'static,
    R: HostCatalogRepository + 'static,
    A: SourceAccessPolicy + 'static,
{
    Router::new()
        .route(
            DISCOVERY_PATH,
            get(handlers::current_snapshot::<S, R, A>).post(handlers::run_command::<S, R, A>),
        )
        .route(ROUTE_PATH, get(handlers::preview_route::<S, R, A>))
        .route(HEALTHZ_PATH, get(handlers::healthz))
        .with_state(AdminState {
            snapshots,
            selector,
        })
}
