//! Request handlers for the admin router.

use super::{AdminError, AdminState};
use crate::discovery::{domain::DiscoverySnapshot, ports::DiscoverySnapshots};
use crate::host_catalog::{
    domain::{AccessContext, ModelId, SourceSetName},
    ports::{HostCatalogRepository, SourceAccessPolicy},
};
use crate::host_url::HostUrl;
use crate::routing::domain::RoutingMode;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

/// The only action the discovery endpoint accepts.
pub const REFRESH_ACTION: &str = "refresh";

/// Body of a `POST` to the discovery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminCommand {
    /// Requested action.
    pub action: String,
}

/// Query string of the route preview endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteQuery {
    /// Requested model.
    pub model: String,
    /// Optional source set; previews are made as an anonymous caller.
    pub source_set: Option<String>,
    /// Preview a two-host selection.
    #[serde(default)]
    pub pair: bool,
}

/// Hosts a request would be routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePreview {
    /// Active routing mode.
    pub mode: RoutingMode,
    /// Selected hosts; two entries for pair previews.
    pub hosts: Vec<HostUrl>,
}

pub(super) async fn current_snapshot<S, R, A>(
    State(state): State<AdminState<S, R, A>>,
) -> Result<Json<DiscoverySnapshot>, AdminError>
where
    S: DiscoverySnapshots + 'static,
    R: HostCatalogRepository + 'static,
    A: SourceAccessPolicy + 'static,
{
    let snapshot = state.snapshots.snapshot().await?;
    Ok(Json(DiscoverySnapshot::clone(&snapshot)))
}

pub(super) async fn run_command<S, R, A>(
    State(state): State<AdminState<S, R, A>>,
    Json(command): Json<AdminCommand>,
) -> Result<Json<DiscoverySnapshot>, AdminError>
where
    S: DiscoverySnapshots + 'static,
    R: HostCatalogRepository + 'static,
    A: SourceAccessPolicy + 'static,
{
    if command.action != REFRESH_ACTION {
        return Err(AdminError::UnknownAction(command.action));
    }
    let snapshot = state.snapshots.refresh().await?;
    info!(servers = snapshot.len(), "discovery refreshed via admin endpoint");
    Ok(Json(DiscoverySnapshot::clone(&snapshot)))
}

pub(super) async fn preview_route<S, R, A>(
    State(state): State<AdminState<S, R, A>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RoutePreview>, AdminError>
where
    S: DiscoverySnapshots + 'static,
    R: HostCatalogRepository + 'static,
    A: SourceAccessPolicy + 'static,
{
    let model_id = ModelId::new(query.model)?;
    let source_set = query.source_set.map(SourceSetName::new).transpose()?;
    let context = AccessContext::anonymous();
    let selector = &state.selector;

    let hosts = match (source_set, query.pair) {
        (None, false) => vec![selector.select_host(&model_id).await?],
        (None, true) => {
            let (primary, secondary) = selector.select_host_pair(&model_id).await?.into_parts();
            vec![primary, secondary]
        }
        (Some(set), false) => {
            vec![selector.select_host_for_source_set(&model_id, &set, &context).await?]
        }
        (Some(set), true) => {
            let (primary, secondary) = selector
                .select_host_pair_for_source_set(&model_id, &set, &context)
                .await?
                .into_parts();
            vec![primary, secondary]
        }
    };

    Ok(Json(RoutePreview {
        mode: selector.mode(),
        hosts,
    }))
}

#[expect(
    clippy::unused_async,
    reason = "axum handlers are async functions"
)]
pub(super) async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
