//! Waystation router daemon.
//!
//! Wires discovery, the host catalog, and the host selector together and
//! serves the admin HTTP surface until interrupted.

use anyhow::Context;
use clap::Parser;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use waystation::{
    admin,
    config::{LogFormat, LogSettings, RouterArgs, RouterConfig},
    discovery::{
        adapters::ReqwestHealthEndpoint,
        services::{DiscoveryCache, PortScanProber},
    },
    host_catalog::{
        adapters::{CatalogAccessPolicy, memory::InMemoryHostCatalog, postgres::PostgresHostCatalog},
        ports::HostCatalogRepository,
    },
    routing::services::HostSelector,
};

type Snapshots = DiscoveryCache<PortScanProber<ReqwestHealthEndpoint>, DefaultClock>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        return Err(err).context("failed to load .env file");
    }

    let config = RouterArgs::parse()
        .into_config()
        .context("invalid configuration")?;
    init_tracing(&config.log);

    let endpoint = Arc::new(ReqwestHealthEndpoint::new());
    let prober = PortScanProber::new(endpoint, config.probe_plan.clone())
        .context("invalid probe plan")?;
    let snapshots: Arc<Snapshots> = Arc::new(DiscoveryCache::new(
        Arc::new(prober),
        Arc::new(DefaultClock),
        config.cache_ttl,
    ));

    let Some(database_url) = config.database_url.as_deref() else {
        return serve(&config, snapshots, Arc::new(InMemoryHostCatalog::new())).await;
    };
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .build(manager)
        .context("failed to connect to the host catalog database")?;
    serve(&config, snapshots, Arc::new(PostgresHostCatalog::new(pool))).await
}

async fn serve<R>(
    config: &RouterConfig,
    snapshots: Arc<Snapshots>,
    catalog: Arc<R>,
) -> anyhow::Result<()>
where
    R: HostCatalogRepository + 'static,
{
    let access = Arc::new(CatalogAccessPolicy::new(Arc::clone(&catalog)));
    let selector = Arc::new(HostSelector::new(
        config.selector.clone(),
        Arc::clone(&snapshots),
        catalog,
        access,
    ));
    info!(
        mode = %selector.mode(),
        default_host = %selector.default_host(),
        ports = config.probe_plan.ports().len(),
        "host selector ready"
    );

    let app = admin::router(snapshots, selector);
    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!(listen = %config.listen, "admin surface listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("admin server failed")
}

fn init_tracing(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("waystation={}", settings.level)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match settings.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
