//! Shared fixtures for `PostgreSQL` catalog tests.

pub use super::cluster::BoxError;
use super::cluster::{PostgresCluster, TemporaryDatabase, shared_cluster};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use rstest::fixture;
use uuid::Uuid;
use waystation::host_catalog::adapters::postgres::{HostCatalogPgPool, PostgresHostCatalog};

/// Schema for the catalog tables.
pub const CREATE_HOST_CATALOG_SQL: &str =
    include_str!("../../migrations/2026-09-01-000000_create_host_catalog/up.sql");

/// Template database holding the migrated schema.
pub const TEMPLATE_DB: &str = "waystation_test_template";

/// Repository over a throwaway database cloned from the template.
pub struct CatalogContext {
    /// Repository under test.
    pub repo: PostgresHostCatalog,
    /// Pool shared with the repository, for writing rows directly.
    pub pool: HostCatalogPgPool,
    /// Cloned database; dropped after the pool.
    pub temp_db: TemporaryDatabase,
}

/// Creates a migrated database and a repository over it.
///
/// Resolves to `Ok(None)` when no embedded cluster can be started here (no
/// download access, or root without `PG_EMBEDDED_WORKER`), so callers skip.
///
/// # Errors
///
/// Returns an error when the cluster is up but migration or database setup
/// fails.
#[fixture]
pub async fn catalog() -> Result<Option<CatalogContext>, BoxError> {
    let cluster = match shared_cluster() {
        Ok(cluster) => cluster,
        Err(reason) => {
            eprintln!("skipping PostgreSQL catalog test: {reason}");
            return Ok(None);
        }
    };
    tokio::task::spawn_blocking(move || prepare(cluster).map(Some))
        .await
        .map_err(|err| Box::new(err) as BoxError)?
}

fn prepare(cluster: PostgresCluster) -> Result<CatalogContext, BoxError> {
    cluster.ensure_template_exists(TEMPLATE_DB, apply_migrations)?;
    let temp_db = cluster
        .temporary_database_from_template(&format!("catalog_{}", Uuid::new_v4()), TEMPLATE_DB)?;

    let pool = Pool::builder()
        .max_size(2)
        .build(ConnectionManager::<PgConnection>::new(temp_db.url()))
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(CatalogContext {
        repo: PostgresHostCatalog::new(pool.clone()),
        pool,
        temp_db,
    })
}

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
    conn.batch_execute(CREATE_HOST_CATALOG_SQL)
        .map_err(|err| Box::new(err) as BoxError)
}

/// Runs raw SQL against the context database.
///
/// # Errors
///
/// Returns an error when no connection is available or the statement fails.
pub async fn execute_sql(pool: &HostCatalogPgPool, sql: &'static str) -> Result<(), BoxError> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get().map_err(|err| Box::new(err) as BoxError)?;
        conn.batch_execute(sql)
            .map_err(|err| Box::new(err) as BoxError)
    })
    .await
    .map_err(|err| Box::new(err) as BoxError)?
}
