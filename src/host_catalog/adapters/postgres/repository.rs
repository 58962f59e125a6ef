//! `PostgreSQL` repository implementation for the host catalog.

use super::{
    models::{NewSourceHostRow, NewSourceRow, SourceRow},
    schema::{source_hosts, sources},
};
use crate::host_catalog::{
    domain::{HostCatalogEntry, ModelId, PersistedSourceData, Source, SourceId, SourceSetName},
    ports::{HostCatalogError, HostCatalogRepository, HostCatalogResult},
};
use crate::host_url::HostUrl;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type for host catalog adapters.
pub type HostCatalogPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed host catalog.
#[derive(Debug, Clone)]
pub struct PostgresHostCatalog {
    pool: HostCatalogPgPool,
}

impl PostgresHostCatalog {
    /// Creates a new repository from a `PostgreSQL` pool.
    #[must_use]
    pub const fn new(pool: HostCatalogPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, operation: F) -> HostCatalogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> HostCatalogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(HostCatalogError::persistence)?;
            operation(&mut connection)
        })
        .await
        .map_err(HostCatalogError::persistence)?
    }
}

#[async_trait]
impl HostCatalogRepository for PostgresHostCatalog {
    async fn register_source(&self, source: &Source) -> HostCatalogResult<()> {
        let source_id = source.id();
        let new_row = NewSourceRow {
            id: source_id.into_inner(),
            model_id: source.model_id().as_str().to_owned(),
            source_set: source.source_set().as_str().to_owned(),
            name: source.name().to_owned(),
            created_at: source.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(sources::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        HostCatalogError::DuplicateSource(source_id)
                    }
                    _ => HostCatalogError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn attach_host(
        &self,
        source_id: SourceId,
        host_url: &HostUrl,
    ) -> HostCatalogResult<HostCatalogEntry> {
        let url = host_url.clone();

        self.run_blocking(move |connection| {
            let source = load_source(connection, source_id)?
                .ok_or(HostCatalogError::SourceNotFound(source_id))?;

            diesel::insert_into(source_hosts::table)
                .values(&NewSourceHostRow {
                    source_id: source_id.into_inner(),
                    host_url: url.to_string(),
                })
                .on_conflict((source_hosts::source_id, source_hosts::host_url))
                .do_nothing()
                .execute(connection)
                .map_err(HostCatalogError::persistence)?;

            Ok(HostCatalogEntry::for_source(&source, url))
        })
        .await
    }

    async fn find_source(&self, source_id: SourceId) -> HostCatalogResult<Option<Source>> {
        self.run_blocking(move |connection| load_source(connection, source_id))
            .await
    }

    async fn source_set_exists(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
    ) -> HostCatalogResult<bool> {
        let model = model_id.as_str().to_owned();
        let set = source_set.as_str().to_owned();

        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                sources::table
                    .filter(sources::model_id.eq(model))
                    .filter(sources::source_set.eq(set)),
            ))
            .get_result::<bool>(connection)
            .map_err(HostCatalogError::persistence)
        })
        .await
    }

    async fn hosts_for_model(&self, model_id: &ModelId) -> HostCatalogResult<Vec<HostUrl>> {
        let model = model_id.as_str().to_owned();

        self.run_blocking(move |connection| {
            let urls = source_hosts::table
                .inner_join(sources::table)
                .filter(sources::model_id.eq(model))
                .order(source_hosts::id.asc())
                .select(source_hosts::host_url)
                .load::<String>(connection)
                .map_err(HostCatalogError::persistence)?;
            parse_urls(&urls)
        })
        .await
    }

    async fn hosts_for_source_set(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
    ) -> HostCatalogResult<Vec<HostUrl>> {
        let model = model_id.as_str().to_owned();
        let set = source_set.as_str().to_owned();

        self.run_blocking(move |connection| {
            let urls = source_hosts::table
                .inner_join(sources::table)
                .filter(sources::model_id.eq(model))
                .filter(sources::source_set.eq(set))
                .order(source_hosts::id.asc())
                .select(source_hosts::host_url)
                .load::<String>(connection)
                .map_err(HostCatalogError::persistence)?;
            parse_urls(&urls)
        })
        .await
    }

    async fn hosts_for_source(
        &self,
        source_id: SourceId,
    ) -> HostCatalogResult<Option<Vec<HostUrl>>> {
        self.run_blocking(move |connection| {
            if load_source(connection, source_id)?.is_none() {
                return Ok(None);
            }
            let urls = source_hosts::table
                .filter(source_hosts::source_id.eq(source_id.into_inner()))
                .order(source_hosts::id.asc())
                .select(source_hosts::host_url)
                .load::<String>(connection)
                .map_err(HostCatalogError::persistence)?;
            parse_urls(&urls).map(Some)
        })
        .await
    }

    async fn list_entries(&self) -> HostCatalogResult<Vec<HostCatalogEntry>> {
        self.run_blocking(|connection| {
            let rows = source_hosts::table
                .inner_join(sources::table)
                .order(source_hosts::id.asc())
                .select((SourceRow::as_select(), source_hosts::host_url))
                .load::<(SourceRow, String)>(connection)
                .map_err(HostCatalogError::persistence)?;

            rows.into_iter()
                .map(|(row, url)| {
                    let source = row_to_source(row)?;
                    let host_url = parse_url(&url)?;
                    Ok(HostCatalogEntry::for_source(&source, host_url))
                })
                .collect()
        })
        .await
    }
}

fn load_source(
    connection: &mut PgConnection,
    source_id: SourceId,
) -> HostCatalogResult<Option<Source>> {
    let row = sources::table
        .filter(sources::id.eq(source_id.into_inner()))
        .select(SourceRow::as_select())
        .first::<SourceRow>(connection)
        .optional()
        .map_err(HostCatalogError::persistence)?;
    row.map(row_to_source).transpose()
}

fn row_to_source(row: SourceRow) -> HostCatalogResult<Source> {
    let SourceRow {
        id,
        model_id,
        source_set,
        name,
        created_at,
    } = row;

    let data = PersistedSourceData {
        id: SourceId::from_uuid(id),
        model_id: ModelId::new(model_id).map_err(HostCatalogError::invalid_persisted_data)?,
        source_set: SourceSetName::new(source_set)
            .map_err(HostCatalogError::invalid_persisted_data)?,
        name,
        created_at,
    };
    Ok(Source::from_persisted(data))
}

fn parse_url(raw: &str) -> HostCatalogResult<HostUrl> {
    HostUrl::parse(raw).map_err(HostCatalogError::invalid_persisted_data)
}

fn parse_urls(raw: &[String]) -> HostCatalogResult<Vec<HostUrl>> {
    raw.iter().map(|url| parse_url(url)).collect()
}
