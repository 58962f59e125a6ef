//! Diesel row models for host catalog persistence.

use super::schema::{source_hosts, sources};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for sources.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SourceRow {
    /// Source identifier.
    pub id: uuid::Uuid,
    /// Model identifier.
    pub model_id: String,
    /// Source set name.
    pub source_set: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for sources.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sources)]
pub struct NewSourceRow {
    /// Source identifier.
    pub id: uuid::Uuid,
    /// Model identifier.
    pub model_id: String,
    /// Source set name.
    pub source_set: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for host attachments; the timestamp defaults in SQL.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = source_hosts)]
pub struct NewSourceHostRow {
    /// Owning source.
    pub source_id: uuid::Uuid,
    /// Host base URL.
    pub host_url: String,
}
