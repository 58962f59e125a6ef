//! `PostgreSQL` tests for the host catalog repository.

use super::helpers::{BoxError, CatalogContext, catalog, execute_sql};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};
use waystation::{
    host_catalog::{
        domain::{HostCatalogEntry, ModelId, Source, SourceId, SourceSetName},
        ports::{HostCatalogError, HostCatalogRepository},
    },
    host_url::HostUrl,
};

#[fixture]
fn clock() -> MockClock {
    let mut clock = MockClock::new();
    clock
        .expect_utc()
        .return_const(DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_000));
    clock
}

fn source(clock: &MockClock, model: &str, set: &str, name: &str) -> Result<Source, BoxError> {
    Ok(Source::new(ModelId::new(model)?, SourceSetName::new(set)?, name, clock)?)
}

fn host(port: u16) -> HostUrl {
    HostUrl::from_parts("http", "10.0.0.7", port).expect("valid URL")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_source_round_trips(
    #[future] catalog: Result<Option<CatalogContext>, BoxError>,
    clock: MockClock,
) -> Result<(), BoxError> {
    let Some(ctx) = catalog.await? else {
        return Ok(());
    };
    let wiki = source(&clock, "llama-3-8b", "default", "wiki")?;

    ctx.repo.register_source(&wiki).await?;

    assert_eq!(ctx.repo.find_source(wiki.id()).await?, Some(wiki));
    assert_eq!(ctx.repo.find_source(SourceId::new()).await?, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_source_is_rejected(
    #[future] catalog: Result<Option<CatalogContext>, BoxError>,
    clock: MockClock,
) -> Result<(), BoxError> {
    let Some(ctx) = catalog.await? else {
        return Ok(());
    };
    let wiki = source(&clock, "llama-3-8b", "default", "wiki")?;
    ctx.repo.register_source(&wiki).await?;

    let result = ctx.repo.register_source(&wiki).await;

    assert!(matches!(result, Err(HostCatalogError::DuplicateSource(id)) if id == wiki.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attaching_the_same_host_twice_keeps_one_row(
    #[future] catalog: Result<Option<CatalogContext>, BoxError>,
    clock: MockClock,
) -> Result<(), BoxError> {
    let Some(ctx) = catalog.await? else {
        return Ok(());
    };
    let wiki = source(&clock, "llama-3-8b", "default", "wiki")?;
    ctx.repo.register_source(&wiki).await?;

    let first = ctx.repo.attach_host(wiki.id(), &host(8001)).await?;
    let second = ctx.repo.attach_host(wiki.id(), &host(8001)).await?;

    assert_eq!(first, second);
    assert_eq!(first, HostCatalogEntry::for_source(&wiki, host(8001)));
    assert_eq!(ctx.repo.hosts_for_source(wiki.id()).await?, Some(vec![host(8001)]));
    assert_eq!(ctx.repo.list_entries().await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attaching_to_unknown_source_fails(
    #[future] catalog: Result<Option<CatalogContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = catalog.await? else {
        return Ok(());
    };
    let missing = SourceId::new();

    let result = ctx.repo.attach_host(missing, &host(8001)).await;

    assert!(matches!(result, Err(HostCatalogError::SourceNotFound(id)) if id == missing));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_source_differs_from_source_without_hosts(
    #[future] catalog: Result<Option<CatalogContext>, BoxError>,
    clock: MockClock,
) -> Result<(), BoxError> {
    let Some(ctx) = catalog.await? else {
        return Ok(());
    };
    let empty = source(&clock, "llama-3-8b", "default", "empty")?;
    ctx.repo.register_source(&empty).await?;

    assert_eq!(ctx.repo.hosts_for_source(empty.id()).await?, Some(Vec::new()));
    assert_eq!(ctx.repo.hosts_for_source(SourceId::new()).await?, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lookups_follow_registration_order_and_scope(
    #[future] catalog: Result<Option<CatalogContext>, BoxError>,
    clock: MockClock,
) -> Result<(), BoxError> {
    let Some(ctx) = catalog.await? else {
        return Ok(());
    };
    let wiki = source(&clock, "llama-3-8b", "default", "wiki")?;
    let docs = source(&clock, "llama-3-8b", "private", "docs")?;
    let other = source(&clock, "phi-3-mini", "default", "code")?;
    for item in [&wiki, &docs, &other] {
        ctx.repo.register_source(item).await?;
    }
    ctx.repo.attach_host(docs.id(), &host(8003)).await?;
    ctx.repo.attach_host(wiki.id(), &host(8001)).await?;
    ctx.repo.attach_host(other.id(), &host(8009)).await?;
    ctx.repo.attach_host(wiki.id(), &host(8003)).await?;

    let model = ModelId::new("llama-3-8b")?;
    let default_set = SourceSetName::new("default")?;
    let private_set = SourceSetName::new("private")?;

    assert_eq!(
        ctx.repo.hosts_for_model(&model).await?,
        vec![host(8003), host(8001), host(8003)]
    );
    assert_eq!(
        ctx.repo.hosts_for_source_set(&model, &default_set).await?,
        vec![host(8001), host(8003)]
    );
    assert!(ctx.repo.source_set_exists(&model, &private_set).await?);
    assert!(!ctx.repo.source_set_exists(&model, &SourceSetName::new("archive")?).await?);

    let entries: Vec<SourceId> = ctx
        .repo
        .list_entries()
        .await?
        .into_iter()
        .map(|entry| entry.source_id)
        .collect();
    assert_eq!(entries, vec![docs.id(), wiki.id(), other.id(), wiki.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_rows_surface_as_invalid_persisted_data(
    #[future] catalog: Result<Option<CatalogContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(ctx) = catalog.await? else {
        return Ok(());
    };
    execute_sql(
        &ctx.pool,
        concat!(
            "INSERT INTO sources (id, model_id, source_set, name) VALUES ",
            "('00000000-0000-0000-0000-0000000000a1', 'llama-3-8b', 'default', 'wiki'), ",
            "('00000000-0000-0000-0000-0000000000b2', '   ', 'default', 'blank');",
            "INSERT INTO source_hosts (source_id, host_url) VALUES ",
            "('00000000-0000-0000-0000-0000000000a1', 'ftp://10.0.0.7:21');",
        ),
    )
    .await?;
    let blank = SourceId::from_uuid(uuid::Uuid::from_u128(0xb2));

    let hosts = ctx.repo.hosts_for_model(&ModelId::new("llama-3-8b")?).await;
    let found = ctx.repo.find_source(blank).await;

    assert!(matches!(hosts, Err(HostCatalogError::InvalidPersistedData(_))));
    assert!(matches!(found, Err(HostCatalogError::InvalidPersistedData(_))));
    Ok(())
}
