//! Given steps for host selection BDD scenarios.

use super::world::{SelectionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use waystation::{
    host_catalog::{
        domain::{ModelId, SourceSetName},
        services::RegisterSourceRequest,
    },
    host_url::HostUrl,
    routing::domain::RoutingMode,
};

#[given("the router runs in {mode} mode")]
fn router_runs_in_mode(world: &mut SelectionWorld, mode: String) -> Result<(), eyre::Report> {
    world.mode = mode
        .parse::<RoutingMode>()
        .wrap_err("parse routing mode for scenario")?;
    Ok(())
}

#[given(r#"a server on port {port:u16} reports model "{model}""#)]
fn server_reports_model(
    world: &mut SelectionWorld,
    port: u16,
    model: String,
) -> Result<(), eyre::Report> {
    let url = HostUrl::from_parts("http", "localhost", port).wrap_err("build server URL")?;
    world.endpoint.serve_model(url, model);
    Ok(())
}

#[given(r#"source set "{set}" of model "{model}" lists hosts "{hosts}""#)]
fn public_source_set_lists_hosts(
    world: &mut SelectionWorld,
    set: String,
    model: String,
    hosts: String,
) -> Result<(), eyre::Report> {
    catalogue(world, &set, &model, &hosts)?;
    world
        .access
        .add_public_set(ModelId::new(model)?, SourceSetName::new(set)?)
        .wrap_err("declare public source set")?;
    Ok(())
}

#[given(r#"private source set "{set}" of model "{model}" lists hosts "{hosts}""#)]
fn private_source_set_lists_hosts(
    world: &mut SelectionWorld,
    set: String,
    model: String,
    hosts: String,
) -> Result<(), eyre::Report> {
    catalogue(world, &set, &model, &hosts)?;
    world
        .access
        .add_private_set(ModelId::new(model)?, SourceSetName::new(set)?)
        .wrap_err("declare private source set")?;
    Ok(())
}

fn catalogue(
    world: &mut SelectionWorld,
    set: &str,
    model: &str,
    hosts: &str,
) -> Result<(), eyre::Report> {
    let source = run_async(
        world
            .service
            .register_source(RegisterSourceRequest::new(model, set, "scenario")),
    )
    .wrap_err("register scenario source")?;
    for host in hosts.split(',').map(str::trim) {
        let entry = run_async(world.service.register_host(source.id(), host))
            .wrap_err("register scenario host")?;
        world.catalogued_hosts.push(entry.host_url);
    }
    Ok(())
}
