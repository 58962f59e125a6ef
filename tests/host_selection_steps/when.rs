//! When steps for host selection BDD scenarios.

use super::world::{SelectionWorld, run_async};
use rstest_bdd_macros::when;
use waystation::host_catalog::domain::{AccessContext, ModelId, SourceSetName};

#[when(r#"a host is selected for model "{model}""#)]
fn host_selected(world: &mut SelectionWorld, model: String) -> Result<(), eyre::Report> {
    let selector = world.selector()?;
    let model_id = ModelId::new(model)?;
    world.last_single = Some(run_async(selector.select_host(&model_id)));
    Ok(())
}

#[when(r#"a host pair is selected for model "{model}""#)]
fn host_pair_selected(world: &mut SelectionWorld, model: String) -> Result<(), eyre::Report> {
    let selector = world.selector()?;
    let model_id = ModelId::new(model)?;
    world.last_pair = Some(run_async(selector.select_host_pair(&model_id)));
    Ok(())
}

#[when(r#"an anonymous caller selects a host for model "{model}" in source set "{set}""#)]
fn anonymous_set_selection(
    world: &mut SelectionWorld,
    model: String,
    set: String,
) -> Result<(), eyre::Report> {
    let selector = world.selector()?;
    let model_id = ModelId::new(model)?;
    let source_set = SourceSetName::new(set)?;
    world.last_single = Some(run_async(selector.select_host_for_source_set(
        &model_id,
        &source_set,
        &AccessContext::anonymous(),
    )));
    Ok(())
}
