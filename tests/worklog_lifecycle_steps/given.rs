//! Given steps for work log lifecycle BDD scenarios.

use super::world::{WorkLogWorld, run_async};
use rstest_bdd_macros::given;
use serde_json::json;

#[given("an empty work log store")]
fn empty_store(world: &mut WorkLogWorld) -> Result<(), eyre::Report> {
    if !world.ids_by_name.is_empty() {
        return Err(eyre::eyre!("scenario world should start empty"));
    }
    Ok(())
}

#[given(r#"a log named "{name}" exists"#)]
fn log_exists(world: &mut WorkLogWorld, name: String) -> Result<(), eyre::Report> {
    let body = json!({"taskName": name, "taskType": "task", "taskStatus": "backlog"});
    let created = run_async(world.api.create_log(&body.to_string()))
        .map_err(|err| eyre::eyre!("seeding {name} failed: {err}"))?;
    world.remember(&created.log);
    Ok(())
}
