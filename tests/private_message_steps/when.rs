//! When steps for private message BDD scenarios.

use super::world::{PrivateMessageWorld, run_async};
use courier::private_message::services::DeletionOutcome;
use rstest_bdd_macros::when;

#[when(r#""{name}" reads the message"#)]
fn reads_the_message(world: &mut PrivateMessageWorld, name: String) -> Result<(), eyre::Report> {
    let reader = world.account(&name);
    let id = world.current_message()?.id();
    let result = run_async(world.service.read_message(id, &reader));
    if let Ok(message) = &result {
        world.message = Some(message.clone());
    }
    world.last_read_result = Some(result);
    Ok(())
}

#[when(r#""{name}" deletes the message"#)]
fn deletes_the_message(world: &mut PrivateMessageWorld, name: String) -> Result<(), eyre::Report> {
    let user = world.account(&name);
    let id = world.current_message()?.id();
    let outcome = run_async(world.service.mark_deleted_by_id(id, &user))
        .map_err(|err| eyre::eyre!("deletion failed: {err}"))?;
    if let DeletionOutcome::Retained(message) = outcome {
        world.message = Some(message);
    }
    Ok(())
}
