//! Then steps for private message BDD scenarios.

use super::world::{PrivateMessageWorld, run_async};
use courier::private_message::{
    domain::{MessageQuery, PrivateMessage},
    ports::PrivateMessageRepository,
    services::PrivateMessageServiceError,
};
use rstest_bdd_macros::then;

fn stored_message(world: &PrivateMessageWorld) -> Result<Option<PrivateMessage>, eyre::Report> {
    let id = world.current_message()?.id();
    run_async(world.repository.find_matching(id, &MessageQuery::new()))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))
}

#[then("the message is marked read")]
fn message_is_marked_read(world: &PrivateMessageWorld) -> Result<(), eyre::Report> {
    let stored = stored_message(world)?.ok_or_else(|| eyre::eyre!("message missing"))?;
    if !stored.is_read() {
        return Err(eyre::eyre!("expected message to be read"));
    }
    Ok(())
}

#[then("the message is not marked read")]
fn message_is_not_marked_read(world: &PrivateMessageWorld) -> Result<(), eyre::Report> {
    let stored = stored_message(world)?.ok_or_else(|| eyre::eyre!("message missing"))?;
    if stored.is_read() {
        return Err(eyre::eyre!("expected message to remain unread"));
    }
    Ok(())
}

#[then(r#""{name}" has {count:u64} unread messages"#)]
fn has_unread_messages(
    world: &mut PrivateMessageWorld,
    name: String,
    count: u64,
) -> Result<(), eyre::Report> {
    let user = world.account(&name);
    let unread = run_async(world.service.unread_count(&user))
        .map_err(|err| eyre::eyre!("unread_count failed: {err}"))?;
    if unread != count {
        return Err(eyre::eyre!("expected {count} unread messages, found {unread}"));
    }
    Ok(())
}

#[then("reading fails with a not found error")]
fn reading_fails_with_not_found(world: &PrivateMessageWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_read_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing read result in scenario world"))?;
    if !matches!(result, Err(PrivateMessageServiceError::NotFound(_))) {
        return Err(eyre::eyre!("expected not found error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"reading by "{name}" fails with a not found error"#)]
fn reading_by_fails_with_not_found(
    world: &mut PrivateMessageWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let reader = world.account(&name);
    let id = world.current_message()?.id();
    let result = run_async(world.service.read_message(id, &reader));
    if !matches!(result, Err(PrivateMessageServiceError::NotFound(_))) {
        return Err(eyre::eyre!("expected not found error, got {result:?}"));
    }
    Ok(())
}

#[then("the message still exists")]
fn message_still_exists(world: &PrivateMessageWorld) -> Result<(), eyre::Report> {
    if stored_message(world)?.is_none() {
        return Err(eyre::eyre!("expected message to still be stored"));
    }
    Ok(())
}

#[then("the message no longer exists")]
fn message_no_longer_exists(world: &PrivateMessageWorld) -> Result<(), eyre::Report> {
    if stored_message(world)?.is_some() {
        return Err(eyre::eyre!("expected message to be destroyed"));
    }
    Ok(())
}
