//! Given steps for private message BDD scenarios.

use super::world::{PrivateMessageWorld, run_async};
use courier::private_message::services::SendMessageRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#""{sender}" has sent "{recipient}" a message"#)]
fn has_sent_a_message(
    world: &mut PrivateMessageWorld,
    sender: String,
    recipient: String,
) -> Result<(), eyre::Report> {
    let from = world.account(&sender);
    let to = world.account(&recipient);
    let request = SendMessageRequest::new(&from, &to, "Weekend plans", "Hiking on Saturday?");
    let message = run_async(world.service.send(request)).wrap_err("send scenario message")?;
    world.message = Some(message);
    Ok(())
}

#[given(r#""{name}" has deleted the message"#)]
fn has_deleted_the_message(world: &mut PrivateMessageWorld, name: String) -> Result<(), eyre::Report> {
    let user = world.account(&name);
    let id = world.current_message()?.id();
    run_async(world.service.mark_deleted_by_id(id, &user))
        .wrap_err("delete scenario message")?;
    Ok(())
}
