//! Task-fired processor: runs when a `RemoveFromLobby` deadline
//! elapses, evicting a member who never connected or reconnected in
//! time. Unlike `LeaveLobby`, a stale fire (lobby already gone, or the
//! user already left) is a silent no-op rather than an error — this is
//! what the task executor relies on to swallow races.

use crate::application::common::event_publisher::Event;
use crate::application::common::realtime_client::{self, Command};
use crate::application::common::task_scheduler::remove_from_lobby_task_id;
use crate::application::common::RequestContext;
use crate::application::errors::ProcessorError;
use crate::domain::identifiers::{LobbyId, UserId};
use crate::domain::services;

pub struct RemoveFromLobbyInput {
    pub lobby_id: LobbyId,
    pub user_id: UserId,
}

pub async fn remove_from_lobby(ctx: &RequestContext, input: RemoveFromLobbyInput) -> Result<(), ProcessorError> {
    let Some(old) = ctx.lobby_gateway.by_id(input.lobby_id, true, &ctx.locks).await? else {
        return Ok(());
    };
    if !old.users.contains_key(&input.user_id) {
        return Ok(());
    }

    let mut new = old.clone();
    let (now_empty, new_admin) = services::remove_from_lobby(&mut new, input.user_id);

    if now_empty {
        ctx.lobby_gateway.delete(&old, &ctx.transaction).await?;
    } else {
        ctx.lobby_gateway.update(&old, &new, &ctx.transaction).await?;
    }
    ctx.task_scheduler
        .unschedule(
            &remove_from_lobby_task_id(old.id, input.user_id),
            &ctx.transaction,
        )
        .await?;

    ctx.commit().await?;

    ctx.event_publisher
        .publish(
            Event::UserRemovedFromLobby {
                lobby_id: old.id,
                user_id: input.user_id,
                new_admin_id: new_admin,
            },
            ctx.operation_id,
        )
        .await?;

    let mut commands = vec![Command::unsubscribe(
        input.user_id,
        realtime_client::lobby_channel(old.id),
    )];
    if !now_empty {
        commands.push(Command::publish(
            realtime_client::lobby_channel(old.id),
            &serde_json::json!({
                "user_id": input.user_id,
                "new_admin_id": new_admin,
            }),
        ));
    }
    ctx.realtime_client.batch(commands, true).await?;

    Ok(())
}
