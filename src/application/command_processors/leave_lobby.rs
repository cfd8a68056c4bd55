//! User-initiated departure from a lobby. Shares the `remove_from_lobby`
//! domain transition with the task-fired `RemoveFromLobby` processor;
//! the two differ only in how the lobby is located and in
//! precondition-error vs. silent no-op.

use crate::application::common::event_publisher::Event;
use crate::application::common::realtime_client::{self, Command};
use crate::application::common::task_scheduler::remove_from_lobby_task_id;
use crate::application::common::RequestContext;
use crate::application::errors::{ApplicationError, ProcessorError};
use crate::domain::identifiers::{LobbyId, UserId};
use crate::domain::services;

pub struct LeaveLobbyInput {
    pub lobby_id: LobbyId,
}

pub async fn leave_lobby(
    ctx: &RequestContext,
    current_user: UserId,
    input: LeaveLobbyInput,
) -> Result<(), ProcessorError> {
    let old = ctx
        .lobby_gateway
        .by_id(input.lobby_id, true, &ctx.locks)
        .await?
        .ok_or(ApplicationError::LobbyDoesNotExist)?;
    if !old.users.contains_key(&current_user) {
        return Err(ApplicationError::CurrentUserNotInLobby.into());
    }

    let mut new = old.clone();
    let (now_empty, new_admin) = services::remove_from_lobby(&mut new, current_user);

    if now_empty {
        ctx.lobby_gateway.delete(&old, &ctx.transaction).await?;
    } else {
        ctx.lobby_gateway.update(&old, &new, &ctx.transaction).await?;
    }
    ctx.task_scheduler
        .unschedule(&remove_from_lobby_task_id(old.id, current_user), &ctx.transaction)
        .await?;

    ctx.commit().await?;

    ctx.event_publisher
        .publish(
            Event::UserLeftLobby {
                lobby_id: old.id,
                user_id: current_user,
                new_admin_id: new_admin,
            },
            ctx.operation_id,
        )
        .await?;

    let mut commands = vec![Command::unsubscribe(
        current_user,
        realtime_client::lobby_channel(old.id),
    )];
    if !now_empty {
        commands.push(Command::publish(
            realtime_client::lobby_channel(old.id),
            &serde_json::json!({
                "user_id": current_user,
                "new_admin_id": new_admin,
            }),
        ));
    }
    ctx.realtime_client.batch(commands, true).await?;

    Ok(())
}
