//! Lets a lobby admin remove another member: like `LeaveLobby` for the
//! target, gated by `kick_from_lobby`'s admin/self-kick pre-checks.

use crate::application::common::event_publisher::Event;
use crate::application::common::realtime_client::{self, Command};
use crate::application::common::task_scheduler::remove_from_lobby_task_id;
use crate::application::common::RequestContext;
use crate::application::errors::{ApplicationError, ProcessorError};
use crate::domain::identifiers::{LobbyId, UserId};
use crate::domain::services;

pub struct KickFromLobbyInput {
    pub lobby_id: LobbyId,
    pub target: UserId,
}

pub async fn kick_from_lobby(
    ctx: &RequestContext,
    current_user: UserId,
    input: KickFromLobbyInput,
) -> Result<(), ProcessorError> {
    let old = ctx
        .lobby_gateway
        .by_id(input.lobby_id, true, &ctx.locks)
        .await?
        .ok_or(ApplicationError::LobbyDoesNotExist)?;

    if !old.users.contains_key(&input.target) {
        return Err(ApplicationError::UserNotInLobby.into());
    }

    let mut new = old.clone();
    services::kick_from_lobby(&mut new, input.target, current_user)?;

    ctx.lobby_gateway.update(&old, &new, &ctx.transaction).await?;
    ctx.task_scheduler
        .unschedule(&remove_from_lobby_task_id(old.id, input.target), &ctx.transaction)
        .await?;

    ctx.commit().await?;

    ctx.event_publisher
        .publish(
            Event::UserKickedFromLobby {
                lobby_id: old.id,
                user_id: input.target,
            },
            ctx.operation_id,
        )
        .await?;

    ctx.realtime_client
        .batch(
            vec![
                Command::publish(
                    realtime_client::lobby_channel(old.id),
                    &serde_json::json!({"user_id": input.target}),
                ),
                Command::unsubscribe(input.target, realtime_client::lobby_channel(old.id)),
            ],
            true,
        )
        .await?;

    Ok(())
}
