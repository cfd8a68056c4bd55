//! Adds a user to an open lobby, checking capacity and password.

use crate::application::common::event_publisher::Event;
use crate::application::common::realtime_client::{self, Command};
use crate::application::common::task_scheduler::{deadline_after, remove_from_lobby_task_id};
use crate::application::common::{RequestContext, Task};
use crate::application::errors::{ApplicationError, ProcessorError};
use crate::domain::identifiers::{LobbyId, UserId};
use crate::domain::services;

pub struct JoinLobbyInput {
    pub lobby_id: LobbyId,
    pub password: Option<String>,
}

pub async fn join_lobby(
    ctx: &RequestContext,
    current_user: UserId,
    input: JoinLobbyInput,
) -> Result<(), ProcessorError> {
    if ctx
        .lobby_gateway
        .by_user_id(current_user, false, &ctx.locks)
        .await?
        .is_some()
    {
        return Err(ApplicationError::CurrentUserInLobby.into());
    }
    if ctx
        .game_gateway
        .by_player_id(current_user, false, &ctx.locks)
        .await?
        .is_some()
    {
        return Err(ApplicationError::CurrentUserInGame.into());
    }

    let old = ctx
        .lobby_gateway
        .by_id(input.lobby_id, true, &ctx.locks)
        .await?
        .ok_or(ApplicationError::LobbyDoesNotExist)?;

    let mut new = old.clone();
    services::join_lobby(&mut new, current_user, input.password.as_deref())?;

    ctx.lobby_gateway.update(&old, &new, &ctx.transaction).await?;

    let task = Task::RemoveFromLobby(crate::application::common::task_scheduler::RemoveFromLobbyTask {
        id: remove_from_lobby_task_id(new.id, current_user),
        execute_at: deadline_after(ctx.presence_grace),
        operation_id: ctx.operation_id,
        lobby_id: new.id,
        user_id: current_user,
    });
    ctx.task_scheduler.schedule(task, &ctx.transaction).await?;

    ctx.commit().await?;

    ctx.event_publisher
        .publish(
            Event::UserJoinedLobby {
                lobby_id: new.id,
                user_id: current_user,
            },
            ctx.operation_id,
        )
        .await?;

    let users_snapshot: Vec<_> = new
        .users
        .iter()
        .map(|(id, role)| serde_json::json!({"user_id": id, "role": role}))
        .collect();
    ctx.realtime_client
        .batch(
            vec![
                Command::publish(
                    realtime_client::lobby_channel(new.id),
                    &serde_json::json!({"user_id": current_user}),
                ),
                Command::publish(
                    realtime_client::user_channel(current_user),
                    &serde_json::json!({"lobby_id": new.id, "users": users_snapshot}),
                ),
            ],
            true,
        )
        .await?;

    Ok(())
}
