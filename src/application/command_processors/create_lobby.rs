//! Creates a new lobby and registers the creator as its admin.

use super::{validate_lobby_name, validate_lobby_password, validate_rule_set};
use crate::application::common::event_publisher::Event;
use crate::application::common::realtime_client::{self, Command};
use crate::application::common::task_scheduler::{deadline_after, remove_from_lobby_task_id};
use crate::application::common::{RequestContext, Task};
use crate::application::errors::{ApplicationError, ProcessorError};
use crate::domain::identifiers::UserId;
use crate::domain::models::{Lobby, RuleSet};
use crate::domain::services;

pub struct CreateLobbyInput {
    pub name: String,
    pub rule_set: RuleSet,
    pub password: Option<String>,
}

pub async fn create_lobby(
    ctx: &RequestContext,
    current_user: UserId,
    input: CreateLobbyInput,
) -> Result<(), ProcessorError> {
    validate_lobby_name(&input.name)?;
    validate_rule_set(&input.rule_set)?;
    validate_lobby_password(input.password.as_deref())?;

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

    let lobby: Lobby = services::create_lobby(input.name, current_user, input.rule_set, input.password);

    ctx.lobby_gateway.save(&lobby, &ctx.transaction).await?;

    let task = Task::RemoveFromLobby(crate::application::common::task_scheduler::RemoveFromLobbyTask {
        id: remove_from_lobby_task_id(lobby.id, current_user),
        execute_at: deadline_after(ctx.presence_grace),
        operation_id: ctx.operation_id,
        lobby_id: lobby.id,
        user_id: current_user,
    });
    ctx.task_scheduler.schedule(task, &ctx.transaction).await?;

    ctx.commit().await?;

    ctx.event_publisher
        .publish(
            Event::LobbyCreated {
                lobby_id: lobby.id,
                name: lobby.name.clone(),
                admin_id: current_user,
                rule_set: lobby.rule_set,
            },
            ctx.operation_id,
        )
        .await?;

    let snapshot = serde_json::json!({
        "lobby_id": lobby.id,
        "users": lobby.users.iter().map(|(id, role)| serde_json::json!({"user_id": id, "role": role})).collect::<Vec<_>>(),
    });
    ctx.realtime_client
        .batch(
            vec![
                Command::publish(realtime_client::user_channel(current_user), &snapshot),
                Command::publish(
                    realtime_client::LOBBY_BROWSER_CHANNEL.to_string(),
                    &serde_json::json!({"lobby_id": lobby.id, "name": lobby.name}),
                ),
            ],
            true,
        )
        .await?;

    Ok(())
}
