//! Creates a game from a full lobby and deletes the lobby in the same
//! transition: there is no separate "start game" step, since the game
//! the lobby's admin assembles is ready to play the moment it fills.

use crate::application::common::event_publisher::Event;
use crate::application::common::realtime_client;
use crate::application::common::task_scheduler::{
    deadline_after, disconnect_from_game_task_id, remove_from_lobby_task_id, DisconnectFromGameTask,
};
use crate::application::common::{RequestContext, Task};
use crate::application::errors::{ApplicationError, ProcessorError};
use crate::domain::identifiers::{LobbyId, TaskId, UserId};
use crate::domain::models::{Game, RuleSet};
use crate::domain::services;

pub struct CreateGameInput {
    pub lobby_id: LobbyId,
}

pub async fn create_game(
    ctx: &RequestContext,
    current_user: UserId,
    input: CreateGameInput,
) -> Result<(), ProcessorError> {
    let lobby = ctx
        .lobby_gateway
        .by_id(input.lobby_id, true, &ctx.locks)
        .await?
        .ok_or(ApplicationError::LobbyDoesNotExist)?;
    if !lobby.users.contains_key(&current_user) {
        return Err(ApplicationError::CurrentUserNotInLobby.into());
    }

    let game: Game = services::create_game(&lobby, current_user, ctx.reconnect_budget)?;

    ctx.game_gateway.save(&game, &ctx.transaction).await?;
    ctx.lobby_gateway.delete(&lobby, &ctx.transaction).await?;

    let unschedule_ids: Vec<TaskId> = game
        .players
        .keys()
        .map(|player_id| remove_from_lobby_task_id(lobby.id, *player_id))
        .collect();
    ctx.task_scheduler
        .unschedule_many(&unschedule_ids, &ctx.transaction)
        .await?;

    let disconnect_tasks: Vec<Task> = game
        .players
        .keys()
        .map(|player_id| {
            Task::DisconnectFromGame(DisconnectFromGameTask {
                id: disconnect_from_game_task_id(game.id, *player_id),
                execute_at: deadline_after(ctx.presence_grace),
                operation_id: ctx.operation_id,
                game_id: game.id,
                player_id: *player_id,
            })
        })
        .collect();
    ctx.task_scheduler
        .schedule_many(disconnect_tasks, &ctx.transaction)
        .await?;

    ctx.commit().await?;

    let RuleSet::ConnectFour { time_for_each_player } = game.rule_set;
    let mut player_ids = game.players.keys().copied();
    let first_player_id = player_ids.next().expect("create_game guarantees max_players");
    let second_player_id = player_ids.next().expect("create_game guarantees max_players");

    ctx.event_publisher
        .publish(
            Event::ConnectFourGameCreated {
                game_id: game.id,
                lobby_id: lobby.id,
                first_player_id,
                second_player_id,
                time_for_each_player,
                created_at: game.created_at,
            },
            ctx.operation_id,
        )
        .await?;

    ctx.realtime_client
        .publish(
            realtime_client::LOBBY_BROWSER_CHANNEL,
            &serde_json::json!({"lobby_id": lobby.id, "game_id": game.id}),
        )
        .await?;

    Ok(())
}
