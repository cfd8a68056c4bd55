//! Heartbeat handler: resets a connected player's presence-timeout
//! deadline. Deterministic task ids mean a reschedule is just an
//! overwrite of the previous deadline; no event or realtime fan-out
//! accompanies it.

use crate::application::common::task_scheduler::{
    deadline_after, disconnect_from_game_task_id, remove_from_lobby_task_id, DisconnectFromGameTask,
    RemoveFromLobbyTask,
};
use crate::application::common::{RequestContext, Task};
use crate::application::errors::ProcessorError;
use crate::domain::identifiers::UserId;

pub async fn acknowledge_presence(ctx: &RequestContext, current_user: UserId) -> Result<(), ProcessorError> {
    if let Some(lobby) = ctx.lobby_gateway.by_user_id(current_user, false, &ctx.locks).await? {
        let task = Task::RemoveFromLobby(RemoveFromLobbyTask {
            id: remove_from_lobby_task_id(lobby.id, current_user),
            execute_at: deadline_after(ctx.presence_grace),
            operation_id: ctx.operation_id,
            lobby_id: lobby.id,
            user_id: current_user,
        });
        ctx.task_scheduler.schedule(task, &ctx.transaction).await?;
        ctx.commit().await?;
        return Ok(());
    }

    if let Some(game) = ctx.game_gateway.by_player_id(current_user, false, &ctx.locks).await? {
        let task = Task::DisconnectFromGame(DisconnectFromGameTask {
            id: disconnect_from_game_task_id(game.id, current_user),
            execute_at: deadline_after(ctx.presence_grace),
            operation_id: ctx.operation_id,
            game_id: game.id,
            player_id: current_user,
        });
        ctx.task_scheduler.schedule(task, &ctx.transaction).await?;
        ctx.commit().await?;
        return Ok(());
    }

    Ok(())
}
