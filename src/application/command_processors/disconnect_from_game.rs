//! Marks a player disconnected and schedules their disqualification deadline.

use crate::application::common::event_publisher::Event;
use crate::application::common::realtime_client;
use crate::application::common::task_scheduler::{
    deadline_after, try_to_disqualify_player_task_id, TryToDisqualifyPlayerTask,
};
use crate::application::common::{RequestContext, Task};
use crate::application::errors::{ApplicationError, ProcessorError};
use crate::domain::identifiers::{GameId, UserId};
use crate::domain::services;

pub struct DisconnectFromGameInput {
    pub game_id: GameId,
}

pub async fn disconnect_from_game(
    ctx: &RequestContext,
    current_user: UserId,
    input: DisconnectFromGameInput,
) -> Result<(), ProcessorError> {
    let old = ctx
        .game_gateway
        .by_id(input.game_id, true, &ctx.locks)
        .await?
        .ok_or(ApplicationError::GameDoesNotExist)?;
    if !old.players.contains_key(&current_user) {
        return Err(ApplicationError::CurrentUserNotInGame.into());
    }

    let mut new = old.clone();
    services::disconnect(&mut new, current_user)?;

    ctx.game_gateway.update(&old, &new, &ctx.transaction).await?;

    let player = &new.players[&current_user];
    let task = Task::TryToDisqualifyPlayer(TryToDisqualifyPlayerTask {
        id: try_to_disqualify_player_task_id(player.id),
        execute_at: deadline_after(player.time_left),
        operation_id: ctx.operation_id,
        game_id: new.id,
        player_id: current_user,
        player_state_id: player.id,
    });
    ctx.task_scheduler.schedule(task, &ctx.transaction).await?;

    ctx.commit().await?;

    ctx.event_publisher
        .publish(
            Event::PlayerDisconnected {
                game_id: new.id,
                player_id: current_user,
            },
            ctx.operation_id,
        )
        .await?;

    ctx.realtime_client
        .publish(
            &realtime_client::game_channel(new.id),
            &serde_json::json!({"player_id": current_user}),
        )
        .await?;

    Ok(())
}
