//! Restores a disconnected player's connection and cancels their
//! pending disqualification.

use crate::application::common::event_publisher::Event;
use crate::application::common::realtime_client;
use crate::application::common::task_scheduler::try_to_disqualify_player_task_id;
use crate::application::common::RequestContext;
use crate::application::errors::{ApplicationError, ProcessorError};
use crate::domain::identifiers::{GameId, UserId};
use crate::domain::services;

pub struct ReconnectToGameInput {
    pub game_id: GameId,
}

pub async fn reconnect_to_game(
    ctx: &RequestContext,
    current_user: UserId,
    input: ReconnectToGameInput,
) -> Result<(), ProcessorError> {
    let old = ctx
        .game_gateway
        .by_id(input.game_id, true, &ctx.locks)
        .await?
        .ok_or(ApplicationError::GameDoesNotExist)?;
    let Some(old_state) = old.players.get(&current_user) else {
        return Err(ApplicationError::CurrentUserNotInGame.into());
    };
    let stale_task_id = try_to_disqualify_player_task_id(old_state.id);

    let mut new = old.clone();
    services::reconnect(&mut new, current_user)?;

    ctx.game_gateway.update(&old, &new, &ctx.transaction).await?;
    ctx.task_scheduler.unschedule(&stale_task_id, &ctx.transaction).await?;

    ctx.commit().await?;

    ctx.event_publisher
        .publish(
            Event::PlayerReconnected {
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
