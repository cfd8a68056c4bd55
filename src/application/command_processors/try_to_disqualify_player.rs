//! Task-fired processor: disqualifies a player whose reconnect window
//! has expired, unless they already reconnected. Stale fires (state id
//! no longer matches) are a silent no-op.

use crate::application::common::event_publisher::Event;
use crate::application::common::realtime_client;
use crate::application::common::task_scheduler::{disconnect_from_game_task_id, try_to_disqualify_player_task_id};
use crate::application::common::RequestContext;
use crate::application::errors::ProcessorError;
use crate::domain::identifiers::{GameId, PlayerStateId, TaskId, UserId};
use crate::domain::services;

pub struct TryToDisqualifyPlayerInput {
    pub game_id: GameId,
    pub player_id: UserId,
    pub player_state_id: PlayerStateId,
}

pub async fn try_to_disqualify_player(
    ctx: &RequestContext,
    input: TryToDisqualifyPlayerInput,
) -> Result<(), ProcessorError> {
    let Some(old) = ctx.game_gateway.by_id(input.game_id, true, &ctx.locks).await? else {
        return Ok(());
    };

    let mut new = old.clone();
    let (disqualified, ended) = services::try_to_disqualify(&mut new, input.player_id, input.player_state_id);
    if !disqualified {
        return Ok(());
    }

    if ended {
        ctx.game_gateway.delete(&old, &ctx.transaction).await?;

        let mut unschedule_ids: Vec<TaskId> = Vec::new();
        for (player_id, state) in &new.players {
            unschedule_ids.push(disconnect_from_game_task_id(new.id, *player_id));
            unschedule_ids.push(try_to_disqualify_player_task_id(state.id));
        }
        ctx.task_scheduler
            .unschedule_many(&unschedule_ids, &ctx.transaction)
            .await?;
    } else {
        ctx.game_gateway.update(&old, &new, &ctx.transaction).await?;
    }

    ctx.commit().await?;

    ctx.event_publisher
        .publish(
            Event::PlayerDisqualified {
                game_id: new.id,
                player_id: input.player_id,
            },
            ctx.operation_id,
        )
        .await?;

    ctx.realtime_client
        .publish(
            &realtime_client::game_channel(new.id),
            &serde_json::json!({"player_id": input.player_id}),
        )
        .await?;

    Ok(())
}
