//! Removes a finished game and its remaining scheduled tasks.
//! Externally triggered: deletes the game and unschedules every task
//! still pending for it. A missing game is a silent no-op.

use crate::application::common::task_scheduler::{disconnect_from_game_task_id, try_to_disqualify_player_task_id};
use crate::application::common::RequestContext;
use crate::application::errors::ProcessorError;
use crate::domain::identifiers::{GameId, TaskId};

pub struct EndGameInput {
    pub game_id: GameId,
}

pub async fn end_game(ctx: &RequestContext, input: EndGameInput) -> Result<(), ProcessorError> {
    let Some(game) = ctx.game_gateway.by_id(input.game_id, true, &ctx.locks).await? else {
        return Ok(());
    };

    ctx.game_gateway.delete(&game, &ctx.transaction).await?;

    let mut unschedule_ids: Vec<TaskId> = Vec::new();
    for (player_id, state) in &game.players {
        unschedule_ids.push(disconnect_from_game_task_id(game.id, *player_id));
        unschedule_ids.push(try_to_disqualify_player_task_id(state.id));
    }
    ctx.task_scheduler
        .unschedule_many(&unschedule_ids, &ctx.transaction)
        .await?;

    ctx.commit().await?;

    Ok(())
}
