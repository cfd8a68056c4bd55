//! Each executor reconstructs the corresponding command from the due
//! task's payload and hands it to the same processor user-initiated
//! commands use.

use crate::application::command_processors::{
    disconnect_from_game, remove_from_lobby, try_to_disqualify_player, DisconnectFromGameInput,
    RemoveFromLobbyInput, TryToDisqualifyPlayerInput,
};
use crate::application::common::{RequestContext, Task};
use crate::application::errors::ProcessorError;

pub async fn execute(ctx: &RequestContext, task: Task) -> Result<(), ProcessorError> {
    match task {
        Task::RemoveFromLobby(t) => {
            remove_from_lobby(
                ctx,
                RemoveFromLobbyInput {
                    lobby_id: t.lobby_id,
                    user_id: t.user_id,
                },
            )
            .await
        }
        Task::DisconnectFromGame(t) => {
            disconnect_from_game(ctx, t.player_id, DisconnectFromGameInput { game_id: t.game_id }).await
        }
        Task::TryToDisqualifyPlayer(t) => {
            try_to_disqualify_player(
                ctx,
                TryToDisqualifyPlayerInput {
                    game_id: t.game_id,
                    player_id: t.player_id,
                    player_state_id: t.player_state_id,
                },
            )
            .await
        }
    }
}
