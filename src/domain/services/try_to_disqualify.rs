//! The stale-fire check: a task whose `player_state_id` no longer
//! matches the player's current state is a silent no-op rather than a
//! disqualification.

use crate::domain::identifiers::{PlayerStateId, UserId};
use crate::domain::models::Game;

/// Returns `(player_was_disqualified, game_has_ended)`.
pub fn try_to_disqualify(
    game: &mut Game,
    user: UserId,
    expected_state_id: PlayerStateId,
) -> (bool, bool) {
    let Some(state) = game.players.get(&user) else {
        return (false, false);
    };
    if state.id != expected_state_id {
        return (false, false);
    }

    game.players.shift_remove(&user);
    let game_has_ended = game.is_below_min_players();
    (true, game_has_ended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identifiers::GameId;
    use crate::domain::models::{PlayerState, RuleSet};
    use chrono::Utc;
    use indexmap::IndexMap;
    use std::time::Duration;
    use uuid::Uuid;

    fn user(n: u8) -> UserId {
        UserId(Uuid::from_u128(n as u128))
    }

    fn two_player_game() -> Game {
        let mut players = IndexMap::new();
        players.insert(user(1), PlayerState::new_connected(PlayerState::RECONNECT_BUDGET));
        players.insert(user(2), PlayerState::new_connected(PlayerState::RECONNECT_BUDGET));
        Game {
            id: GameId::new(),
            players,
            created_at: Utc::now(),
            rule_set: RuleSet::ConnectFour {
                time_for_each_player: Duration::from_secs(60),
            },
        }
    }

    #[test]
    fn stale_state_id_is_a_no_op() {
        let mut g = two_player_game();
        let stale_id = PlayerStateId::new();
        let (disqualified, ended) = try_to_disqualify(&mut g, user(2), stale_id);
        assert!(!disqualified);
        assert!(!ended);
        assert_eq!(g.players.len(), 2);
    }

    #[test]
    fn matching_state_id_disqualifies_and_ends_game_below_minimum() {
        let mut g = two_player_game();
        let current_id = g.players[&user(2)].id;
        let (disqualified, ended) = try_to_disqualify(&mut g, user(2), current_id);
        assert!(disqualified);
        assert!(ended);
        assert_eq!(g.players.len(), 1);
    }
}
