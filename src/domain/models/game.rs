//! The `Game` aggregate: an active match between a fixed roster of players.

use crate::domain::duration_secs;
use crate::domain::identifiers::{GameId, PlayerStateId, UserId};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::lobby::RuleSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Rotates on every Connected<->Disconnected toggle; invalidates any
    /// in-flight disqualification timer tied to the previous value.
    pub id: PlayerStateId,
    pub status: PlayerStatus,
    #[serde(with = "duration_secs")]
    pub time_left: Duration,
}

impl PlayerState {
    /// The reconnect budget: the initial `time_left` for a freshly
    /// created player, and the default disqualification deadline on
    /// first disconnect.
    pub const RECONNECT_BUDGET: Duration = Duration::from_secs(40);

    #[must_use]
    pub fn new_connected(time_left: Duration) -> Self {
        Self {
            id: PlayerStateId::new(),
            status: PlayerStatus::Connected,
            time_left,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    /// Insertion order preserved from the lobby that spawned this game.
    pub players: IndexMap<UserId, PlayerState>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub rule_set: RuleSet,
}

impl Game {
    #[must_use]
    pub fn is_below_min_players(&self) -> bool {
        self.players.len() < self.rule_set.min_players()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::lobby::RuleSet;
    use uuid::Uuid;

    fn user(n: u8) -> UserId {
        UserId(Uuid::from_u128(n as u128))
    }

    #[test]
    fn new_connected_player_has_full_reconnect_budget() {
        let state = PlayerState::new_connected(PlayerState::RECONNECT_BUDGET);
        assert_eq!(state.status, PlayerStatus::Connected);
        assert_eq!(state.time_left, PlayerState::RECONNECT_BUDGET);
    }

    #[test]
    fn below_min_players_once_one_remains() {
        let mut players = IndexMap::new();
        players.insert(user(1), PlayerState::new_connected(PlayerState::RECONNECT_BUDGET));
        let game = Game {
            id: GameId::new(),
            players,
            created_at: Utc::now(),
            rule_set: RuleSet::ConnectFour {
                time_for_each_player: Duration::from_secs(60),
            },
        };
        assert!(game.is_below_min_players());
    }
}
