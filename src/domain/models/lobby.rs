//! The `Lobby` aggregate: a waiting room before a game starts.

use crate::domain::duration_secs;
use crate::domain::identifiers::UserId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

use super::super::identifiers::LobbyId;

/// A user's standing within a lobby. Exactly one `Admin` exists in a
/// non-empty lobby at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    RegularMember,
}

/// Per-game-kind tunables. Today only Connect Four exists; the
/// discriminator keeps the door open for more without touching callers
/// that only care about `max_players`/`min_players`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleSet {
    ConnectFour {
        #[serde(with = "duration_secs")]
        time_for_each_player: Duration,
    },
}

impl RuleSet {
    pub const MIN_TIME_FOR_EACH_PLAYER: Duration = Duration::from_secs(30);
    pub const MAX_TIME_FOR_EACH_PLAYER: Duration = Duration::from_secs(3 * 60);

    #[must_use]
    pub fn max_players(&self) -> usize {
        match self {
            RuleSet::ConnectFour { .. } => 2,
        }
    }

    #[must_use]
    pub fn min_players(&self) -> usize {
        match self {
            RuleSet::ConnectFour { .. } => 2,
        }
    }

    #[must_use]
    pub fn time_for_each_player(&self) -> Duration {
        match self {
            RuleSet::ConnectFour {
                time_for_each_player,
            } => *time_for_each_player,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lobby {
    pub id: LobbyId,
    pub name: String,
    /// Insertion-order matters: the first user inserted is the creator.
    pub users: IndexMap<UserId, Role>,
    /// FIFO of non-admin users, each appearing exactly once.
    pub admin_role_transfer_queue: VecDeque<UserId>,
    pub password: Option<String>,
    /// Flattened so the stored record carries `"type"` at the top level,
    /// the discriminator the load path dispatches on.
    #[serde(flatten)]
    pub rule_set: RuleSet,
}

impl Lobby {
    #[must_use]
    pub fn new(id: LobbyId, name: String, creator: UserId, rule_set: RuleSet, password: Option<String>) -> Self {
        let mut users = IndexMap::new();
        users.insert(creator, Role::Admin);
        Self {
            id,
            name,
            users,
            admin_role_transfer_queue: VecDeque::new(),
            password,
            rule_set,
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.users.len() >= self.rule_set.max_players()
    }

    #[must_use]
    pub fn admin(&self) -> Option<UserId> {
        self.users
            .iter()
            .find(|(_, role)| matches!(role, Role::Admin))
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identifiers::UserId;
    use uuid::Uuid;

    fn user(n: u8) -> UserId {
        UserId(Uuid::from_u128(n as u128))
    }

    #[test]
    fn new_lobby_has_single_admin() {
        let lobby = Lobby::new(
            LobbyId::new(),
            "room".into(),
            user(1),
            RuleSet::ConnectFour {
                time_for_each_player: Duration::from_secs(60),
            },
            None,
        );
        assert_eq!(lobby.admin(), Some(user(1)));
        assert!(lobby.admin_role_transfer_queue.is_empty());
    }

    #[test]
    fn is_full_respects_rule_set_capacity() {
        let mut lobby = Lobby::new(
            LobbyId::new(),
            "room".into(),
            user(1),
            RuleSet::ConnectFour {
                time_for_each_player: Duration::from_secs(60),
            },
            None,
        );
        assert!(!lobby.is_full());
        lobby.users.insert(user(2), Role::RegularMember);
        assert!(lobby.is_full());
    }
}
