//! Builds a fresh `Lobby` with its creator as sole admin.

use crate::domain::identifiers::{LobbyId, UserId};
use crate::domain::models::{Lobby, RuleSet};

#[must_use]
pub fn create_lobby(
    name: String,
    creator: UserId,
    rule_set: RuleSet,
    password: Option<String>,
) -> Lobby {
    Lobby::new(LobbyId::new(), name, creator, rule_set, password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Role;
    use std::time::Duration;
    use uuid::Uuid;

    #[test]
    fn creator_is_sole_admin_with_empty_transfer_queue() {
        let creator = UserId(Uuid::new_v4());
        let lobby = create_lobby(
            "room".into(),
            creator,
            RuleSet::ConnectFour {
                time_for_each_player: Duration::from_secs(60),
            },
            None,
        );
        assert_eq!(lobby.users.get(&creator), Some(&Role::Admin));
        assert!(lobby.admin_role_transfer_queue.is_empty());
    }
}
