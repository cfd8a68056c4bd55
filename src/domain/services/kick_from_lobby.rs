//! Admin-only removal of another lobby member.

use crate::domain::errors::DomainError;
use crate::domain::identifiers::UserId;
use crate::domain::models::{Lobby, Role};

pub fn kick_from_lobby(lobby: &mut Lobby, target: UserId, caller: UserId) -> Result<(), DomainError> {
    if lobby.users.get(&caller) != Some(&Role::Admin) {
        return Err(DomainError::UserIsNotAdmin);
    }
    if target == caller {
        return Err(DomainError::UserIsTryingKickHimself);
    }

    lobby.users.shift_remove(&target);
    lobby.admin_role_transfer_queue.retain(|id| *id != target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identifiers::LobbyId;
    use crate::domain::models::RuleSet;
    use std::time::Duration;
    use uuid::Uuid;

    fn user(n: u8) -> UserId {
        UserId(Uuid::from_u128(n as u128))
    }

    fn lobby() -> Lobby {
        let mut l = Lobby::new(
            LobbyId::new(),
            "room".into(),
            user(1),
            RuleSet::ConnectFour {
                time_for_each_player: Duration::from_secs(60),
            },
            None,
        );
        l.users.insert(user(2), Role::RegularMember);
        l.admin_role_transfer_queue.push_back(user(2));
        l
    }

    #[test]
    fn non_admin_cannot_kick() {
        let mut l = lobby();
        let err = kick_from_lobby(&mut l, user(1), user(2)).unwrap_err();
        assert_eq!(err, DomainError::UserIsNotAdmin);
    }

    #[test]
    fn cannot_kick_self() {
        let mut l = lobby();
        let err = kick_from_lobby(&mut l, user(1), user(1)).unwrap_err();
        assert_eq!(err, DomainError::UserIsTryingKickHimself);
    }

    #[test]
    fn admin_kicks_member() {
        let mut l = lobby();
        kick_from_lobby(&mut l, user(2), user(1)).unwrap();
        assert!(!l.users.contains_key(&user(2)));
        assert!(!l.admin_role_transfer_queue.contains(&user(2)));
    }
}
