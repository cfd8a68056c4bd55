//! Joining appends the new user to the admin transfer queue, so a
//! later admin departure hands off to the longest-waiting member.

use crate::domain::errors::DomainError;
use crate::domain::identifiers::UserId;
use crate::domain::models::{Lobby, Role};

pub fn join_lobby(lobby: &mut Lobby, user: UserId, password: Option<&str>) -> Result<(), DomainError> {
    if lobby.is_full() {
        return Err(DomainError::UserLimitReached);
    }
    match (&lobby.password, password) {
        (Some(_), None) => return Err(DomainError::PasswordRequired),
        (Some(expected), Some(given)) if expected != given => {
            return Err(DomainError::IncorrectPassword);
        }
        _ => {}
    }

    lobby.users.insert(user, Role::RegularMember);
    lobby.admin_role_transfer_queue.push_back(user);
    Ok(())
}
