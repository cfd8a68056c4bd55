//! One transition shared by voluntary departure, admin kick, and the
//! task-fired eviction when a member never connects.

use crate::domain::identifiers::UserId;
use crate::domain::models::{Lobby, Role};

/// Removes `user` from `lobby`. The caller is responsible for having
/// confirmed `user` is actually a member (e.g. via the gateway lookup
/// that loaded this lobby); this function assumes it.
///
/// Returns `(lobby_now_empty, promoted_admin)`.
pub fn remove_from_lobby(lobby: &mut Lobby, user: UserId) -> (bool, Option<UserId>) {
    let removed_role = lobby.users.shift_remove(user);
    debug_assert!(removed_role.is_some(), "remove_from_lobby: user not a member");

    if lobby.users.is_empty() {
        return (true, None);
    }

    if removed_role == Some(Role::Admin) {
        let next_admin = lobby
            .admin_role_transfer_queue
            .pop_front()
            .expect("invariant: non-empty lobby missing an admin has a transfer queue entry");
        lobby.users.insert(next_admin, Role::Admin);
        (false, Some(next_admin))
    } else {
        lobby.admin_role_transfer_queue.retain(|id| *id != user);
        (false, None)
    }
}
