//! Builds a `Game` whose players are the lobby's users in the same
//! order, each starting `Connected` with a fresh reconnect budget.

use crate::domain::errors::DomainError;
use crate::domain::identifiers::{GameId, UserId};
use crate::domain::models::{Game, Lobby, PlayerState, Role};
use chrono::Utc;
use indexmap::IndexMap;
use std::time::Duration;

pub fn create_game(lobby: &Lobby, caller: UserId, reconnect_budget: Duration) -> Result<Game, DomainError> {
    if lobby.users.get(&caller) != Some(&Role::Admin) {
        return Err(DomainError::UserIsNotAdmin);
    }

    let players: IndexMap<UserId, PlayerState> = lobby
        .users
        .keys()
        .map(|user_id| (*user_id, PlayerState::new_connected(reconnect_budget)))
        .collect();

    Ok(Game {
        id: GameId::new(),
        players,
        created_at: Utc::now(),
        rule_set: lobby.rule_set,
    })
}
