//! Restores a disconnected player to `Connected` within a loaded `Game`.

use crate::domain::errors::DomainError;
use crate::domain::identifiers::UserId;
use crate::domain::models::{Game, PlayerStatus};

pub fn reconnect(game: &mut Game, user: UserId) -> Result<(), DomainError> {
    let state = game
        .players
        .get_mut(&user)
        .expect("reconnect: user not a player");

    if state.status == PlayerStatus::Connected {
        return Err(DomainError::UserIsConnectedToGame);
    }

    state.id = crate::domain::identifiers::PlayerStateId::new();
    state.status = PlayerStatus::Connected;
    Ok(())
}
