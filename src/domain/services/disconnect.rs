//! Marks a player disconnected within a loaded `Game`.

use crate::domain::errors::DomainError;
use crate::domain::identifiers::UserId;
use crate::domain::models::{Game, PlayerStatus};

pub fn disconnect(game: &mut Game, user: UserId) -> Result<(), DomainError> {
    let state = game
        .players
        .get_mut(&user)
        .expect("disconnect: user not a player");

    if state.status == PlayerStatus::Disconnected {
        return Err(DomainError::UserIsDisconnectedFromGame);
    }

    state.id = crate::domain::identifiers::PlayerStateId::new();
    state.status = PlayerStatus::Disconnected;
    Ok(())
}
