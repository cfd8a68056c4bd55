//! Errors raised by pure domain transitions.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("lobby is at capacity")]
    UserLimitReached,
    #[error("lobby requires a password")]
    PasswordRequired,
    #[error("incorrect lobby password")]
    IncorrectPassword,
    #[error("caller is not the lobby admin")]
    UserIsNotAdmin,
    #[error("user cannot kick themselves")]
    UserIsTryingKickHimself,
    #[error("player is already disconnected")]
    UserIsDisconnectedFromGame,
    #[error("player is already connected")]
    UserIsConnectedToGame,
}
