//! Application-level errors: input validation and state-precondition
//! failures. Domain-rule errors (`DomainError`) are wrapped rather than
//! duplicated.

use crate::domain::errors::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("lobby name must be between {min} and {max} characters")]
    InvalidLobbyName { min: usize, max: usize },
    #[error("rule set's time-for-each-player must be between {min:?} and {max:?}")]
    InvalidLobbyRuleSet {
        min: std::time::Duration,
        max: std::time::Duration,
    },
    #[error("lobby password must be between {min} and {max} characters")]
    InvalidLobbyPassword { min: usize, max: usize },

    #[error("current user is already in a lobby")]
    CurrentUserInLobby,
    #[error("current user is already in a game")]
    CurrentUserInGame,
    #[error("current user is not in a lobby")]
    CurrentUserNotInLobby,
    #[error("current user is not in a game")]
    CurrentUserNotInGame,
    #[error("user is not in the lobby")]
    UserNotInLobby,
    #[error("user is not in the game")]
    UserNotInGame,
    #[error("lobby does not exist")]
    LobbyDoesNotExist,
    #[error("game does not exist")]
    GameDoesNotExist,

    #[error("message carried no resolvable user id")]
    MissingIdentity,
    #[error("message carried no resolvable kick target")]
    MissingKickTarget,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Everything a command processor can fail with. Task executors
/// swallow `Application` as a benign no-op; `Transport` always bubbles
/// for bounded retry.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error(transparent)]
    Application(#[from] ApplicationError),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl From<DomainError> for ProcessorError {
    fn from(value: DomainError) -> Self {
        ProcessorError::Application(ApplicationError::Domain(value))
    }
}

impl From<crate::infrastructure::kv::KvError> for ProcessorError {
    fn from(value: crate::infrastructure::kv::KvError) -> Self {
        ProcessorError::Transport(value.into())
    }
}

impl From<crate::application::common::EventPublisherError> for ProcessorError {
    fn from(value: crate::application::common::EventPublisherError) -> Self {
        ProcessorError::Transport(value.into())
    }
}

impl From<crate::application::common::TaskSchedulerError> for ProcessorError {
    fn from(value: crate::application::common::TaskSchedulerError) -> Self {
        ProcessorError::Transport(value.into())
    }
}

impl From<crate::application::common::RealtimeError> for ProcessorError {
    fn from(value: crate::application::common::RealtimeError) -> Self {
        ProcessorError::Transport(value.into())
    }
}
