//! One module per user-visible operation. Every processor follows the
//! same skeleton: load (+lock) -> validate -> domain transition -> queue
//! persistence/(un)schedule writes -> commit -> publish events ->
//! publish realtime (events are published after commit, not before —
//! see `DESIGN.md`).

mod acknowledge_presence;
mod create_game;
mod create_lobby;
mod disconnect_from_game;
mod end_game;
mod join_lobby;
mod kick_from_lobby;
mod leave_lobby;
mod reconnect_to_game;
mod remove_from_lobby;
mod try_to_disqualify_player;

pub use acknowledge_presence::acknowledge_presence;
pub use create_game::{create_game, CreateGameInput};
pub use create_lobby::{create_lobby, CreateLobbyInput};
pub use disconnect_from_game::{disconnect_from_game, DisconnectFromGameInput};
pub use end_game::{end_game, EndGameInput};
pub use join_lobby::{join_lobby, JoinLobbyInput};
pub use kick_from_lobby::{kick_from_lobby, KickFromLobbyInput};
pub use leave_lobby::{leave_lobby, LeaveLobbyInput};
pub use reconnect_to_game::{reconnect_to_game, ReconnectToGameInput};
pub use remove_from_lobby::{remove_from_lobby, RemoveFromLobbyInput};
pub use try_to_disqualify_player::{try_to_disqualify_player, TryToDisqualifyPlayerInput};

use crate::application::errors::ApplicationError;
use crate::domain::models::RuleSet;

/// Bounds shared by every processor that accepts user-supplied text.
/// Belongs here rather than in the ingress gateway, since the hub is
/// what actually enforces them.
pub(crate) const LOBBY_NAME_LEN: std::ops::RangeInclusive<usize> = 3..=128;
pub(crate) const LOBBY_PASSWORD_LEN: std::ops::RangeInclusive<usize> = 3..=64;

pub(crate) fn validate_lobby_name(name: &str) -> Result<(), ApplicationError> {
    if LOBBY_NAME_LEN.contains(&name.chars().count()) {
        Ok(())
    } else {
        Err(ApplicationError::InvalidLobbyName {
            min: *LOBBY_NAME_LEN.start(),
            max: *LOBBY_NAME_LEN.end(),
        })
    }
}

pub(crate) fn validate_lobby_password(password: Option<&str>) -> Result<(), ApplicationError> {
    match password {
        None => Ok(()),
        Some(p) if LOBBY_PASSWORD_LEN.contains(&p.chars().count()) => Ok(()),
        Some(_) => Err(ApplicationError::InvalidLobbyPassword {
            min: *LOBBY_PASSWORD_LEN.start(),
            max: *LOBBY_PASSWORD_LEN.end(),
        }),
    }
}

pub(crate) fn validate_rule_set(rule_set: &RuleSet) -> Result<(), ApplicationError> {
    let RuleSet::ConnectFour { time_for_each_player } = rule_set;
    let bounds = RuleSet::MIN_TIME_FOR_EACH_PLAYER..=RuleSet::MAX_TIME_FOR_EACH_PLAYER;
    if bounds.contains(time_for_each_player) {
        Ok(())
    } else {
        Err(ApplicationError::InvalidLobbyRuleSet {
            min: RuleSet::MIN_TIME_FOR_EACH_PLAYER,
            max: RuleSet::MAX_TIME_FOR_EACH_PLAYER,
        })
    }
}
