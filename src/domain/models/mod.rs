//! Aggregates: `Lobby` and `Game`, plus the small value types they're built from.

pub mod game;
pub mod lobby;

pub use game::{Game, PlayerState, PlayerStatus};
pub use lobby::{Lobby, Role, RuleSet};
