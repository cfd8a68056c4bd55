//! Pure state-transition functions over a loaded `Lobby` or `Game`.
//!
//! Each function takes `&mut` the aggregate and either mutates it in
//! place or returns a freshly built one; none perform I/O. Preconditions
//! that are a matter of "does this entity/user exist at all" are the
//! caller's (application layer's) responsibility — these functions only
//! enforce rules intrinsic to the aggregate itself.

pub mod create_game;
pub mod create_lobby;
pub mod disconnect;
pub mod join_lobby;
pub mod kick_from_lobby;
pub mod reconnect;
pub mod remove_from_lobby;
pub mod try_to_disqualify;

pub use create_game::create_game;
pub use create_lobby::create_lobby;
pub use disconnect::disconnect;
pub use join_lobby::join_lobby;
pub use kick_from_lobby::kick_from_lobby;
pub use reconnect::reconnect;
pub use remove_from_lobby::remove_from_lobby;
pub use try_to_disqualify::try_to_disqualify;
