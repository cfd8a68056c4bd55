//! `LobbyGateway`/`GameGateway` implementations over the KV store.

pub mod game;
pub mod lobby;

pub use game::GameMapper;
pub use lobby::LobbyMapper;

use std::time::Duration;

/// Fallback TTL for lobby/game records when a mapper is built without
/// an explicit one; deployments override it via
/// `CONNECTION_HUB_ENTITY_TTL_SECS`.
pub const DEFAULT_ENTITY_TTL: Duration = Duration::from_secs(60 * 60 * 24);
