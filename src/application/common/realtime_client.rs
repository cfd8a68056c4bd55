//! Best-effort realtime fan-out over an HTTP push API.

use crate::domain::identifiers::{GameId, LobbyId, UserId};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Global channel for lobby discovery broadcasts (lobby creation,
/// removal).
pub const LOBBY_BROWSER_CHANNEL: &str = "lobby_browser";

#[must_use]
pub fn user_channel(user_id: UserId) -> String {
    format!("#{}", user_id.hex())
}

#[must_use]
pub fn lobby_channel(lobby_id: LobbyId) -> String {
    format!("lobbies:{}", lobby_id.hex())
}

#[must_use]
pub fn game_channel(game_id: GameId) -> String {
    format!("games:{}", game_id.hex())
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Command {
    Publish { channel: String, data: Value },
    Unsubscribe { user_id: UserId, channel: String },
}

impl Command {
    #[must_use]
    pub fn publish<T: Serialize>(channel: String, data: &T) -> Self {
        Command::Publish {
            channel,
            data: serde_json::to_value(data).expect("realtime payload must serialize"),
        }
    }

    #[must_use]
    pub fn unsubscribe(user_id: UserId, channel: String) -> Self {
        Command::Unsubscribe { user_id, channel }
    }
}

#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("realtime fan-out request failed after exhausting retries: {0}")]
    Transport(#[source] anyhow::Error),
}

#[async_trait]
pub trait RealtimeClient: Send + Sync {
    async fn publish(&self, channel: &str, data: &Value) -> Result<(), RealtimeError>;
    async fn batch(&self, commands: Vec<Command>, parallel: bool) -> Result<(), RealtimeError>;
}
