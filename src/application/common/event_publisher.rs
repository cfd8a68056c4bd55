//! Domain events published to the durable bus.

use crate::domain::identifiers::{GameId, LobbyId, OperationId, UserId};
use crate::domain::models::RuleSet;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    LobbyCreated {
        lobby_id: LobbyId,
        name: String,
        admin_id: UserId,
        rule_set: RuleSet,
    },
    UserJoinedLobby {
        lobby_id: LobbyId,
        user_id: UserId,
    },
    UserLeftLobby {
        lobby_id: LobbyId,
        user_id: UserId,
        new_admin_id: Option<UserId>,
    },
    UserRemovedFromLobby {
        lobby_id: LobbyId,
        user_id: UserId,
        new_admin_id: Option<UserId>,
    },
    UserKickedFromLobby {
        lobby_id: LobbyId,
        user_id: UserId,
    },
    ConnectFourGameCreated {
        game_id: GameId,
        lobby_id: LobbyId,
        first_player_id: UserId,
        second_player_id: UserId,
        time_for_each_player: Duration,
        created_at: DateTime<Utc>,
    },
    PlayerDisconnected {
        game_id: GameId,
        player_id: UserId,
    },
    PlayerReconnected {
        game_id: GameId,
        player_id: UserId,
    },
    PlayerDisqualified {
        game_id: GameId,
        player_id: UserId,
    },
}

impl Event {
    /// Egress subject for this event kind.
    #[must_use]
    pub fn subject(&self) -> &'static str {
        match self {
            Event::LobbyCreated { .. } => "connection_hub.lobby.created",
            Event::UserJoinedLobby { .. } => "connection_hub.lobby.user_joined",
            Event::UserLeftLobby { .. } => "connection_hub.lobby.user_left",
            Event::UserRemovedFromLobby { .. } => "connection_hub.lobby.user_removed",
            Event::UserKickedFromLobby { .. } => "connection_hub.lobby.user_kicked",
            Event::ConnectFourGameCreated { .. } => "connection_hub.connect_four.game.created",
            Event::PlayerDisconnected { .. } => {
                "connection_hub.connect_four.game.player_disconnected"
            }
            Event::PlayerReconnected { .. } => {
                "connection_hub.connect_four.game.player_reconnected"
            }
            Event::PlayerDisqualified { .. } => {
                "connection_hub.connect_four.game.player_disqualified"
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum EventPublisherError {
    #[error("failed to publish event to message bus: {0}")]
    Transport(#[source] anyhow::Error),
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: Event, operation_id: OperationId) -> Result<(), EventPublisherError>;
}
