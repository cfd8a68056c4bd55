//! Durable message bus integration over NATS JetStream.
//!
//! This crate does not declare the stream; it is an out-of-scope
//! external collaborator. `STREAM_NAME` and the subject lists below
//! document the topology the stream is expected to already have.

pub mod nats;

pub use self::nats::NatsEventPublisher;

/// The single JetStream stream every ingress/egress subject lives on.
pub const STREAM_NAME: &str = "games";

/// Ingress subjects this hub consumes, and the durable consumer name it
/// binds to each.
pub const INGRESS_SUBJECTS: &[(&str, &str)] = &[
    ("api_gateway.lobby.created", "connection_hub_lobby_created"),
    (
        "api_gateway.lobby.user_joined",
        "connection_hub_lobby_user_joined",
    ),
    (
        "api_gateway.lobby.user_left",
        "connection_hub_lobby_user_left",
    ),
    (
        "api_gateway.lobby.user_kicked",
        "connection_hub_lobby_user_kicked",
    ),
    ("api_gateway.game.created", "connection_hub_game_created"),
    (
        "api_gateway.game.player_disconnected",
        "connection_hub_game_player_disconnected",
    ),
    (
        "api_gateway.game.player_reconnected",
        "connection_hub_game_player_reconnected",
    ),
    (
        "api_gateway.presence.acknowledged",
        "connection_hub_presence_acknowledged",
    ),
    (
        "connect_four.game.ended",
        "connection_hub_connect_four_game_ended",
    ),
];

/// Pull timeout per `PullSub(timeout=0.2)` in the original's route wiring.
pub const PULL_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(200);
