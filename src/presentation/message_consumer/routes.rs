//! Subject -> command dispatch. Matches one-for-one against
//! `infrastructure::message_broker::INGRESS_SUBJECTS`.

use crate::application::command_processors::{
    acknowledge_presence, create_game, create_lobby, disconnect_from_game, end_game, join_lobby,
    kick_from_lobby, leave_lobby, reconnect_to_game, CreateGameInput, CreateLobbyInput,
    DisconnectFromGameInput, EndGameInput, JoinLobbyInput, KickFromLobbyInput, LeaveLobbyInput,
    ReconnectToGameInput,
};
use crate::application::common::identity_provider::IdentityProvider as _;
use crate::application::common::RequestContext;
use crate::application::errors::{ApplicationError, ProcessorError};
use crate::domain::identifiers::{GameId, LobbyId, UserId};
use crate::domain::models::RuleSet;
use crate::infrastructure::identity::MessageIdentityProvider;
use serde::Deserialize;
use serde_json::Value;


/// Loosely-typed ingress body: every route pulls out only the fields it
/// needs, matching the original's dict-shaped event bodies now with
/// serde validation at the edge.
#[derive(Debug, Deserialize, Default)]
pub struct IngressBody {
    pub user_id: Option<UserId>,
    pub lobby_id: Option<LobbyId>,
    pub game_id: Option<GameId>,
    pub target: Option<UserId>,
    pub name: Option<String>,
    pub rule_set: Option<RuleSet>,
    pub password: Option<String>,
}

pub fn parse_body(raw: &[u8]) -> Result<IngressBody, serde_json::Error> {
    serde_json::from_slice(raw)
}

/// `raw` here is the same bytes `parse_body` already decoded into
/// `body`; kept around only so the operation-id middleware can read it
/// as a generic `Value` without re-deserializing into `IngressBody`.
pub fn parse_value(raw: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(raw)
}

async fn current_user(ctx_body: &IngressBody) -> Result<UserId, ProcessorError> {
    let identity = MessageIdentityProvider::new(ctx_body.user_id);
    identity
        .user_id()
        .await
        .map_err(|_| ApplicationError::MissingIdentity.into())
}

/// Routes one decoded ingress message to its command processor.
/// Unrecognized subjects are a logged no-op — the stream may carry
/// subjects this consumer doesn't bind a consumer to.
pub async fn route(ctx: &RequestContext, subject: &str, body: IngressBody) -> Result<(), ProcessorError> {
    match subject {
        "api_gateway.lobby.created" => {
            let user = current_user(&body).await?;
            let rule_set = body.rule_set.ok_or(ApplicationError::InvalidLobbyRuleSet {
                min: RuleSet::MIN_TIME_FOR_EACH_PLAYER,
                max: RuleSet::MAX_TIME_FOR_EACH_PLAYER,
            })?;
            create_lobby(
                ctx,
                user,
                CreateLobbyInput {
                    name: body.name.unwrap_or_default(),
                    rule_set,
                    password: body.password,
                },
            )
            .await
        }
        "api_gateway.lobby.user_joined" => {
            let user = current_user(&body).await?;
            let lobby_id = body.lobby_id.ok_or(ApplicationError::LobbyDoesNotExist)?;
            join_lobby(
                ctx,
                user,
                JoinLobbyInput {
                    lobby_id,
                    password: body.password,
                },
            )
            .await
        }
        "api_gateway.lobby.user_left" => {
            let user = current_user(&body).await?;
            let lobby_id = body.lobby_id.ok_or(ApplicationError::LobbyDoesNotExist)?;
            leave_lobby(ctx, user, LeaveLobbyInput { lobby_id }).await
        }
        "api_gateway.lobby.user_kicked" => {
            let user = current_user(&body).await?;
            let lobby_id = body.lobby_id.ok_or(ApplicationError::LobbyDoesNotExist)?;
            let target = body.target.ok_or(ApplicationError::MissingKickTarget)?;
            kick_from_lobby(ctx, user, KickFromLobbyInput { lobby_id, target }).await
        }
        "api_gateway.game.created" => {
            let user = current_user(&body).await?;
            let lobby_id = body.lobby_id.ok_or(ApplicationError::LobbyDoesNotExist)?;
            create_game(ctx, user, CreateGameInput { lobby_id }).await
        }
        "api_gateway.game.player_disconnected" => {
            let user = current_user(&body).await?;
            let game_id = body.game_id.ok_or(ApplicationError::GameDoesNotExist)?;
            disconnect_from_game(ctx, user, DisconnectFromGameInput { game_id }).await
        }
        "api_gateway.game.player_reconnected" => {
            let user = current_user(&body).await?;
            let game_id = body.game_id.ok_or(ApplicationError::GameDoesNotExist)?;
            reconnect_to_game(ctx, user, ReconnectToGameInput { game_id }).await
        }
        "api_gateway.presence.acknowledged" => {
            let user = current_user(&body).await?;
            acknowledge_presence(ctx, user).await
        }
        "connect_four.game.ended" => {
            let game_id = body.game_id.ok_or(ApplicationError::GameDoesNotExist)?;
            end_game(ctx, EndGameInput { game_id }).await
        }
        other => {
            tracing::warn!(subject = other, "no route bound to this ingress subject");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_body() {
        let body = parse_body(br#"{"user_id": "019342b6-7f0b-7c21-9c3e-7b5b6b1e2b10"}"#).unwrap();
        assert!(body.user_id.is_some());
        assert!(body.lobby_id.is_none());
    }
}
