//! `GameGateway` over the KV store. Same key-schema/mutation-rule
//! shape as `lobby.rs`, keyed on player ids.

use crate::application::common::gateways::GameGateway;
use crate::domain::identifiers::{GameId, UserId};
use crate::domain::models::Game;
use crate::infrastructure::kv::{KvError, KvStore, KvTransaction};
use crate::infrastructure::lock_manager::LockManager;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

fn sorted_hex_joined(player_ids: impl Iterator<Item = UserId>) -> String {
    let mut hexes: Vec<String> = player_ids.map(|id| id.hex()).collect();
    hexes.sort_unstable();
    hexes.join(":")
}

fn key(game_id: GameId, player_ids: impl Iterator<Item = UserId>) -> String {
    format!(
        "games:id:{}:player_ids:{}",
        game_id.hex(),
        sorted_hex_joined(player_ids)
    )
}

fn id_pattern(game_id: GameId) -> String {
    format!("games:id:{}:player_ids:*", game_id.hex())
}

fn player_pattern(player_id: UserId) -> String {
    format!("games:id:*:player_ids:*{}*", player_id.hex())
}

pub struct GameMapper {
    kv: Arc<dyn KvStore>,
    ttl: Duration,
}

impl GameMapper {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>, ttl: Duration) -> Self {
        Self { kv, ttl }
    }

    async fn load_by_pattern(&self, pattern: &str) -> Result<Option<Game>, KvError> {
        let keys = self.kv.scan(pattern, 10).await?;
        let Some(found_key) = keys.into_iter().next() else {
            return Ok(None);
        };
        let Some(bytes) = self.kv.get(&found_key).await? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| KvError::Transport(e.into()))
    }
}

#[async_trait]
impl GameGateway for GameMapper {
    async fn by_id(&self, id: GameId, acquire: bool, locks: &LockManager) -> Result<Option<Game>, KvError> {
        if acquire {
            locks.acquire(&id.hex()).await?;
        }
        self.load_by_pattern(&id_pattern(id)).await
    }

    async fn by_player_id(
        &self,
        user_id: UserId,
        acquire: bool,
        locks: &LockManager,
    ) -> Result<Option<Game>, KvError> {
        let Some(game) = self.load_by_pattern(&player_pattern(user_id)).await? else {
            return Ok(None);
        };
        if acquire {
            locks.acquire(&game.id.hex()).await?;
        }
        Ok(Some(game))
    }

    async fn save(&self, game: &Game, tx: &KvTransaction) -> Result<(), KvError> {
        let bytes = serde_json::to_vec(game).map_err(|e| KvError::Transport(e.into()))?;
        tx.queue_set(key(game.id, game.players.keys().copied()), bytes, Some(self.ttl))
            .await;
        Ok(())
    }

    async fn update(&self, old: &Game, new: &Game, tx: &KvTransaction) -> Result<(), KvError> {
        let old_key = key(old.id, old.players.keys().copied());
        tx.queue_delete(vec![old_key]).await;
        self.save(new, tx).await
    }

    async fn delete(&self, game: &Game, tx: &KvTransaction) -> Result<(), KvError> {
        let keys = self.kv.scan(&id_pattern(game.id), 10).await?;
        tx.queue_delete(keys).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(n: u8) -> UserId {
        UserId(Uuid::from_u128(n as u128))
    }

    #[test]
    fn key_embeds_sorted_player_hexes() {
        let game_id = GameId(Uuid::nil());
        let k = key(game_id, vec![user(2), user(1)].into_iter());
        assert!(k.starts_with("games:id:"));
        assert!(k.contains(":player_ids:"));
    }
}
