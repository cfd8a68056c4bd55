//! `LobbyGateway` over the KV store: key schema and mutation rule for
//! lobby records.

use crate::application::common::gateways::LobbyGateway;
use crate::domain::identifiers::{LobbyId, UserId};
use crate::domain::models::Lobby;
use crate::infrastructure::kv::{KvError, KvStore, KvTransaction};
use crate::infrastructure::lock_manager::LockManager;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

fn sorted_hex_joined(user_ids: impl Iterator<Item = UserId>) -> String {
    let mut hexes: Vec<String> = user_ids.map(|id| id.hex()).collect();
    hexes.sort_unstable();
    hexes.join(":")
}

fn key(lobby_id: LobbyId, user_ids: impl Iterator<Item = UserId>) -> String {
    format!(
        "lobbies:id:{}:user_ids:{}",
        lobby_id.hex(),
        sorted_hex_joined(user_ids)
    )
}

fn id_pattern(lobby_id: LobbyId) -> String {
    format!("lobbies:id:{}:user_ids:*", lobby_id.hex())
}

fn user_pattern(user_id: UserId) -> String {
    format!("lobbies:id:*:user_ids:*{}*", user_id.hex())
}

pub struct LobbyMapper {
    kv: Arc<dyn KvStore>,
    ttl: Duration,
}

impl LobbyMapper {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>, ttl: Duration) -> Self {
        Self { kv, ttl }
    }

    async fn load_by_pattern(&self, pattern: &str) -> Result<Option<(String, Lobby)>, KvError> {
        let keys = self.kv.scan(pattern, 10).await?;
        let Some(found_key) = keys.into_iter().next() else {
            return Ok(None);
        };
        let Some(bytes) = self.kv.get(&found_key).await? else {
            return Ok(None);
        };
        let lobby: Lobby = serde_json::from_slice(&bytes)
            .map_err(|e| KvError::Transport(e.into()))?;
        Ok(Some((found_key, lobby)))
    }
}

#[async_trait]
impl LobbyGateway for LobbyMapper {
    async fn by_id(&self, id: LobbyId, acquire: bool, locks: &LockManager) -> Result<Option<Lobby>, KvError> {
        if acquire {
            locks.acquire(&id.hex()).await?;
        }
        Ok(self.load_by_pattern(&id_pattern(id)).await?.map(|(_, l)| l))
    }

    async fn by_user_id(
        &self,
        user_id: UserId,
        acquire: bool,
        locks: &LockManager,
    ) -> Result<Option<Lobby>, KvError> {
        let Some((_, lobby)) = self.load_by_pattern(&user_pattern(user_id)).await? else {
            return Ok(None);
        };
        if acquire {
            locks.acquire(&lobby.id.hex()).await?;
        }
        Ok(Some(lobby))
    }

    async fn save(&self, lobby: &Lobby, tx: &KvTransaction) -> Result<(), KvError> {
        let bytes = serde_json::to_vec(lobby).map_err(|e| KvError::Transport(e.into()))?;
        tx.queue_set(key(lobby.id, lobby.users.keys().copied()), bytes, Some(self.ttl))
            .await;
        Ok(())
    }

    async fn update(&self, old: &Lobby, new: &Lobby, tx: &KvTransaction) -> Result<(), KvError> {
        // The user set is embedded in the key, so any membership change
        // means the old key no longer matches the new record: delete
        // then rewrite in the same pipeline. Re-deriving the
        // key instead of re-scanning costs one extra delete when the
        // user set didn't actually change — considered an acceptable
        // trade rather than a conditional scan.
        let old_key = key(old.id, old.users.keys().copied());
        tx.queue_delete(vec![old_key]).await;
        self.save(new, tx).await
    }

    async fn delete(&self, lobby: &Lobby, tx: &KvTransaction) -> Result<(), KvError> {
        let keys = self.kv.scan(&id_pattern(lobby.id), 10).await?;
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
    fn key_embeds_sorted_user_hexes() {
        let lobby_id = LobbyId(Uuid::nil());
        let k = key(lobby_id, vec![user(2), user(1)].into_iter());
        assert!(k.starts_with("lobbies:id:"));
        assert!(k.contains(":user_ids:"));
        let suffix = k.split(":user_ids:").nth(1).unwrap();
        let parts: Vec<&str> = suffix.split(':').collect();
        assert_eq!(parts, vec![user(1).hex(), user(2).hex()]);
    }

    #[test]
    fn user_pattern_contains_hex() {
        let pattern = user_pattern(user(7));
        assert!(pattern.contains(&user(7).hex()));
        assert!(pattern.starts_with("lobbies:id:*"));
    }
}
