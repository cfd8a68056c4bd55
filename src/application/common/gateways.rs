//! Persistence ports for the two aggregates; concrete impls live under
//! `infrastructure::data_mappers`.
//!
//! Reads (`by_id`/`by_user_id`/`by_player_id`) hit the KV store directly
//! and, when `acquire` is set, take the entity's lock through the given
//! `LockManager`. Writes queue onto the request's `KvTransaction`
//! instead of writing immediately, so every mutation made while
//! processing one command becomes visible atomically at commit.

use crate::domain::identifiers::{GameId, LobbyId, UserId};
use crate::domain::models::{Game, Lobby};
use crate::infrastructure::kv::{KvError, KvTransaction};
use crate::infrastructure::lock_manager::LockManager;
use async_trait::async_trait;

#[async_trait]
pub trait LobbyGateway: Send + Sync {
    async fn by_id(&self, id: LobbyId, acquire: bool, locks: &LockManager) -> Result<Option<Lobby>, KvError>;
    async fn by_user_id(
        &self,
        user_id: UserId,
        acquire: bool,
        locks: &LockManager,
    ) -> Result<Option<Lobby>, KvError>;
    async fn save(&self, lobby: &Lobby, tx: &KvTransaction) -> Result<(), KvError>;
    async fn update(&self, old: &Lobby, new: &Lobby, tx: &KvTransaction) -> Result<(), KvError>;
    async fn delete(&self, lobby: &Lobby, tx: &KvTransaction) -> Result<(), KvError>;
}

#[async_trait]
pub trait GameGateway: Send + Sync {
    async fn by_id(&self, id: GameId, acquire: bool, locks: &LockManager) -> Result<Option<Game>, KvError>;
    async fn by_player_id(
        &self,
        user_id: UserId,
        acquire: bool,
        locks: &LockManager,
    ) -> Result<Option<Game>, KvError>;
    async fn save(&self, game: &Game, tx: &KvTransaction) -> Result<(), KvError>;
    async fn update(&self, old: &Game, new: &Game, tx: &KvTransaction) -> Result<(), KvError>;
    async fn delete(&self, game: &Game, tx: &KvTransaction) -> Result<(), KvError>;
}
