//! Deferred tasks with deterministic ids: upserting a task under the
//! same id replaces its prior deadline, making rescheduling idempotent.

use crate::domain::identifiers::{GameId, LobbyId, OperationId, PlayerStateId, TaskId, UserId};
use crate::infrastructure::kv::KvTransaction;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default presence grace window: the time from last heartbeat to
/// automatic lobby-removal or game-disconnect.
pub const PRESENCE_GRACE: Duration = Duration::from_secs(15);

/// `now + duration`, saturating rather than panicking on overflow —
/// both durations used in this module are small constants, but a
/// panic here would take down a whole request over an edge case that
/// can't occur.
#[must_use]
pub fn deadline_after(duration: Duration) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::zero())
}

#[must_use]
pub fn remove_from_lobby_task_id(lobby_id: LobbyId, user_id: UserId) -> TaskId {
    TaskId(format!("remove_from_lobby:{}:{}", lobby_id.hex(), user_id.hex()))
}

#[must_use]
pub fn disconnect_from_game_task_id(game_id: GameId, player_id: UserId) -> TaskId {
    TaskId(format!(
        "disconnect_from_game:{}:{}",
        game_id.hex(),
        player_id.hex()
    ))
}

#[must_use]
pub fn try_to_disqualify_player_task_id(player_state_id: PlayerStateId) -> TaskId {
    TaskId(format!(
        "try_to_disqualify_player:{}",
        player_state_id.hex()
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveFromLobbyTask {
    pub id: TaskId,
    pub execute_at: DateTime<Utc>,
    pub operation_id: OperationId,
    pub lobby_id: LobbyId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisconnectFromGameTask {
    pub id: TaskId,
    pub execute_at: DateTime<Utc>,
    pub operation_id: OperationId,
    pub game_id: GameId,
    pub player_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TryToDisqualifyPlayerTask {
    pub id: TaskId,
    pub execute_at: DateTime<Utc>,
    pub operation_id: OperationId,
    pub game_id: GameId,
    pub player_id: UserId,
    pub player_state_id: PlayerStateId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Task {
    RemoveFromLobby(RemoveFromLobbyTask),
    DisconnectFromGame(DisconnectFromGameTask),
    TryToDisqualifyPlayer(TryToDisqualifyPlayerTask),
}

impl Task {
    #[must_use]
    pub fn id(&self) -> &TaskId {
        match self {
            Task::RemoveFromLobby(t) => &t.id,
            Task::DisconnectFromGame(t) => &t.id,
            Task::TryToDisqualifyPlayer(t) => &t.id,
        }
    }

    #[must_use]
    pub fn operation_id(&self) -> OperationId {
        match self {
            Task::RemoveFromLobby(t) => t.operation_id,
            Task::DisconnectFromGame(t) => t.operation_id,
            Task::TryToDisqualifyPlayer(t) => t.operation_id,
        }
    }
}

#[derive(Debug, Error)]
pub enum TaskSchedulerError {
    #[error("failed to reach task scheduler backend: {0}")]
    Transport(#[source] anyhow::Error),
}

/// Upsert-by-id scheduler: scheduling the same id twice replaces the
/// first. Unscheduling a missing id is a no-op.
#[async_trait]
pub trait TaskScheduler: Send + Sync {
    async fn schedule(&self, task: Task, tx: &KvTransaction) -> Result<(), TaskSchedulerError>;
    async fn schedule_many(&self, tasks: Vec<Task>, tx: &KvTransaction) -> Result<(), TaskSchedulerError>;
    async fn unschedule(&self, id: &TaskId, tx: &KvTransaction) -> Result<(), TaskSchedulerError>;
    async fn unschedule_many(&self, ids: &[TaskId], tx: &KvTransaction) -> Result<(), TaskSchedulerError>;

    /// Tasks whose deadline has elapsed, for the task-executor poller.
    /// Delivery is at-least-once; a task remains due until its
    /// own executor unschedules it.
    async fn due_tasks(&self, now: DateTime<Utc>, batch: usize) -> Result<Vec<Task>, TaskSchedulerError>;
}
