//! `TaskScheduler` backed by the KV store, built directly on the
//! `KvStore` port rather than pulling in a separate job-queue crate.
//!
//! Each task is stored at `tasks:<task_id>` (payload) with a companion
//! index entry `tasks:due:<execute_at_millis>:<task_id>` that the
//! executor poller scans and filters by elapsed deadline. Because the
//! index key embeds the deadline, rescheduling (same id, new deadline)
//! follows the same delete-old-then-write-new pattern as the data
//! mappers' mutation rule.

use crate::application::common::task_scheduler::{Task, TaskScheduler, TaskSchedulerError};
use crate::domain::identifiers::TaskId;
use crate::infrastructure::kv::{KvError, KvStore, KvTransaction};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

fn payload_key(id: &TaskId) -> String {
    format!("tasks:{id}")
}

fn due_index_key(id: &TaskId, execute_at: DateTime<Utc>) -> String {
    format!("tasks:due:{}:{}", execute_at.timestamp_millis(), id)
}

fn due_scan_pattern() -> &'static str {
    "tasks:due:*"
}

fn transport(err: KvError) -> TaskSchedulerError {
    TaskSchedulerError::Transport(err.into())
}

pub struct TaskSchedulerImpl {
    kv: Arc<dyn KvStore>,
}

impl TaskSchedulerImpl {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    async fn queue_one(&self, task: &Task, tx: &KvTransaction) -> Result<(), TaskSchedulerError> {
        let id = task.id().clone();
        let execute_at = execute_at_of(task);

        // Upsert by id: if a stale index entry exists at a different
        // deadline, remove it first so exactly one survives.
        if let Some(old) = self
            .kv
            .get(&payload_key(&id))
            .await
            .map_err(transport)?
        {
            if let Ok(old_task) = serde_json::from_slice::<Task>(&old) {
                let old_index = due_index_key(old_task.id(), execute_at_of(&old_task));
                tx.queue_delete(vec![old_index]).await;
            }
        }

        let bytes = serde_json::to_vec(task).map_err(|e| TaskSchedulerError::Transport(e.into()))?;
        tx.queue_set(payload_key(&id), bytes, None).await;
        tx.queue_set(due_index_key(&id, execute_at), id.to_string().into_bytes(), None)
            .await;
        Ok(())
    }
}

fn execute_at_of(task: &Task) -> DateTime<Utc> {
    match task {
        Task::RemoveFromLobby(t) => t.execute_at,
        Task::DisconnectFromGame(t) => t.execute_at,
        Task::TryToDisqualifyPlayer(t) => t.execute_at,
    }
}

#[async_trait]
impl TaskScheduler for TaskSchedulerImpl {
    async fn schedule(&self, task: Task, tx: &KvTransaction) -> Result<(), TaskSchedulerError> {
        self.queue_one(&task, tx).await
    }

    async fn schedule_many(&self, tasks: Vec<Task>, tx: &KvTransaction) -> Result<(), TaskSchedulerError> {
        for task in &tasks {
            self.queue_one(task, tx).await?;
        }
        Ok(())
    }

    async fn unschedule(&self, id: &TaskId, tx: &KvTransaction) -> Result<(), TaskSchedulerError> {
        if let Some(bytes) = self.kv.get(&payload_key(id)).await.map_err(transport)? {
            if let Ok(task) = serde_json::from_slice::<Task>(&bytes) {
                tx.queue_delete(vec![due_index_key(id, execute_at_of(&task))])
                    .await;
            }
        }
        tx.queue_delete(vec![payload_key(id)]).await;
        Ok(())
    }

    async fn unschedule_many(&self, ids: &[TaskId], tx: &KvTransaction) -> Result<(), TaskSchedulerError> {
        for id in ids {
            self.unschedule(id, tx).await?;
        }
        Ok(())
    }

    async fn due_tasks(&self, now: DateTime<Utc>, batch: usize) -> Result<Vec<Task>, TaskSchedulerError> {
        let index_keys = self.kv.scan(due_scan_pattern(), batch).await.map_err(transport)?;
        let mut due = Vec::new();
        for index_key in index_keys {
            let Some(millis) = index_key
                .strip_prefix("tasks:due:")
                .and_then(|rest| rest.split(':').next())
                .and_then(|s| s.parse::<i64>().ok())
            else {
                continue;
            };
            let Some(deadline) = DateTime::<Utc>::from_timestamp_millis(millis) else {
                continue;
            };
            if deadline > now {
                continue;
            }
            let Some(id_bytes) = self.kv.get(&index_key).await.map_err(transport)? else {
                continue;
            };
            let Ok(task_id) = String::from_utf8(id_bytes) else {
                continue;
            };
            if let Some(payload) = self
                .kv
                .get(&payload_key(&TaskId(task_id)))
                .await
                .map_err(transport)?
            {
                if let Ok(task) = serde_json::from_slice::<Task>(&payload) {
                    due.push(task);
                }
            }
        }
        Ok(due)
    }
}
