//! KV store abstraction; concrete backend in `redis.rs`.

pub mod redis;

pub use self::redis::RedisKvStore;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("kv transport error: {0}")]
    Transport(#[source] anyhow::Error),
}

/// One write queued into a request's pipeline.
#[derive(Debug, Clone)]
pub enum PipelineWrite {
    Set {
        key: String,
        value: Vec<u8>,
        ttl: Option<Duration>,
    },
    Delete {
        keys: Vec<String>,
    },
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), KvError>;
    async fn set_if_absent(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<bool, KvError>;
    async fn delete(&self, keys: &[String]) -> Result<(), KvError>;
    /// All keys matching `pattern`, scanned `batch` keys per round trip
    /// (the "find by id"/"find by user" prefix scans rely on this).
    async fn scan(&self, pattern: &str, batch: usize) -> Result<Vec<String>, KvError>;
    /// Applies queued writes atomically.
    async fn execute_pipeline(&self, writes: Vec<PipelineWrite>) -> Result<(), KvError>;
}

/// Per-request accumulator of pending writes. Mappers and the task
/// scheduler queue onto this rather than writing immediately; it is
/// flushed exactly once, at commit.
pub struct KvTransaction {
    store: std::sync::Arc<dyn KvStore>,
    writes: Mutex<Vec<PipelineWrite>>,
}

impl KvTransaction {
    #[must_use]
    pub fn new(store: std::sync::Arc<dyn KvStore>) -> Self {
        Self {
            store,
            writes: Mutex::new(Vec::new()),
        }
    }

    pub async fn queue_set(&self, key: String, value: Vec<u8>, ttl: Option<Duration>) {
        self.writes.lock().await.push(PipelineWrite::Set { key, value, ttl });
    }

    pub async fn queue_delete(&self, keys: Vec<String>) {
        if keys.is_empty() {
            return;
        }
        self.writes.lock().await.push(PipelineWrite::Delete { keys });
    }

    /// Reads bypass the pipeline and hit the store directly — within
    /// one request only the lock manager serializes against other
    /// requests, so a read-after-queued-write does not reflect
    /// not-yet-flushed writes. Processors read once up front and only
    /// queue writes afterward, so this never arises on the happy path.
    #[must_use]
    pub fn store(&self) -> &(dyn KvStore + 'static) {
        self.store.as_ref()
    }

    pub async fn execute(&self) -> Result<(), KvError> {
        let mut writes = self.writes.lock().await;
        if writes.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut *writes);
        self.store.execute_pipeline(pending).await
    }
}
