//! Per-entity advisory locks backed by the KV store's
//! compare-and-swap-style `set_if_absent`.

use crate::infrastructure::kv::{KvError, KvStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One request's set of held locks. Reentrant: acquiring an id already
/// held by this instance is a no-op. `release_all` is called exactly
/// once, at commit or abort.
pub struct LockManager {
    kv: Arc<dyn KvStore>,
    ttl: Duration,
    acquired: Mutex<Vec<String>>,
}

impl LockManager {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>, ttl: Duration) -> Self {
        Self {
            kv,
            ttl,
            acquired: Mutex::new(Vec::new()),
        }
    }

    fn lock_name(id: &str) -> String {
        format!("locks:{id}")
    }

    pub async fn acquire(&self, id: &str) -> Result<(), KvError> {
        let name = Self::lock_name(id);
        {
            let acquired = self.acquired.lock().await;
            if acquired.contains(&name) {
                return Ok(());
            }
        }

        loop {
            if self.kv.set_if_absent(&name, Vec::new(), self.ttl).await? {
                self.acquired.lock().await.push(name);
                return Ok(());
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn release_all(&self) -> Result<(), KvError> {
        let mut acquired = self.acquired.lock().await;
        if acquired.is_empty() {
            return Ok(());
        }
        let names = std::mem::take(&mut *acquired);
        self.kv.delete(&names).await
    }
}
