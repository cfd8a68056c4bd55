//! In-memory fakes for the ports command processors depend on, plus a
//! builder that assembles a `RequestContext` over them using the real
//! data mappers, lock manager and task scheduler — only the KV store,
//! event publisher and realtime client are faked.

use async_trait::async_trait;
use connection_hub::application::common::{
    Event, EventPublisher, EventPublisherError, GameGateway, LobbyGateway, RealtimeClient,
    RealtimeCommand, RealtimeError, RequestContext, TaskScheduler,
};
use connection_hub::domain::identifiers::OperationId;
use connection_hub::infrastructure::data_mappers::{GameMapper, LobbyMapper};
use connection_hub::infrastructure::kv::{KvError, KvStore, PipelineWrite};
use connection_hub::infrastructure::scheduling::TaskSchedulerImpl;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn glob_match(pattern: &str, key: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == key;
    }
    let mut pos = 0usize;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            if !key.starts_with(part) {
                return false;
            }
            pos = part.len();
        } else if i == parts.len() - 1 {
            return key[pos..].ends_with(part);
        } else if let Some(found) = key[pos..].find(part) {
            pos += found + part.len();
        } else {
            return false;
        }
    }
    true
}

#[derive(Default)]
pub struct FakeKvStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl FakeKvStore {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl KvStore for FakeKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>, _ttl: Option<Duration>) -> Result<(), KvError> {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: Vec<u8>, _ttl: Duration) -> Result<bool, KvError> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value);
        Ok(true)
    }

    async fn delete(&self, keys: &[String]) -> Result<(), KvError> {
        let mut entries = self.entries.lock().unwrap();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }

    async fn scan(&self, pattern: &str, _batch: usize) -> Result<Vec<String>, KvError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .keys()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect())
    }

    async fn execute_pipeline(&self, writes: Vec<PipelineWrite>) -> Result<(), KvError> {
        let mut entries = self.entries.lock().unwrap();
        for write in writes {
            match write {
                PipelineWrite::Set { key, value, .. } => {
                    entries.insert(key, value);
                }
                PipelineWrite::Delete { keys } => {
                    for key in keys {
                        entries.remove(&key);
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeEventPublisher {
    pub published: Mutex<Vec<Event>>,
}

impl FakeEventPublisher {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for FakeEventPublisher {
    async fn publish(&self, event: Event, _operation_id: OperationId) -> Result<(), EventPublisherError> {
        self.published.lock().unwrap().push(event);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum RealtimeCall {
    Publish { channel: String, data: Value },
    Batch { commands: Vec<RealtimeCommand> },
}

#[derive(Default)]
pub struct FakeRealtimeClient {
    pub calls: Mutex<Vec<RealtimeCall>>,
}

impl FakeRealtimeClient {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RealtimeCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Channels that received at least one publish, in either a direct
    /// `publish` call or as part of a `batch`.
    #[must_use]
    pub fn published_channels(&self) -> Vec<String> {
        let mut channels = Vec::new();
        for call in self.calls.lock().unwrap().iter() {
            match call {
                RealtimeCall::Publish { channel, .. } => channels.push(channel.clone()),
                RealtimeCall::Batch { commands } => {
                    for command in commands {
                        if let RealtimeCommand::Publish { channel, .. } = command {
                            channels.push(channel.clone());
                        }
                    }
                }
            }
        }
        channels
    }
}

#[async_trait]
impl RealtimeClient for FakeRealtimeClient {
    async fn publish(&self, channel: &str, data: &Value) -> Result<(), RealtimeError> {
        self.calls.lock().unwrap().push(RealtimeCall::Publish {
            channel: channel.to_string(),
            data: data.clone(),
        });
        Ok(())
    }

    async fn batch(&self, commands: Vec<RealtimeCommand>, _parallel: bool) -> Result<(), RealtimeError> {
        self.calls.lock().unwrap().push(RealtimeCall::Batch { commands });
        Ok(())
    }
}

/// The full fake adapter set backing one `TestHub`, kept around so
/// assertions can inspect what a command published without threading
/// extra state through every test.
pub struct TestHub {
    pub kv: Arc<FakeKvStore>,
    pub lobby_gateway: Arc<LobbyMapper>,
    pub game_gateway: Arc<GameMapper>,
    pub task_scheduler: Arc<TaskSchedulerImpl>,
    pub event_publisher: Arc<FakeEventPublisher>,
    pub realtime_client: Arc<FakeRealtimeClient>,
    pub lock_ttl: Duration,
    pub entity_ttl: Duration,
    pub presence_grace: Duration,
    pub reconnect_budget: Duration,
}

impl TestHub {
    #[must_use]
    pub fn new() -> Self {
        let kv = FakeKvStore::new();
        Self {
            lobby_gateway: Arc::new(LobbyMapper::new(kv.clone(), Duration::from_secs(86_400))),
            game_gateway: Arc::new(GameMapper::new(kv.clone(), Duration::from_secs(86_400))),
            task_scheduler: Arc::new(TaskSchedulerImpl::new(kv.clone())),
            kv,
            event_publisher: FakeEventPublisher::new(),
            realtime_client: FakeRealtimeClient::new(),
            lock_ttl: Duration::from_secs(5),
            entity_ttl: Duration::from_secs(86_400),
            presence_grace: Duration::from_secs(15),
            reconnect_budget: Duration::from_secs(40),
        }
    }

    /// A fresh per-request context, as the message consumer/task
    /// executor would build one for each incoming message or due task.
    #[must_use]
    pub fn context(&self) -> RequestContext {
        RequestContext::new(
            self.kv.clone() as Arc<dyn KvStore>,
            self.lock_ttl,
            self.lobby_gateway.clone() as Arc<dyn LobbyGateway>,
            self.game_gateway.clone() as Arc<dyn GameGateway>,
            self.event_publisher.clone() as Arc<dyn EventPublisher>,
            self.task_scheduler.clone() as Arc<dyn TaskScheduler>,
            self.realtime_client.clone() as Arc<dyn RealtimeClient>,
            OperationId::new(),
            self.presence_grace,
            self.reconnect_budget,
        )
    }

    /// Due tasks as the task executor's poller would see them.
    pub async fn due_tasks(&self, now: chrono::DateTime<chrono::Utc>) -> Vec<connection_hub::application::common::Task> {
        self.task_scheduler.due_tasks(now, 100).await.unwrap()
    }
}

impl Default for TestHub {
    fn default() -> Self {
        Self::new()
    }
}
