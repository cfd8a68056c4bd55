//! Per-request context, built fresh once per incoming message/task at
//! the consumer boundary and threaded into the processor that handles
//! it.

use super::{EventPublisher, GameGateway, LobbyGateway, RealtimeClient, TaskScheduler};
use crate::domain::identifiers::OperationId;
use crate::infrastructure::kv::{KvError, KvStore, KvTransaction};
use crate::infrastructure::lock_manager::LockManager;
use std::sync::Arc;

pub struct RequestContext {
    pub lobby_gateway: Arc<dyn LobbyGateway>,
    pub game_gateway: Arc<dyn GameGateway>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub task_scheduler: Arc<dyn TaskScheduler>,
    pub realtime_client: Arc<dyn RealtimeClient>,
    pub locks: LockManager,
    pub transaction: KvTransaction,
    pub operation_id: OperationId,
    /// Window a freshly created lobby member or game player has to send
    /// their first heartbeat before they are evicted/disconnected
    /// (default 15s), configurable per deployment rather than hardcoded.
    pub presence_grace: std::time::Duration,
    /// Time a disconnected player keeps before disqualification
    /// (default 40s), likewise configurable.
    pub reconnect_budget: std::time::Duration,
}

impl RequestContext {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kv: Arc<dyn KvStore>,
        lock_ttl: std::time::Duration,
        lobby_gateway: Arc<dyn LobbyGateway>,
        game_gateway: Arc<dyn GameGateway>,
        event_publisher: Arc<dyn EventPublisher>,
        task_scheduler: Arc<dyn TaskScheduler>,
        realtime_client: Arc<dyn RealtimeClient>,
        operation_id: OperationId,
        presence_grace: std::time::Duration,
        reconnect_budget: std::time::Duration,
    ) -> Self {
        Self {
            lobby_gateway,
            game_gateway,
            event_publisher,
            task_scheduler,
            realtime_client,
            locks: LockManager::new(kv.clone(), lock_ttl),
            transaction: KvTransaction::new(kv),
            operation_id,
            presence_grace,
            reconnect_budget,
        }
    }

    /// Flushes the pipeline then releases every lock acquired this
    /// request. The only point at which mutated state becomes visible.
    pub async fn commit(&self) -> Result<(), KvError> {
        self.transaction.execute().await?;
        self.locks.release_all().await
    }
}
