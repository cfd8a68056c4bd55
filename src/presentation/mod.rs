//! The ingress/egress boundary: everything that turns a bus message or
//! a due task into a `RequestContext` and a command-processor call.

pub mod message_consumer;
pub mod task_executor;

use crate::application::common::{EventPublisher, GameGateway, LobbyGateway, RealtimeClient, RequestContext, TaskScheduler};
use crate::domain::identifiers::OperationId;
use crate::infrastructure::kv::KvStore;
use crate::metrics::HubMetrics;
use std::sync::Arc;
use std::time::Duration;

/// The long-lived adapter set both run loops build a fresh
/// `RequestContext` from, one per incoming message or due task.
#[derive(Clone)]
pub struct Deps {
    pub kv: Arc<dyn KvStore>,
    pub lock_ttl: Duration,
    pub presence_grace: Duration,
    pub reconnect_budget: Duration,
    pub lobby_gateway: Arc<dyn LobbyGateway>,
    pub game_gateway: Arc<dyn GameGateway>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub task_scheduler: Arc<dyn TaskScheduler>,
    pub realtime_client: Arc<dyn RealtimeClient>,
    pub metrics: Arc<HubMetrics>,
}

impl Deps {
    #[must_use]
    pub fn new_context(&self, operation_id: OperationId) -> RequestContext {
        RequestContext::new(
            self.kv.clone(),
            self.lock_ttl,
            self.lobby_gateway.clone(),
            self.game_gateway.clone(),
            self.event_publisher.clone(),
            self.task_scheduler.clone(),
            self.realtime_client.clone(),
            operation_id,
            self.presence_grace,
            self.reconnect_budget,
        )
    }
}
