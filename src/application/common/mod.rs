//! Ports (traits) the command processors depend on. Concrete adapters
//! live under `infrastructure`; this module knows nothing about Redis,
//! NATS or HTTP.

pub mod context;
pub mod event_publisher;
pub mod gateways;
pub mod identity_provider;
pub mod operation_id;
pub mod realtime_client;
pub mod task_scheduler;

pub use context::RequestContext;
pub use event_publisher::{Event, EventPublisher, EventPublisherError};
pub use gateways::{GameGateway, LobbyGateway};
pub use identity_provider::{IdentityError, IdentityProvider};
pub use realtime_client::{Command as RealtimeCommand, RealtimeClient, RealtimeError};
pub use task_scheduler::{Task, TaskScheduler, TaskSchedulerError};
