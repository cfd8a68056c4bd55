//! A thin NATS JetStream publish wrapper.

use crate::application::common::event_publisher::{Event, EventPublisher, EventPublisherError};
use crate::domain::identifiers::OperationId;
use async_nats::jetstream::{self, context::Context as JetStreamContext};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    #[serde(flatten)]
    event: &'a Event,
    operation_id: OperationId,
}

pub struct NatsEventPublisher {
    jetstream: JetStreamContext,
}

impl NatsEventPublisher {
    #[must_use]
    pub fn new(client: async_nats::Client) -> Self {
        Self {
            jetstream: jetstream::new(client),
        }
    }

    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let client = async_nats::connect(url).await?;
        Ok(Self::new(client))
    }
}

fn transport(err: impl Into<anyhow::Error>) -> EventPublisherError {
    EventPublisherError::Transport(err.into())
}

#[async_trait]
impl EventPublisher for NatsEventPublisher {
    async fn publish(&self, event: Event, operation_id: OperationId) -> Result<(), EventPublisherError> {
        let subject = event.subject().to_string();
        let envelope = Envelope {
            event: &event,
            operation_id,
        };
        let payload: Value = serde_json::to_value(&envelope).map_err(transport)?;
        let bytes = serde_json::to_vec(&payload).map_err(transport)?;

        self.jetstream
            .publish(subject, bytes.into())
            .await
            .map_err(transport)?
            .await
            .map_err(transport)?;
        Ok(())
    }
}
