//! Durable pull-consumer loop: one task per ingress subject, each bound
//! to its own durable consumer, pulling in batches with a
//! `PULL_TIMEOUT` fetch expiry.

pub mod middleware;
pub mod routes;

use crate::application::errors::ProcessorError;
use crate::infrastructure::message_broker::{INGRESS_SUBJECTS, PULL_TIMEOUT, STREAM_NAME};
use crate::presentation::Deps;
use async_nats::jetstream::{self, consumer::PullConsumer};
use futures_util::StreamExt;

const FETCH_BATCH: usize = 64;

/// Binds one durable pull consumer per ingress subject and runs each
/// subject's fetch loop concurrently until the process is stopped.
pub async fn run(deps: Deps, nats_url: &str) -> anyhow::Result<()> {
    let client = async_nats::connect(nats_url).await?;
    let jetstream = jetstream::new(client);
    let stream = jetstream.get_stream(STREAM_NAME).await?;

    let mut handles = Vec::with_capacity(INGRESS_SUBJECTS.len());
    for &(subject, consumer_name) in INGRESS_SUBJECTS {
        let consumer: PullConsumer = stream.get_consumer(consumer_name).await?;
        let deps = deps.clone();
        handles.push(tokio::spawn(async move {
            if let Err(err) = consume_subject(subject, consumer, deps).await {
                tracing::error!(subject, error = %err, "ingress consumer loop exited");
            }
        }));
    }

    for handle in handles {
        let _ = handle.await;
    }
    Ok(())
}

async fn consume_subject(subject: &str, consumer: PullConsumer, deps: Deps) -> anyhow::Result<()> {
    loop {
        let mut batch = consumer
            .fetch()
            .max_messages(FETCH_BATCH)
            .expires(PULL_TIMEOUT)
            .messages()
            .await?;

        while let Some(message) = batch.next().await {
            let message = message?;
            if let Err(err) = handle_message(subject, message.payload.as_ref(), &deps).await {
                tracing::error!(subject, error = %err, "ingress message processing failed, redelivery expected");
                continue;
            }
            message.ack().await.map_err(|e| anyhow::anyhow!(e))?;
        }
    }
}

async fn handle_message(subject: &str, raw: &[u8], deps: &Deps) -> anyhow::Result<()> {
    let value = routes::parse_value(raw).unwrap_or(serde_json::Value::Null);
    let operation_id = middleware::extract_operation_id(&value);
    let body = routes::parse_body(raw)?;

    let span = tracing::info_span!("message_consumer", %operation_id, subject);
    let _enter = span.enter();

    let ctx = deps.new_context(operation_id);
    match routes::route(&ctx, subject, body).await {
        Ok(()) => {
            crate::metrics::HubMetrics::inc(&deps.metrics.commands_processed);
            Ok(())
        }
        Err(ProcessorError::Application(err)) => {
            crate::metrics::HubMetrics::inc(&deps.metrics.commands_failed_application);
            tracing::debug!(error = %err, "command rejected, not redelivering");
            Ok(())
        }
        Err(err @ ProcessorError::Transport(_)) => {
            crate::metrics::HubMetrics::inc(&deps.metrics.commands_failed_transport);
            Err(err.into())
        }
    }
}
