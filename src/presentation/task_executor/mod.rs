//! Deferred-task poller: claims and executes due tasks on a fixed
//! interval.

pub mod executors;

use crate::application::common::Task;
use crate::application::errors::ProcessorError;
use crate::infrastructure::kv::KvTransaction;
use crate::presentation::Deps;
use crate::retry::{RetryConfig, RetryExecutor};
use chrono::Utc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_secs(1);
const POLL_BATCH: usize = 100;

/// Runs the poll loop until the process is stopped. Every due task is
/// claimed (unscheduled) before it is executed, so a transport failure
/// that exhausts retries does not cause the same task to be picked up
/// again on the next tick — it is logged and dropped, consistent with
/// the bus side's own at-least-once/idempotent-consumer contract.
pub async fn run(deps: Deps) -> anyhow::Result<()> {
    let retry = RetryExecutor::new(RetryConfig::default());
    loop {
        tokio::time::sleep(POLL_INTERVAL).await;
        if let Err(err) = poll_once(&deps, &retry).await {
            tracing::error!(error = %err, "task poll failed");
        }
    }
}

async fn poll_once(deps: &Deps, retry: &RetryExecutor) -> anyhow::Result<()> {
    let due = deps.task_scheduler.due_tasks(Utc::now(), POLL_BATCH).await?;
    for task in due {
        claim(deps, &task).await?;

        let operation_id = task.operation_id();
        let span = tracing::info_span!("task_executor", %operation_id, task_id = %task.id());
        let _enter = span.enter();

        let result = retry
            .execute_with_condition(
                "execute_due_task",
                || {
                    let ctx = deps.new_context(operation_id);
                    let task = task.clone();
                    async move { executors::execute(&ctx, task).await }
                },
                |err: &ProcessorError| matches!(err, ProcessorError::Transport(_)),
            )
            .await;

        match result {
            Ok(()) => {
                crate::metrics::HubMetrics::inc(&deps.metrics.tasks_executed);
            }
            Err(ProcessorError::Application(err)) => {
                crate::metrics::HubMetrics::inc(&deps.metrics.commands_failed_application);
                tracing::debug!(error = %err, "stale or rejected task, ignoring");
            }
            Err(err @ ProcessorError::Transport(_)) => {
                crate::metrics::HubMetrics::inc(&deps.metrics.commands_failed_transport);
                tracing::error!(error = %err, "task execution exhausted retries, dropping");
            }
        }
    }
    Ok(())
}

async fn claim(deps: &Deps, task: &Task) -> anyhow::Result<()> {
    let tx = KvTransaction::new(deps.kv.clone());
    deps.task_scheduler.unschedule(task.id(), &tx).await?;
    tx.execute().await?;
    Ok(())
}
