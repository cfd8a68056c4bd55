//! Crate-root error type. Used at the few call sites — CLI validation,
//! the top-level run loops — that need one umbrella type; internally
//! each layer keeps its own narrow error enum (`DomainError`,
//! `ApplicationError`, `ProcessorError`), unified here with
//! `#[error(transparent)]`/`#[from]`.

use crate::application::errors::ProcessorError;
use crate::config::ConfigError;
use crate::infrastructure::kv::KvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Kv(#[from] KvError),
    #[error("failed to connect to message bus: {0}")]
    Broker(#[source] anyhow::Error),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}
