#![cfg_attr(not(test), deny(clippy::panic))]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools,
    clippy::too_many_arguments,
    clippy::too_many_lines,
    clippy::similar_names
)]

//! # Connection Hub
//!
//! Presence/lifecycle coordinator for multiplayer board game lobbies and
//! games. Consumes commands off a durable message bus, persists lobby
//! and game state in Redis, schedules presence-timeout tasks, and fans
//! state changes back out over a realtime HTTP API.

/// Pure domain model: aggregates, identifiers and state-transition services.
pub mod domain;

/// Use cases: command processors and the ports they depend on.
pub mod application;

/// Concrete adapters: Redis, NATS JetStream, the realtime HTTP client.
pub mod infrastructure;

/// Ingress/egress boundary: message consumer and task executor.
pub mod presentation;

/// Server configuration and environment variables.
pub mod config;

/// Structured logging configuration.
pub mod logging;

/// Crate-root error type unifying the layered taxonomy.
pub mod error;

/// Lightweight counters surfaced for operational visibility.
pub mod metrics;

/// Retry logic utilities.
pub mod retry;
