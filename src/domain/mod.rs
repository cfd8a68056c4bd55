//! Pure domain layer: identifiers, aggregates, and the state-transition
//! functions that mutate them. Nothing in this module performs I/O.

pub mod duration_secs;
pub mod errors;
pub mod identifiers;
pub mod models;
pub mod services;

pub use errors::DomainError;
