//! Concrete adapters for the ports declared under `application::common`.
//! Nothing outside this module (and `main.rs`, which wires it together)
//! should need to name a concrete backend type.

pub mod data_mappers;
pub mod identity;
pub mod kv;
pub mod lock_manager;
pub mod message_broker;
pub mod realtime;
pub mod scheduling;
