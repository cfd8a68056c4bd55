//! Lightweight operational counters: plain `AtomicU64` fields bumped
//! with `Ordering::Relaxed`, scoped to this hub's concerns. No
//! latency histograms (see `DESIGN.md`).

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct HubMetrics {
    // Command processor outcomes
    pub commands_processed: AtomicU64,
    pub commands_failed_application: AtomicU64,
    pub commands_failed_transport: AtomicU64,

    // Lobby lifecycle
    pub lobbies_created: AtomicU64,
    pub lobbies_joined: AtomicU64,
    pub lobbies_left: AtomicU64,
    pub lobbies_kicked: AtomicU64,
    pub lobbies_removed_by_task: AtomicU64,

    // Game lifecycle
    pub games_created: AtomicU64,
    pub games_ended: AtomicU64,
    pub player_disconnects: AtomicU64,
    pub player_reconnects: AtomicU64,
    pub player_disqualifications: AtomicU64,
    pub stale_disqualify_fires: AtomicU64,

    // Presence
    pub presence_acknowledgements: AtomicU64,

    // Task scheduler
    pub tasks_scheduled: AtomicU64,
    pub tasks_unscheduled: AtomicU64,
    pub tasks_executed: AtomicU64,
    pub tasks_retried: AtomicU64,

    // Realtime fan-out
    pub realtime_publishes: AtomicU64,
    pub realtime_retries: AtomicU64,
    pub realtime_failures: AtomicU64,

    // Lock contention
    pub lock_acquisitions: AtomicU64,
    pub lock_wait_timeouts: AtomicU64,
}

impl HubMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_increment() {
        let metrics = HubMetrics::new();
        assert_eq!(HubMetrics::get(&metrics.lobbies_created), 0);
        HubMetrics::inc(&metrics.lobbies_created);
        HubMetrics::inc(&metrics.lobbies_created);
        assert_eq!(HubMetrics::get(&metrics.lobbies_created), 2);
    }
}
