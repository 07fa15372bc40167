//! Debounced search driver for type-ahead input.
//!
//! Every submission waits out the debounce delay and takes a generation
//! number. Only the newest submission is allowed to publish results; older
//! ones resolve to `None` even when their store round-trips finish later.

use crate::engine::SearchEngine;
use crate::item::SearchResultItem;
use karia_api_client::DataStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Latest-submission-wins wrapper around [`SearchEngine::search`].
#[derive(Debug)]
pub struct SearchSession<S> {
    engine: SearchEngine<S>,
    delay: Duration,
    generation: AtomicU64,
}

impl<S: DataStore> SearchSession<S> {
    /// Wrap an engine using its configured debounce delay.
    pub fn new(engine: SearchEngine<S>) -> Self {
        let delay = Duration::from_millis(engine.config().debounce_ms);
        Self {
            engine,
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Override the debounce delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Wrapped engine.
    pub fn engine(&self) -> &SearchEngine<S> {
        &self.engine
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Supersede any in-flight submission without starting a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Debounce, then search; `None` if a newer submission arrived meanwhile.
    pub async fn submit(&self, query: &str) -> Option<Vec<SearchResultItem>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.delay).await;
        if self.is_stale(generation) {
            debug!(generation, "Superseded before search");
            return None;
        }

        let items = self.engine.search(query).await;
        if self.is_stale(generation) {
            debug!(generation, "Superseded during search, results dropped");
            return None;
        }
        Some(items)
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation() != generation
    }
}
