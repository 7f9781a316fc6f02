use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tickworld_common::{Priority, SimResult};

use crate::task::{Interval, Task};

/// Something that wants a callback once per tick, after the physics tasks.
pub trait Tickable: Send + Sync {
    fn name(&self) -> &str;

    fn priority(&self) -> Priority {
        Priority::Normal
    }

    fn tick(&self, elapsed: Duration) -> SimResult<()>;
}

/// Priority-ordered registry of [`Tickable`]s.
#[derive(Default)]
pub struct Ticker {
    tickables: RwLock<Vec<Arc<dyn Tickable>>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tickable after every registered one of the same or earlier
    /// priority.
    pub fn register(&self, tickable: Arc<dyn Tickable>) {
        let priority = tickable.priority();
        let mut tickables = self.tickables.write().unwrap_or_else(PoisonError::into_inner);
        let at = tickables.partition_point(|t| t.priority() <= priority);
        tracing::debug!(tickable = tickable.name(), ?priority, "tickable registered");
        tickables.insert(at, tickable);
    }

    /// Remove every registration of `tickable`. Returns whether any was found.
    pub fn unregister(&self, tickable: &Arc<dyn Tickable>) -> bool {
        let mut tickables = self.tickables.write().unwrap_or_else(PoisonError::into_inner);
        let before = tickables.len();
        tickables.retain(|t| !Arc::ptr_eq(t, tickable));
        tickables.len() != before
    }

    pub fn len(&self) -> usize {
        self.tickables.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every tickable in priority order. Failures are logged and skipped.
    pub fn tick_all(&self, elapsed: Duration) {
        let snapshot: Vec<Arc<dyn Tickable>> = self
            .tickables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for tickable in snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| tickable.tick(elapsed))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => tracing::warn!(tickable = tickable.name(), %err, "tickable failed"),
                Err(_) => tracing::error!(tickable = tickable.name(), "tickable panicked"),
            }
        }
    }
}

/// Scheduler task that runs the [`Ticker`] on every poll.
pub struct TickTask {
    ticker: Arc<Ticker>,
}

impl TickTask {
    pub fn new(ticker: Arc<Ticker>) -> Self {
        Self { ticker }
    }
}

impl Task for TickTask {
    fn name(&self) -> &str {
        "tick"
    }

    fn execute(&mut self, elapsed: Duration) -> SimResult<()> {
        self.ticker.tick_all(elapsed);
        Ok(())
    }

    fn interval(&self) -> Interval {
        Interval::EVERY_TICK
    }
}
