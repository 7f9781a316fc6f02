use std::time::Duration;
use tickworld_common::SimResult;

/// How often a task repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// Run once, then leave the scheduler.
    Once,
    /// Run again once at least this much time has passed since the last run.
    /// `Every(Duration::ZERO)` runs on every poll.
    Every(Duration),
}

impl Interval {
    /// Every poll.
    pub const EVERY_TICK: Interval = Interval::Every(Duration::ZERO);

    pub fn is_once(self) -> bool {
        matches!(self, Interval::Once)
    }

    /// Minimum time between two runs.
    pub fn period(self) -> Duration {
        match self {
            Interval::Once => Duration::ZERO,
            Interval::Every(period) => period,
        }
    }
}

/// A unit of work driven by the scheduler.
pub trait Task: Send {
    fn name(&self) -> &str;

    /// Run once. `elapsed` is the time since the previous run, or since
    /// registration for the first one.
    fn execute(&mut self, elapsed: Duration) -> SimResult<()>;

    /// Time to wait after registration before the first run.
    fn delay(&self) -> Duration {
        Duration::ZERO
    }

    fn interval(&self) -> Interval {
        Interval::EVERY_TICK
    }
}
