//! Scheduler: a single polling loop that runs registered tasks on
//! delay/interval schedules, plus the ticker that drives per-tick callbacks.
//!
//! # Invariants
//! - Tasks run in registration order, one at a time, on the polling thread.
//! - A task never runs before its delay has passed, nor twice within its
//!   interval.
//! - A one-shot task runs exactly once and is then dropped.
//! - Registering or unregistering, from any thread or from inside a running
//!   task, takes effect at the start of the next sweep.
//! - A task that fails or panics is logged; the sweep carries on.

mod clock;
mod scheduler;
mod task;
mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{
    Scheduler, SchedulerHandle, SchedulerThread, SpawnError, TaskId, DEFAULT_POLL_INTERVAL,
};
pub use task::{Interval, Task};
pub use ticker::{TickTask, Tickable, Ticker};

pub fn crate_info() -> &'static str {
    "tickworld-scheduler v0.1.0"
}
