use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::task::Task;

/// Time the polling loop sleeps between sweeps.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(15);

/// A scheduler polling on its own thread.
pub struct SchedulerThread {
    inner: JoinHandle<Option<Scheduler>>,
}

impl SchedulerThread {
    /// Wait for the loop to exit and take the scheduler back. `None` if the
    /// loop panicked.
    pub fn join(self) -> Option<Scheduler> {
        self.inner.join().ok().flatten()
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

/// The scheduler thread could not be started. Carries the scheduler back so
/// the caller can retry or poll it by hand.
#[derive(thiserror::Error)]
#[error("failed to spawn scheduler thread: {source}")]
pub struct SpawnError {
    scheduler: Scheduler,
    #[source]
    source: std::io::Error,
}

impl SpawnError {
    pub fn into_scheduler(self) -> Scheduler {
        self.scheduler
    }

    pub fn into_parts(self) -> (Scheduler, std::io::Error) {
        (self.scheduler, self.source)
    }
}

impl std::fmt::Debug for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpawnError")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Handle to a registered task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

enum Command {
    Register {
        id: TaskId,
        registered_at: Duration,
        task: Box<dyn Task>,
    },
    Unregister(TaskId),
}

struct Shared {
    clock: Arc<dyn Clock>,
    pending: Mutex<Vec<Command>>,
    next_id: AtomicU64,
    running: AtomicBool,
}

/// Cloneable handle for registering tasks and stopping the loop from any
/// thread, including from inside a running task.
#[derive(Clone)]
pub struct SchedulerHandle {
    shared: Arc<Shared>,
}

impl SchedulerHandle {
    /// Queue `task` for the next sweep. Its delay counts from now.
    pub fn register(&self, task: Box<dyn Task>) -> TaskId {
        let id = TaskId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        let registered_at = self.shared.clock.now();
        tracing::debug!(task = task.name(), ?id, "task queued");
        self.pending().push(Command::Register {
            id,
            registered_at,
            task,
        });
        id
    }

    pub fn unregister(&self, id: TaskId) {
        self.pending().push(Command::Unregister(id));
    }

    /// Ask the polling loop to exit after its current sweep.
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    pub fn now(&self) -> Duration {
        self.shared.clock.now()
    }

    fn pending(&self) -> std::sync::MutexGuard<'_, Vec<Command>> {
        self.shared
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

struct Entry {
    id: TaskId,
    task: Box<dyn Task>,
    last_execution: Duration,
    start_at: Duration,
    started: bool,
}

/// The polling scheduler.
///
/// Drive it either by calling [`Scheduler::poll`] directly (headless, usually
/// with a [`crate::ManualClock`]) or by handing it to a background thread
/// with [`Scheduler::spawn`].
pub struct Scheduler {
    entries: Vec<Entry>,
    handle: SchedulerHandle,
}

impl Scheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Vec::new(),
            handle: SchedulerHandle {
                shared: Arc::new(Shared {
                    clock,
                    pending: Mutex::new(Vec::new()),
                    next_id: AtomicU64::new(0),
                    running: AtomicBool::new(false),
                }),
            },
        }
    }

    /// Scheduler on the wall clock.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock::new()))
    }

    pub fn handle(&self) -> SchedulerHandle {
        self.handle.clone()
    }

    pub fn register(&self, task: Box<dyn Task>) -> TaskId {
        self.handle.register(task)
    }

    pub fn unregister(&self, id: TaskId) {
        self.handle.unregister(id);
    }

    /// Number of tasks that took part in the last sweep.
    pub fn task_count(&self) -> usize {
        self.entries.len()
    }

    /// Run one sweep over every registered task.
    pub fn poll(&mut self) {
        self.drain_pending();

        let clock = Arc::clone(&self.handle.shared.clock);
        for entry in &mut self.entries {
            let now = clock.now();
            if !entry.started && entry.start_at > now {
                continue;
            }
            let elapsed = now.saturating_sub(entry.last_execution);
            if elapsed < entry.task.interval().period() {
                continue;
            }

            let _span = tracing::debug_span!("task", name = entry.task.name()).entered();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| entry.task.execute(elapsed)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => tracing::warn!(%err, "task failed"),
                Err(_) => tracing::error!("task panicked"),
            }
            entry.started = true;
            entry.last_execution = clock.now();
        }

        self.entries.retain(|entry| {
            let done = entry.started && entry.task.interval().is_once();
            if done {
                tracing::debug!(task = entry.task.name(), id = ?entry.id, "one-shot task finished");
            }
            !done
        });
    }

    /// Poll until [`SchedulerHandle::stop`] is called, sleeping
    /// `poll_interval` between sweeps. Blocks the calling thread.
    pub fn run(&mut self, poll_interval: Duration) {
        self.handle.shared.running.store(true, Ordering::SeqCst);
        self.run_loop(poll_interval);
    }

    /// Run the polling loop on a background thread named
    /// `tickworld-scheduler`. The scheduler is handed back when the thread
    /// exits, or inside the error if the thread could not be started.
    pub fn spawn(self, poll_interval: Duration) -> Result<SchedulerThread, SpawnError> {
        self.spawn_on(
            thread::Builder::new().name("tickworld-scheduler".into()),
            poll_interval,
        )
    }

    /// [`Scheduler::spawn`] with a caller-configured thread builder.
    pub fn spawn_on(
        self,
        builder: thread::Builder,
        poll_interval: Duration,
    ) -> Result<SchedulerThread, SpawnError> {
        // The scheduler only moves once the thread exists, so a failed spawn
        // can return it untouched.
        let (tx, rx) = mpsc::channel::<Scheduler>();
        let inner = match builder.spawn(move || {
            let mut scheduler = rx.recv().ok()?;
            scheduler.run_loop(poll_interval);
            Some(scheduler)
        }) {
            Ok(inner) => inner,
            Err(source) => {
                tracing::error!(error = %source, "scheduler thread failed to start");
                return Err(SpawnError {
                    scheduler: self,
                    source,
                });
            }
        };

        let shared = Arc::clone(&self.handle.shared);
        shared.running.store(true, Ordering::SeqCst);
        if let Err(mpsc::SendError(scheduler)) = tx.send(self) {
            shared.running.store(false, Ordering::SeqCst);
            return Err(SpawnError {
                scheduler,
                source: std::io::Error::other("scheduler thread exited before it started"),
            });
        }
        Ok(SchedulerThread { inner })
    }

    fn run_loop(&mut self, poll_interval: Duration) {
        tracing::info!(?poll_interval, "scheduler started");
        while self.handle.is_running() {
            self.poll();
            thread::sleep(poll_interval);
        }
        tracing::info!(tasks = self.entries.len(), "scheduler stopped");
    }

    fn drain_pending(&mut self) {
        let commands = std::mem::take(&mut *self.handle.pending());
        for command in commands {
            match command {
                Command::Register {
                    id,
                    registered_at,
                    task,
                } => {
                    let start_at = registered_at + task.delay();
                    self.entries.push(Entry {
                        id,
                        task,
                        last_execution: registered_at,
                        start_at,
                        started: false,
                    });
                }
                Command::Unregister(id) => {
                    self.entries.retain(|entry| entry.id != id);
                }
            }
        }
    }
}
