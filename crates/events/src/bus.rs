use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tickworld_common::{Priority, SimResult};
use tickworld_kernel::World;

use crate::event::{Event, Subscription};

/// Something that reacts to published events.
///
/// Listeners get the event mutably so they can cancel it, and the world the
/// event happened in so they can act on its objects.
///
/// Events are published while the publisher holds the shared state lock, so
/// `world` is the only way to reach the state from `handle`. Locking the
/// shared state inside a listener deadlocks the scheduling thread.
pub trait Listener: Send + Sync {
    fn name(&self) -> &str;

    fn subscription(&self) -> Subscription {
        Subscription::All
    }

    fn priority(&self) -> Priority {
        Priority::Normal
    }

    fn handle(&self, event: &mut Event, world: &mut World) -> SimResult<()>;
}

/// Handle returned by [`EventBus::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    priority: Priority,
    listener: Arc<dyn Listener>,
}

/// Synchronous event bus.
///
/// Registration is safe from any thread, including from inside a listener;
/// such changes take effect from the next publish.
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener after every registered listener of the same or
    /// earlier priority.
    pub fn register(&self, listener: Arc<dyn Listener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let priority = listener.priority();
        tracing::debug!(listener = listener.name(), ?priority, "listener registered");
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let at = listeners.partition_point(|r| r.priority <= priority);
        listeners.insert(
            at,
            Registration {
                id,
                priority,
                listener,
            },
        );
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|r| r.id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Dispatch `event` to every matching listener, then run its
    /// post-dispatch callback. Returns the event so the caller can see
    /// whether it was cancelled.
    pub fn publish(&self, mut event: Event, world: &mut World) -> Event {
        let kind = event.kind();
        let snapshot: Vec<Arc<dyn Listener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.listener.subscription().matches(kind))
            .map(|r| Arc::clone(&r.listener))
            .collect();

        let _span = tracing::debug_span!("publish", ?kind, listeners = snapshot.len()).entered();
        for listener in snapshot {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| listener.handle(&mut event, world)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::error!(listener = listener.name(), %err, "listener failed");
                }
                Err(_) => {
                    tracing::error!(listener = listener.name(), "listener panicked");
                }
            }
        }

        if let Some(callback) = event.take_on_handled() {
            if panic::catch_unwind(AssertUnwindSafe(|| callback(&event))).is_err() {
                tracing::error!(?kind, "post-dispatch callback panicked");
            }
        }
        event
    }
}
