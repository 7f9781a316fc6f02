//! Event bus: listeners registered at one of nine priorities observe each
//! published event synchronously, on the publishing thread.
//!
//! # Invariants
//! - Listeners run in ascending priority; equal priorities run in
//!   registration order.
//! - A listener runs at most once per published event.
//! - The post-dispatch callback of an event runs exactly once, after every
//!   listener.
//! - Cancellation is advisory: the bus never skips a listener.
//! - A failing or panicking listener is logged and does not stop dispatch.

mod bus;
mod event;

pub use bus::{EventBus, Listener, ListenerId};
pub use event::{CollisionEvent, Event, EventCategory, EventKind, EventPayload, Subscription};

pub fn crate_info() -> &'static str {
    "tickworld-events v0.1.0"
}
