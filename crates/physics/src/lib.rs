//! Physics pipeline: the scheduler tasks that move objects every tick and the
//! listeners that react to collisions.
//!
//! Each task locks the shared state for the length of its own run and visits
//! every world once. Registered in the order gravity, resistance, movement,
//! collision, a tick applies forces first, integrates positions next and
//! detects contacts on the moved objects last.
//!
//! # Invariants
//! - Gravity never accelerates an object resting on an immovable object.
//! - Movement never moves an axis faster than its terminal velocity.
//! - Drag slows an object down to rest at most; it never reverses it.
//! - A pair of objects raises one collision event per contact, not one per tick.

mod collision;
mod debug;
mod gravity;
mod listeners;
mod movement;
mod resistance;

pub use collision::{overlapping_pairs, CollisionTask, CollisionTracker, ObjectPair};
pub use debug::DebugTask;
pub use gravity::GravityTask;
pub use listeners::{CollisionResponseListener, EnergyLogListener, DEFAULT_RESTITUTION};
pub use movement::MovementTask;
pub use resistance::ResistanceTask;

pub fn crate_info() -> &'static str {
    "tickworld-physics v0.1.0"
}
