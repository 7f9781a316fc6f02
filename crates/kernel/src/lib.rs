//! World kernel: simulated objects, worlds, the engine-wide state, and the
//! physics formulas shared by the tick pipeline.
//!
//! # Invariants
//! - A world never holds two objects with the same id.
//! - An object belongs to the world its location points at.
//! - Immovable objects keep the location and zero vector they were created with.
//! - Physics formulas never fail: degenerate denominators are floored to
//!   [`physics::EPSILON`].

mod barrel;
pub mod object;
pub mod physics;
pub mod state;
pub mod world;

pub use barrel::Barrel;
pub use object::{ObjectKind, SimObject, DEFAULT_DRAG_COEFFICIENT};
pub use state::{lock, SharedState, State};
pub use world::World;
