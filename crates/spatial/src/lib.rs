//! Spatial value model for the simulation kernel.
//!
//! # Invariants
//! - Every type here is an immutable value; "mutators" return a new value.
//! - Volume components and mass values are never negative.
//! - Orientation angles read back normalized to (-180, 180].

mod bounds;
mod face;
mod location;
mod mass;
pub mod metric;
mod vector;
mod volume;

pub use bounds::BoundingBox;
pub use face::{Axis, Face};
pub use location::{normalize_angle, Location};
pub use mass::{Mass, MassUnit};
pub use vector::Vector;
pub use volume::Volume;
