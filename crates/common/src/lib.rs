//! Shared types used across every tickworld crate.
//!
//! # Invariants
//! - Identifiers are unique and stable for the lifetime of the process.
//! - Priorities are totally ordered; lower variants run first.

mod error;
mod priority;
mod types;

pub use error::{SimError, SimResult};
pub use priority::Priority;
pub use types::{ObjectId, WorldId};
