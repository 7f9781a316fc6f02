//! Engine context: owns the shared state, the scheduler, the event bus and
//! the ticker, and wires the physics pipeline onto them.
//!
//! There are no globals. Every task and listener receives `Arc` handles from
//! the [`Engine`] that registers it.
//!
//! # Invariants
//! - The pipeline is registered once per engine, in the order gravity,
//!   resistance, movement, collision, tick.
//! - An engine either runs on its background thread or is stepped by hand,
//!   never both at once.
//! - Configuration is validated before an engine is built from it.

mod config;
mod engine;

pub use config::{ConfigError, EngineConfig, WorldDefaults};
pub use engine::{Engine, EngineError, StateTickable};

pub fn crate_info() -> &'static str {
    "tickworld-engine v0.1.0"
}
