//! Rendering adapter: renderer-agnostic interface over the simulation state.
//!
//! # Invariants
//! - A renderer only reads the state; it never mutates world truth.
//! - Render output derives from the state and the view alone.
//! - Frames are produced once per tick, after the physics tasks, through the
//!   ticker.

mod renderer;
mod tickable;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use tickable::RenderTickable;

pub fn crate_info() -> &'static str {
    "tickworld-render v0.1.0"
}
