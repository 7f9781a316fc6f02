use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tickworld_common::{Priority, SimResult};
use tickworld_kernel::{lock, SharedState};
use tickworld_scheduler::Tickable;

use crate::renderer::{RenderView, Renderer};

/// Renders the shared state once per tick and keeps the latest frame.
///
/// Runs at [`Priority::Monitor`] so it sees every other tickable's work.
pub struct RenderTickable<R: Renderer<Output = String>> {
    state: SharedState,
    renderer: R,
    view: RenderView,
    last_frame: Mutex<String>,
}

impl<R: Renderer<Output = String>> RenderTickable<R> {
    pub fn new(state: SharedState, renderer: R, view: RenderView) -> Self {
        Self {
            state,
            renderer,
            view,
            last_frame: Mutex::new(String::new()),
        }
    }

    /// The most recent frame, empty before the first tick.
    pub fn last_frame(&self) -> String {
        self.last_frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<R> Tickable for RenderTickable<R>
where
    R: Renderer<Output = String> + Send + Sync,
{
    fn name(&self) -> &str {
        "render"
    }

    fn priority(&self) -> Priority {
        Priority::Monitor
    }

    fn tick(&self, _elapsed: Duration) -> SimResult<()> {
        let frame = self.renderer.render(&lock(&self.state), &self.view);
        tracing::trace!(frame = %frame, "frame rendered");
        *self.last_frame.lock().unwrap_or_else(PoisonError::into_inner) = frame;
        Ok(())
    }
}
