use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tickworld_common::{SimError, SimResult, WorldId};

use crate::world::World;

/// Every world the engine simulates.
#[derive(Debug, Clone, Default)]
pub struct State {
    worlds: Vec<World>,
}

/// The state as handed to tasks running on the scheduler thread.
pub type SharedState = Arc<Mutex<State>>;

/// Lock the shared state.
///
/// A task that panicked while holding the lock leaves the state as it was at
/// that point; the simulation carries on with it rather than wedging.
pub fn lock(state: &SharedState) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }

    pub fn add_world(&mut self, world: World) -> SimResult<()> {
        if self.world(world.id()).is_some() {
            return Err(SimError::DuplicateWorld(world.id()));
        }
        tracing::debug!(world = %world.name(), "world added");
        self.worlds.push(world);
        Ok(())
    }

    pub fn remove_world(&mut self, id: WorldId) -> Option<World> {
        let idx = self.worlds.iter().position(|w| w.id() == id)?;
        Some(self.worlds.remove(idx))
    }

    pub fn world(&self, id: WorldId) -> Option<&World> {
        self.worlds.iter().find(|w| w.id() == id)
    }

    pub fn world_mut(&mut self, id: WorldId) -> Option<&mut World> {
        self.worlds.iter_mut().find(|w| w.id() == id)
    }

    /// Worlds in registration order.
    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    pub fn worlds_mut(&mut self) -> &mut [World] {
        &mut self.worlds
    }

    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    /// Advance every world's tick counter by one.
    pub fn tick(&mut self) {
        for world in &mut self.worlds {
            world.advance_tick();
        }
    }
}
