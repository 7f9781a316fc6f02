use std::time::Duration;
use tickworld_common::{ObjectId, SimResult};
use tickworld_kernel::physics::{self, MILLIS_TO_SECONDS};
use tickworld_kernel::{lock, SharedState, SimObject, World};
use tickworld_scheduler::{Interval, Task};
use tickworld_spatial::{Axis, Face, Vector};

/// Integrates every object's velocity into its location.
///
/// Each axis of the velocity is clamped to the terminal velocity in that
/// direction before integrating. The stored vector is left untouched.
pub struct MovementTask {
    state: SharedState,
}

impl MovementTask {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

/// Velocity of `object` with every axis clamped to its terminal velocity.
fn clamped_velocity(world: &World, object: &SimObject) -> Vector {
    let v = object.vector();
    Axis::ALL.iter().fold(Vector::ZERO, |acc, &axis| {
        let component = v.component(axis);
        if component == 0.0 {
            return acc;
        }
        let limit = physics::terminal_velocity(world, object, Face::along(axis, component));
        acc.with_component(axis, component.clamp(-limit, limit))
    })
}

pub(crate) fn apply_movement(world: &mut World, elapsed: Duration) {
    let scale = MILLIS_TO_SECONDS * physics::millis(elapsed);
    if scale == 0.0 {
        return;
    }
    let moves: Vec<(ObjectId, Vector)> = world
        .objects()
        .filter(|o| !o.is_immovable() && !o.vector().is_zero())
        .map(|o| (o.id(), clamped_velocity(world, o).scaled(scale)))
        .collect();
    for (id, displacement) in moves {
        if let Some(object) = world.object_mut(id) {
            object.set_location(object.location().plus_vector(displacement));
        }
    }
}

impl Task for MovementTask {
    fn name(&self) -> &str {
        "movement"
    }

    fn execute(&mut self, elapsed: Duration) -> SimResult<()> {
        let mut state = lock(&self.state);
        for world in state.worlds_mut() {
            apply_movement(world, elapsed);
        }
        Ok(())
    }

    fn interval(&self) -> Interval {
        Interval::EVERY_TICK
    }
}
