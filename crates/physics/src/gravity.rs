use std::time::Duration;
use tickworld_common::{ObjectId, SimResult};
use tickworld_kernel::{lock, physics, SharedState, World};
use tickworld_scheduler::{Interval, Task};

/// Pulls every physics-obeying object down along Y, unless it rests on an
/// immovable object.
pub struct GravityTask {
    state: SharedState,
}

impl GravityTask {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

pub(crate) fn apply_gravity(world: &mut World, elapsed: Duration) {
    let dv = physics::gravity(world, elapsed);
    if dv == 0.0 {
        return;
    }
    let falling: Vec<ObjectId> = world
        .objects()
        .filter(|o| o.obeys_physics() && !o.is_immovable())
        .filter(|o| !physics::is_resting(world, o))
        .map(|o| o.id())
        .collect();
    for id in falling {
        if let Some(object) = world.object_mut(id) {
            object.set_vector(object.vector().plus_y(-dv));
        }
    }
}

impl Task for GravityTask {
    fn name(&self) -> &str {
        "gravity"
    }

    fn execute(&mut self, elapsed: Duration) -> SimResult<()> {
        let mut state = lock(&self.state);
        for world in state.worlds_mut() {
            apply_gravity(world, elapsed);
        }
        Ok(())
    }

    fn interval(&self) -> Interval {
        Interval::EVERY_TICK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickworld_kernel::{SimObject, State};
    use tickworld_spatial::{Location, Mass, Vector, Volume};

    fn ground(world: &World) -> SimObject {
        SimObject::immovable(Location::new(world.id(), 0.0, -1.0, 0.0))
            .with_volume(Volume::new(100.0, 2.0, 100.0).unwrap())
    }

    fn ball(world: &World, y: f64) -> SimObject {
        SimObject::realistic(Location::new(world.id(), 0.0, y, 0.0))
            .with_mass(Mass::kilograms(1.0).unwrap())
            .with_volume(Volume::cube(0.5).unwrap())
    }

    #[test]
    fn one_second_of_gravity_adds_its_full_value() {
        let mut world = World::new("w");
        let b = ball(&world, 50.0);
        let id = b.id();
        world.add_object(b).unwrap();
        let mut state = State::new();
        state.add_world(world).unwrap();
        let shared = state.shared();

        let mut task = GravityTask::new(shared.clone());
        task.execute(Duration::from_millis(1000)).unwrap();

        let state = lock(&shared);
        let vy = state.worlds()[0].object(id).unwrap().vector().y();
        assert!((vy + 9.8).abs() < 1e-12);
    }

    #[test]
    fn resting_objects_are_not_pulled() {
        let mut world = World::new("w");
        world.add_object(ground(&world)).unwrap();
        let resting = ball(&world, 0.25);
        let id = resting.id();
        world.add_object(resting).unwrap();

        apply_gravity(&mut world, Duration::from_millis(1000));
        assert_eq!(world.object(id).unwrap().vector(), Vector::ZERO);
    }

    #[test]
    fn objects_outside_physics_and_immovables_are_skipped() {
        let mut world = World::new("w");
        let ghost = SimObject::transient(Location::new(world.id(), 0.0, 10.0, 0.0))
            .with_obeys_physics(false)
            .unwrap();
        let ghost_id = ghost.id();
        let g = ground(&world);
        let ground_id = g.id();
        world.add_object(ghost).unwrap();
        world.add_object(g).unwrap();

        apply_gravity(&mut world, Duration::from_millis(500));
        assert_eq!(world.object(ghost_id).unwrap().vector(), Vector::ZERO);
        assert_eq!(world.object(ground_id).unwrap().vector(), Vector::ZERO);
    }

    #[test]
    fn zero_gravity_worlds_are_left_alone() {
        let mut world = World::with_constants("space", 0.0, 1e-6, 0.0).unwrap();
        let b = ball(&world, 10.0);
        let id = b.id();
        world.add_object(b).unwrap();
        apply_gravity(&mut world, Duration::from_millis(1000));
        assert_eq!(world.object(id).unwrap().vector(), Vector::ZERO);
    }
}
