use std::time::Duration;
use tickworld_common::{ObjectId, SimResult};
use tickworld_kernel::physics::{self, EPSILON, MILLIS_TO_SECONDS};
use tickworld_kernel::{lock, SharedState, SimObject, World};
use tickworld_scheduler::{Interval, Task};
use tickworld_spatial::Vector;

/// Slows moving objects down with quadratic fluid drag.
pub struct ResistanceTask {
    state: SharedState,
}

impl ResistanceTask {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

/// Vector of `object` after `seconds` of drag in its surrounding fluid.
fn dragged_vector(world: &World, object: &SimObject, seconds: f64) -> Vector {
    let vector = object.vector();
    let Some(direction) = vector.normalized() else {
        return vector;
    };
    let speed = vector.magnitude();
    let area = object.volume().cross_section(direction.scaled(-1.0));
    let force = physics::ambient_density(world, object)
        * object.drag_coefficient()
        * area
        * speed
        * speed;
    let loss = force / object.mass_kilograms().max(EPSILON) * seconds;
    if loss >= speed {
        return Vector::ZERO;
    }
    vector.minus(direction.scaled(loss))
}

pub(crate) fn apply_resistance(world: &mut World, elapsed: Duration) {
    let seconds = physics::millis(elapsed) * MILLIS_TO_SECONDS;
    if seconds == 0.0 {
        return;
    }
    let updates: Vec<(ObjectId, Vector)> = world
        .objects()
        .filter(|o| !o.vector().is_zero())
        .map(|o| (o.id(), dragged_vector(world, o, seconds)))
        .collect();
    for (id, vector) in updates {
        if let Some(object) = world.object_mut(id) {
            object.set_vector(vector);
        }
    }
}

impl Task for ResistanceTask {
    fn name(&self) -> &str {
        "resistance"
    }

    fn execute(&mut self, elapsed: Duration) -> SimResult<()> {
        let mut state = lock(&self.state);
        for world in state.worlds_mut() {
            apply_resistance(world, elapsed);
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
    use tickworld_spatial::{Location, Mass, Volume};

    fn cube(world: &World, side: f64, kilograms: f64, vector: Vector) -> SimObject {
        SimObject::transient(Location::new(world.id(), 0.0, 50.0, 0.0))
            .with_volume(Volume::cube(side).unwrap())
            .with_mass(Mass::kilograms(kilograms).unwrap())
            .with_vector(vector)
    }

    #[test]
    fn drag_matches_the_quadratic_formula() {
        let mut world = World::with_constants("w", 9.8, 1.0, 0.0).unwrap();
        let c = cube(&world, 1.0, 100.0, Vector::new(10.0, 0.0, 0.0));
        let id = c.id();
        world.add_object(c).unwrap();

        apply_resistance(&mut world, Duration::from_millis(100));
        // F = 1.0 * 1.0 * 1.0 * 10² = 100 N, a = 1 m/s², over 0.1 s.
        let vx = world.object(id).unwrap().vector().x();
        assert!((vx - 9.9).abs() < 1e-9);
    }

    #[test]
    fn drag_never_reverses_direction() {
        let mut world = World::with_constants("w", 9.8, 1000.0, 0.0).unwrap();
        let feather = cube(&world, 2.0, 0.001, Vector::new(0.0, -30.0, 5.0));
        let id = feather.id();
        world.add_object(feather).unwrap();

        apply_resistance(&mut world, Duration::from_millis(1000));
        assert_eq!(world.object(id).unwrap().vector(), Vector::ZERO);
    }

    #[test]
    fn drag_opposes_travel_along_the_diagonal() {
        let mut world = World::new("w");
        let c = cube(&world, 1.0, 50.0, Vector::new(3.0, -4.0, 0.0));
        let id = c.id();
        world.add_object(c).unwrap();

        apply_resistance(&mut world, Duration::from_millis(15));
        let v = world.object(id).unwrap().vector();
        assert!(v.magnitude() < 5.0);
        assert!(v.x() > 0.0 && v.y() < 0.0);
        assert!((v.x() / v.y() + 0.75).abs() < 1e-9);
    }

    #[test]
    fn denser_fluid_slows_harder() {
        let mut world = World::new("w");
        let water = SimObject::transient(Location::new(world.id(), 0.0, 50.0, 0.0))
            .with_volume(Volume::cube(10.0).unwrap())
            .with_mass(Mass::kilograms(1_000_000.0).unwrap())
            .with_fluid(true);
        let in_air = cube(&world, 1.0, 50.0, Vector::new(5.0, 0.0, 0.0));
        let air_speed = dragged_vector(&world, &in_air, 0.1).x();
        world.add_object(water).unwrap();
        let water_speed = dragged_vector(&world, &in_air, 0.1).x();
        assert!(water_speed < air_speed);
    }
}
