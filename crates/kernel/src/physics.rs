//! Physics formulas used by the tick pipeline.
//!
//! Nothing in here returns an error. Terms that would divide by zero are
//! floored to [`EPSILON`] instead, so a degenerate object can never stop a tick.

use std::time::Duration;
use tickworld_spatial::{Face, Vector};

use crate::object::SimObject;
use crate::world::World;

/// Smallest positive real, substituted for zero denominators.
pub const EPSILON: f64 = f64::MIN_POSITIVE;

/// Fraction of a second in one millisecond. Vectors are in metres per
/// second, elapsed time is counted in milliseconds.
pub const MILLIS_TO_SECONDS: f64 = 0.001;

/// Elapsed time in (fractional) milliseconds.
pub fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Velocity gained from gravity in `world` over `elapsed`.
pub fn gravity(world: &World, elapsed: Duration) -> f64 {
    world.gravity() / 1000.0 * millis(elapsed)
}

/// Density of the fluid surrounding `object`: the densest fluid object that
/// overlaps it, or the world's air when none does.
pub fn ambient_density(world: &World, object: &SimObject) -> f64 {
    let bounds = object.bounds();
    world
        .objects()
        .filter(|o| o.is_fluid() && o.id() != object.id())
        .filter(|o| o.bounds().overlaps(&bounds))
        .map(SimObject::density)
        .fold(None, |max: Option<f64>, d| Some(max.map_or(d, |m| m.max(d))))
        .unwrap_or_else(|| world.air_density())
}

/// Terminal velocity of `object` moving towards `face`, in metres per second.
///
/// `sqrt(2·m·g / (ρ·A·Cd))` with the fluid density, cross-section and drag
/// coefficient each floored to [`EPSILON`]. Without gravity nothing limits
/// the speed, so the result is infinite.
pub fn terminal_velocity(world: &World, object: &SimObject, face: Face) -> f64 {
    if world.gravity() == 0.0 {
        return f64::INFINITY;
    }
    let driving = 2.0 * object.mass_kilograms() * world.gravity().abs();
    let density = ambient_density(world, object).max(EPSILON);
    let direction = Vector::from_dvec3(face.unit());
    let cross_section = object.volume().cross_section(direction).max(EPSILON);
    let drag = object.drag_coefficient().max(EPSILON);
    (driving / (density * cross_section * drag)).sqrt()
}

/// `½·m·v²`, in joules.
pub fn kinetic_energy(object: &SimObject) -> f64 {
    let v = object.velocity();
    if v == 0.0 {
        return 0.0;
    }
    0.5 * object.mass_kilograms() * v * v
}

/// `m·g·h`, where `h` is measured from the top of the highest object this one
/// stands on if that is above ground level, otherwise from ground level.
pub fn potential_energy(world: &World, object: &SimObject) -> f64 {
    let bounds = object.bounds();
    let floor = world
        .objects()
        .filter(|o| o.id() != object.id())
        .map(|o| o.bounds())
        .filter(|support| bounds.is_standing_on(support))
        .map(|support| support.max_y())
        .filter(|top| *top > world.ground_level())
        .fold(world.ground_level(), f64::max);
    let height = object.location().y() - floor;
    object.mass_kilograms() * world.gravity() * height
}

pub fn mechanical_energy(world: &World, object: &SimObject) -> f64 {
    kinetic_energy(object) + potential_energy(world, object)
}

/// Whether `a` rests on `b`.
pub fn is_standing_on(a: &SimObject, b: &SimObject) -> bool {
    a.bounds().is_standing_on(&b.bounds())
}

/// Whether `object` rests on any immovable object of `world`.
pub fn is_resting(world: &World, object: &SimObject) -> bool {
    world
        .objects()
        .filter(|o| o.is_immovable() && o.id() != object.id())
        .any(|support| is_standing_on(object, support))
}
