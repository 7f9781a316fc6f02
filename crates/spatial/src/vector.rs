use glam::DVec3;
use serde::{Deserialize, Serialize};
use tickworld_common::{SimError, SimResult};

use crate::face::{Axis, Face};

/// Velocity of an object, in metres per second.
///
/// Immutable: every operation returns a new vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector(DVec3);

impl Vector {
    pub const ZERO: Vector = Vector(DVec3::ZERO);
    pub const UP: Vector = Vector(DVec3::Y);
    pub const DOWN: Vector = Vector(DVec3::NEG_Y);

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    pub fn from_dvec3(v: DVec3) -> Self {
        Self(v)
    }

    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn component(&self, axis: Axis) -> f64 {
        axis.of(self.0)
    }

    /// Speed: the Euclidean length of the vector.
    pub fn magnitude(&self) -> f64 {
        self.0.length()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == DVec3::ZERO
    }

    /// Whether the vector has a component pointing out of `face`.
    pub fn is_facing(&self, face: Face) -> bool {
        let c = self.component(face.axis());
        if face.is_positive() { c > 0.0 } else { c < 0.0 }
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(&self) -> Option<Vector> {
        self.0.try_normalize().map(Self)
    }

    pub fn with_component(&self, axis: Axis, value: f64) -> Self {
        let mut v = self.0;
        match axis {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
        Self(v)
    }

    pub fn with_x(&self, x: f64) -> Self {
        self.with_component(Axis::X, x)
    }

    pub fn with_y(&self, y: f64) -> Self {
        self.with_component(Axis::Y, y)
    }

    pub fn with_z(&self, z: f64) -> Self {
        self.with_component(Axis::Z, z)
    }

    pub fn plus_x(&self, delta: f64) -> Self {
        Self(self.0 + DVec3::new(delta, 0.0, 0.0))
    }

    pub fn plus_y(&self, delta: f64) -> Self {
        Self(self.0 + DVec3::new(0.0, delta, 0.0))
    }

    pub fn plus_z(&self, delta: f64) -> Self {
        Self(self.0 + DVec3::new(0.0, 0.0, delta))
    }

    pub fn plus(&self, other: Vector) -> Self {
        Self(self.0 + other.0)
    }

    pub fn minus(&self, other: Vector) -> Self {
        Self(self.0 - other.0)
    }

    /// Multiply every component by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0 * factor)
    }

    /// Divide every component by `divisor`, failing on a zero divisor.
    pub fn checked_div(&self, divisor: f64) -> SimResult<Self> {
        if divisor == 0.0 {
            return Err(SimError::DivisionByZero("vector division"));
        }
        Ok(Self(self.0 / divisor))
    }
}
