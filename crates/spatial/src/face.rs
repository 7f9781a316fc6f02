use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One of the three world axes. Y is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Read this axis' component out of a raw vector.
    pub fn of(self, v: DVec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// A cardinal direction: one face of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    PositiveX,
    PositiveY,
    PositiveZ,
    NegativeX,
    NegativeY,
    NegativeZ,
}

impl Face {
    /// The face on `axis` pointing towards the sign of `component`.
    /// Zero counts as positive.
    pub fn along(axis: Axis, component: f64) -> Self {
        let negative = component < 0.0;
        match (axis, negative) {
            (Axis::X, false) => Face::PositiveX,
            (Axis::X, true) => Face::NegativeX,
            (Axis::Y, false) => Face::PositiveY,
            (Axis::Y, true) => Face::NegativeY,
            (Axis::Z, false) => Face::PositiveZ,
            (Axis::Z, true) => Face::NegativeZ,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Face::PositiveX | Face::NegativeX => Axis::X,
            Face::PositiveY | Face::NegativeY => Axis::Y,
            Face::PositiveZ | Face::NegativeZ => Axis::Z,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Face::PositiveX | Face::PositiveY | Face::PositiveZ)
    }

    /// Unit vector pointing out of this face.
    pub fn unit(self) -> DVec3 {
        match self {
            Face::PositiveX => DVec3::X,
            Face::PositiveY => DVec3::Y,
            Face::PositiveZ => DVec3::Z,
            Face::NegativeX => DVec3::NEG_X,
            Face::NegativeY => DVec3::NEG_Y,
            Face::NegativeZ => DVec3::NEG_Z,
        }
    }
}
