use glam::DVec3;
use serde::{Deserialize, Serialize};
use tickworld_common::{SimError, SimResult, WorldId};

use crate::vector::Vector;

/// Wrap an angle in degrees into (-180, 180].
///
/// Uses `((v + 180) mod 360) - 180` with a Euclidean modulo, then maps the
/// excluded lower bound -180 onto 180.
pub fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 { wrapped + 360.0 } else { wrapped }
}

/// A position in a world plus an orientation.
///
/// Orientation angles are stored as given and normalized whenever they are
/// read, so arithmetic on them never accumulates out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    world: WorldId,
    position: DVec3,
    yaw: f64,
    pitch: f64,
    roll: f64,
}

impl Location {
    pub fn new(world: WorldId, x: f64, y: f64, z: f64) -> Self {
        Self::at(world, DVec3::new(x, y, z))
    }

    pub fn at(world: WorldId, position: DVec3) -> Self {
        Self {
            world,
            position,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    /// The origin of `world`.
    pub fn origin(world: WorldId) -> Self {
        Self::at(world, DVec3::ZERO)
    }

    pub fn world(&self) -> WorldId {
        self.world
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    pub fn yaw(&self) -> f64 {
        normalize_angle(self.yaw)
    }

    pub fn pitch(&self) -> f64 {
        normalize_angle(self.pitch)
    }

    pub fn roll(&self) -> f64 {
        normalize_angle(self.roll)
    }

    pub fn with_position(&self, position: DVec3) -> Self {
        Self { position, ..*self }
    }

    pub fn with_x(&self, x: f64) -> Self {
        self.with_position(DVec3::new(x, self.position.y, self.position.z))
    }

    pub fn with_y(&self, y: f64) -> Self {
        self.with_position(DVec3::new(self.position.x, y, self.position.z))
    }

    pub fn with_z(&self, z: f64) -> Self {
        self.with_position(DVec3::new(self.position.x, self.position.y, z))
    }

    pub fn with_rotation(&self, yaw: f64, pitch: f64, roll: f64) -> Self {
        Self {
            yaw,
            pitch,
            roll,
            ..*self
        }
    }

    pub fn plus_x(&self, delta: f64) -> Self {
        self.with_position(self.position + DVec3::new(delta, 0.0, 0.0))
    }

    pub fn plus_y(&self, delta: f64) -> Self {
        self.with_position(self.position + DVec3::new(0.0, delta, 0.0))
    }

    pub fn plus_z(&self, delta: f64) -> Self {
        self.with_position(self.position + DVec3::new(0.0, 0.0, delta))
    }

    pub fn plus_yaw(&self, delta: f64) -> Self {
        Self {
            yaw: self.yaw + delta,
            ..*self
        }
    }

    pub fn plus_pitch(&self, delta: f64) -> Self {
        Self {
            pitch: self.pitch + delta,
            ..*self
        }
    }

    pub fn plus_roll(&self, delta: f64) -> Self {
        Self {
            roll: self.roll + delta,
            ..*self
        }
    }

    /// Translate by a displacement. Orientation is unchanged.
    pub fn plus_vector(&self, displacement: Vector) -> Self {
        self.with_position(self.position + displacement.as_dvec3())
    }

    /// Add another location's position and orientation to this one.
    pub fn offset_by(&self, other: &Location) -> SimResult<Self> {
        self.same_world(other)?;
        Ok(Self {
            world: self.world,
            position: self.position + other.position,
            yaw: self.yaw + other.yaw,
            pitch: self.pitch + other.pitch,
            roll: self.roll + other.roll,
        })
    }

    /// Euclidean distance between two locations in the same world.
    pub fn distance_to(&self, other: &Location) -> SimResult<f64> {
        self.same_world(other)?;
        Ok(self.position.distance(other.position))
    }

    fn same_world(&self, other: &Location) -> SimResult<()> {
        if self.world != other.world {
            return Err(SimError::DifferentWorld {
                required: self.world,
                provided: other.world,
            });
        }
        Ok(())
    }
}
