use serde::{Deserialize, Serialize};
use tickworld_common::{SimError, SimResult};
use tickworld_spatial::{Location, Vector};

use crate::object::SimObject;

/// The firing point of a shooter: an offset from the shooter's location and
/// the unit direction projectiles leave in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Barrel {
    offset: Vector,
    direction: Vector,
}

impl Barrel {
    /// `direction` is normalized. A zero direction points nowhere and is
    /// rejected.
    pub fn new(offset: Vector, direction: Vector) -> SimResult<Self> {
        Ok(Self {
            offset,
            direction: unit(direction)?,
        })
    }

    pub fn offset(&self) -> Vector {
        self.offset
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vector) -> SimResult<()> {
        self.direction = unit(direction)?;
        Ok(())
    }

    /// Where projectiles appear when `shooter` fires.
    pub fn muzzle(&self, shooter: &SimObject) -> Location {
        shooter.location().plus_vector(self.offset)
    }

    /// A projectile at the muzzle moving at `speed` m/s along the barrel, on
    /// top of the shooter's own velocity. Mass and volume are left to the
    /// caller.
    pub fn fire(&self, shooter: &SimObject, speed: f64) -> SimResult<SimObject> {
        let speed = SimError::check_non_negative("muzzle speed", speed)?;
        let vector = shooter.vector().plus(self.direction.scaled(speed));
        Ok(SimObject::projectile(self.muzzle(shooter), Some(shooter.id())).with_vector(vector))
    }
}

fn unit(direction: Vector) -> SimResult<Vector> {
    direction
        .normalized()
        .ok_or(SimError::DivisionByZero("barrel direction"))
}
