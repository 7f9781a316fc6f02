use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tickworld_common::{ObjectId, SimError, SimResult, WorldId};

use crate::object::SimObject;

/// Earth surface gravity, in metres per second squared.
pub const DEFAULT_GRAVITY: f64 = 9.8;
/// Air density at sea level, in kilograms per cubic metre.
pub const DEFAULT_AIR_DENSITY: f64 = 1.225;
pub const DEFAULT_GROUND_LEVEL: f64 = 0.0;

/// A world: a set of simulated objects plus the physics constants they obey.
///
/// Objects live in a BTreeMap so every task visits them in the same order
/// on every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    id: WorldId,
    name: String,
    objects: BTreeMap<ObjectId, SimObject>,
    gravity: f64,
    air_density: f64,
    ground_level: f64,
    tick: u64,
}

impl World {
    /// Create an empty world with Earth-like constants.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(WorldId::new(), name)
    }

    pub fn with_id(id: WorldId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            objects: BTreeMap::new(),
            gravity: DEFAULT_GRAVITY,
            air_density: DEFAULT_AIR_DENSITY,
            ground_level: DEFAULT_GROUND_LEVEL,
            tick: 0,
        }
    }

    /// Create a world with explicit constants. Air density must be positive.
    pub fn with_constants(
        name: impl Into<String>,
        gravity: f64,
        air_density: f64,
        ground_level: f64,
    ) -> SimResult<Self> {
        let mut world = Self::new(name);
        world.set_gravity(gravity);
        world.set_air_density(air_density)?;
        world.set_ground_level(ground_level);
        Ok(world)
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of ticks this world has been advanced.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.gravity = gravity;
    }

    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    pub fn set_air_density(&mut self, density: f64) -> SimResult<()> {
        self.air_density = SimError::check_positive("air density", density)?;
        Ok(())
    }

    pub fn ground_level(&self) -> f64 {
        self.ground_level
    }

    pub fn set_ground_level(&mut self, level: f64) {
        self.ground_level = level;
    }

    /// Register an object. Its location must point at this world and its id
    /// must not already be present.
    pub fn add_object(&mut self, object: SimObject) -> SimResult<()> {
        let provided = object.location().world();
        if provided != self.id {
            return Err(SimError::DifferentWorld {
                required: self.id,
                provided,
            });
        }
        if self.objects.contains_key(&object.id()) {
            return Err(SimError::DuplicateObject(object.id()));
        }
        tracing::debug!(world = %self.name, object = %object.id().short(), kind = object.kind().name(), "object added");
        self.objects.insert(object.id(), object);
        Ok(())
    }

    /// Remove an object. Returns it if it was present.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SimObject> {
        let removed = self.objects.remove(&id);
        if removed.is_some() {
            tracing::debug!(world = %self.name, object = %id.short(), "object removed");
        }
        removed
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SimObject> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SimObject> {
        self.objects.get_mut(&id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate objects in id order.
    pub fn objects(&self) -> impl Iterator<Item = &SimObject> {
        self.objects.values()
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut SimObject> {
        self.objects.values_mut()
    }

    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    /// Owned copy of every object, detached from the world.
    pub fn objects_snapshot(&self) -> Vec<SimObject> {
        self.objects.values().cloned().collect()
    }
}
