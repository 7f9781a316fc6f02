use serde::{Deserialize, Serialize};
use tickworld_common::{ObjectId, SimError, SimResult};
use tickworld_spatial::{BoundingBox, Location, Mass, Vector, Volume};

/// Drag coefficient objects start with, and the one immovable objects keep.
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 1.0;

/// Behaviour policy of a simulated object.
///
/// The policy decides which mutators take effect; the data layout is the same
/// for every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Always obeys physics; everything else is mutable.
    Realistic,
    /// Static geometry such as ground and walls. Reads as infinitely heavy and
    /// motionless; location, vector, mass and drag writes are ignored.
    Immovable,
    /// Fully mutable, never persisted.
    Transient,
    /// Fired from a [`crate::Barrel`]. Behaves like a transient object and
    /// remembers who fired it.
    Projectile { shooter: Option<ObjectId> },
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Realistic => "realistic",
            ObjectKind::Immovable => "immovable",
            ObjectKind::Transient => "transient",
            ObjectKind::Projectile { .. } => "projectile",
        }
    }

    pub fn is_persistent(self) -> bool {
        !matches!(self, ObjectKind::Transient | ObjectKind::Projectile { .. })
    }
}

/// An object taking part in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimObject {
    id: ObjectId,
    kind: ObjectKind,
    location: Location,
    vector: Vector,
    mass: Mass,
    volume: Volume,
    fluid: bool,
    obeys_physics: bool,
    drag_coefficient: f64,
}

impl SimObject {
    /// Create an object of `kind` at `location`, massless, zero-sized and at rest.
    pub fn new(kind: ObjectKind, location: Location) -> Self {
        Self {
            id: ObjectId::new(),
            kind,
            location,
            vector: Vector::ZERO,
            mass: Mass::MASSLESS,
            volume: Volume::ZERO,
            fluid: false,
            obeys_physics: true,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
        }
    }

    pub fn realistic(location: Location) -> Self {
        Self::new(ObjectKind::Realistic, location)
    }

    pub fn immovable(location: Location) -> Self {
        Self::new(ObjectKind::Immovable, location)
    }

    pub fn transient(location: Location) -> Self {
        Self::new(ObjectKind::Transient, location)
    }

    pub fn projectile(location: Location, shooter: Option<ObjectId>) -> Self {
        Self::new(ObjectKind::Projectile { shooter }, location)
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = id;
        self
    }

    pub fn with_vector(mut self, vector: Vector) -> Self {
        self.set_vector(vector);
        self
    }

    pub fn with_mass(mut self, mass: Mass) -> Self {
        self.set_mass(mass);
        self
    }

    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_fluid(mut self, fluid: bool) -> Self {
        self.fluid = fluid;
        self
    }

    pub fn with_obeys_physics(mut self, obeys: bool) -> SimResult<Self> {
        self.set_obeys_physics(obeys)?;
        Ok(self)
    }

    pub fn with_drag_coefficient(mut self, coefficient: f64) -> SimResult<Self> {
        self.set_drag_coefficient(coefficient)?;
        Ok(self)
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn is_immovable(&self) -> bool {
        self.kind == ObjectKind::Immovable
    }

    /// The object that fired this one, if it is a projectile with a known
    /// shooter.
    pub fn shooter(&self) -> Option<ObjectId> {
        match self.kind {
            ObjectKind::Projectile { shooter } => shooter,
            _ => None,
        }
    }

    /// Whether one of the two objects fired the other.
    pub fn is_shot_pair(&self, other: &SimObject) -> bool {
        self.shooter() == Some(other.id()) || other.shooter() == Some(self.id())
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn vector(&self) -> Vector {
        match self.kind {
            ObjectKind::Immovable => Vector::ZERO,
            _ => self.vector,
        }
    }

    /// Current speed in metres per second.
    pub fn velocity(&self) -> f64 {
        self.vector().magnitude()
    }

    pub fn mass(&self) -> Mass {
        match self.kind {
            ObjectKind::Immovable => Mass::INFINITE,
            _ => self.mass,
        }
    }

    pub fn mass_kilograms(&self) -> f64 {
        self.mass().to_kilograms()
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn is_fluid(&self) -> bool {
        self.fluid
    }

    pub fn obeys_physics(&self) -> bool {
        self.obeys_physics
    }

    pub fn drag_coefficient(&self) -> f64 {
        match self.kind {
            ObjectKind::Immovable => DEFAULT_DRAG_COEFFICIENT,
            _ => self.drag_coefficient,
        }
    }

    /// Bounding box centered on the object's location.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.location, self.volume)
    }

    /// Mass per cubic metre, or 0 for an object without volume.
    pub fn density(&self) -> f64 {
        let cubic_metres = self.volume.cubic_metres();
        if cubic_metres == 0.0 {
            return 0.0;
        }
        self.mass_kilograms() / cubic_metres
    }

    pub fn set_location(&mut self, location: Location) {
        if self.kind != ObjectKind::Immovable {
            self.location = location;
        }
    }

    pub fn set_vector(&mut self, vector: Vector) {
        if self.kind != ObjectKind::Immovable {
            self.vector = vector;
        }
    }

    pub fn set_mass(&mut self, mass: Mass) {
        if self.kind != ObjectKind::Immovable {
            self.mass = mass;
        }
    }

    pub fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
    }

    pub fn set_fluid(&mut self, fluid: bool) {
        self.fluid = fluid;
    }

    /// Realistic objects always obey physics; switching it off is rejected.
    pub fn set_obeys_physics(&mut self, obeys: bool) -> SimResult<()> {
        if self.kind == ObjectKind::Realistic && !obeys {
            return Err(SimError::PinnedField {
                field: "obeys_physics",
                kind: self.kind.name(),
            });
        }
        self.obeys_physics = obeys;
        Ok(())
    }

    /// Set the drag coefficient. Must be positive; ignored for immovable objects.
    pub fn set_drag_coefficient(&mut self, coefficient: f64) -> SimResult<()> {
        let coefficient = SimError::check_positive("drag coefficient", coefficient)?;
        if self.kind != ObjectKind::Immovable {
            self.drag_coefficient = coefficient;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickworld_common::WorldId;

    fn origin() -> Location {
        Location::origin(WorldId::new())
    }

    #[test]
    fn defaults() {
        let o = SimObject::transient(origin());
        assert_eq!(o.vector(), Vector::ZERO);
        assert_eq!(o.mass(), Mass::MASSLESS);
        assert_eq!(o.volume(), Volume::ZERO);
        assert!(!o.is_fluid());
        assert!(o.obeys_physics());
        assert_eq!(o.drag_coefficient(), DEFAULT_DRAG_COEFFICIENT);
    }

    #[test]
    fn realistic_pins_obeys_physics() {
        let mut o = SimObject::realistic(origin());
        assert_eq!(
            o.set_obeys_physics(false),
            Err(SimError::PinnedField {
                field: "obeys_physics",
                kind: "realistic"
            })
        );
        assert!(o.obeys_physics());
        assert!(o.set_obeys_physics(true).is_ok());
    }

    #[test]
    fn transient_is_fully_mutable() {
        let mut o = SimObject::transient(origin());
        o.set_obeys_physics(false).unwrap();
        o.set_vector(Vector::new(1.0, 2.0, 3.0));
        o.set_location(o.location().plus_y(5.0));
        assert!(!o.obeys_physics());
        assert_eq!(o.vector(), Vector::new(1.0, 2.0, 3.0));
        assert_eq!(o.location().y(), 5.0);
        assert!(!o.kind().is_persistent());
    }

    #[test]
    fn immovable_ignores_motion_and_mass() {
        let start = origin().plus_y(-10.0);
        let mut ground = SimObject::immovable(start)
            .with_vector(Vector::new(0.0, -3.0, 0.0))
            .with_mass(Mass::kilograms(5.0).unwrap());
        ground.set_location(start.plus_y(100.0));
        ground.set_vector(Vector::UP);
        ground.set_drag_coefficient(3.0).unwrap();

        assert_eq!(ground.location(), start);
        assert_eq!(ground.vector(), Vector::ZERO);
        assert_eq!(ground.mass(), Mass::INFINITE);
        assert_eq!(ground.drag_coefficient(), DEFAULT_DRAG_COEFFICIENT);
        assert!(ground.kind().is_persistent());
    }

    #[test]
    fn drag_coefficient_must_be_positive() {
        let mut o = SimObject::realistic(origin());
        assert!(matches!(
            o.set_drag_coefficient(0.0),
            Err(SimError::NonPositive { .. })
        ));
        assert!(SimObject::immovable(origin()).with_drag_coefficient(-1.0).is_err());
        o.set_drag_coefficient(0.47).unwrap();
        assert_eq!(o.drag_coefficient(), 0.47);
    }

    #[test]
    fn density_is_mass_over_volume() {
        let water = SimObject::transient(origin())
            .with_mass(Mass::kilograms(8000.0).unwrap())
            .with_volume(Volume::new(2.0, 2.0, 2.0).unwrap());
        assert_eq!(water.density(), 1000.0);
        assert_eq!(SimObject::transient(origin()).density(), 0.0);
    }

    #[test]
    fn projectiles_remember_their_shooter() {
        let gunner = SimObject::realistic(origin());
        let bullet = SimObject::projectile(origin(), Some(gunner.id()));
        let stray = SimObject::projectile(origin(), None);
        assert_eq!(bullet.shooter(), Some(gunner.id()));
        assert_eq!(bullet.kind().name(), "projectile");
        assert!(!bullet.kind().is_persistent());
        assert!(bullet.is_shot_pair(&gunner) && gunner.is_shot_pair(&bullet));
        assert!(!stray.is_shot_pair(&gunner));
        assert_eq!(gunner.shooter(), None);
    }
}
