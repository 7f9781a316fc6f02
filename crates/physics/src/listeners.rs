use tickworld_common::{Priority, SimError, SimResult};
use tickworld_events::{Event, EventKind, Listener, Subscription};
use tickworld_kernel::{physics, SimObject, World};
use tickworld_spatial::{Axis, Vector};

/// Restitution used when none is configured: half the approach speed is
/// given back on impact.
pub const DEFAULT_RESTITUTION: f64 = 0.5;

/// Logs the kinetic energy of both objects of every collision.
#[derive(Debug, Default)]
pub struct EnergyLogListener;

impl Listener for EnergyLogListener {
    fn name(&self) -> &str {
        "energy-log"
    }

    fn subscription(&self) -> Subscription {
        Subscription::Kind(EventKind::Collision)
    }

    fn priority(&self) -> Priority {
        Priority::Lowest
    }

    fn handle(&self, event: &mut Event, world: &mut World) -> SimResult<()> {
        let Some(collision) = event.as_collision() else {
            return Ok(());
        };
        let (Some(first), Some(second)) = (
            world.object(collision.first()),
            world.object(collision.second()),
        ) else {
            return Ok(());
        };
        tracing::debug!(
            world = %world.name(),
            first = %first.id().short(),
            first_energy = physics::kinetic_energy(first),
            second = %second.id().short(),
            second_energy = physics::kinetic_energy(second),
            "collision energies"
        );
        Ok(())
    }
}

/// Resolves a collision with one-dimensional momentum exchange along the
/// contact axis, if the two objects approach each other along it. The
/// contact axis is the one where the bounding boxes penetrate least.
/// Collisions involving a fluid are left alone, since fluids permit overlap.
///
/// With weights `w1 = m1 / (m1 + m2)` and `w2 = m2 / (m1 + m2)`:
/// `v1' = w1·v1 + w2·v2 + w2·e·(v2 − v1)` and
/// `v2' = w1·v1 + w2·v2 + w1·e·(v1 − v2)`.
/// Masses are scaled by the larger one before weighting, so an immovable
/// object (infinite mass) acts as a wall that reflects `e` of the speed.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResponseListener {
    restitution: f64,
}

impl CollisionResponseListener {
    /// `restitution` must lie in `[0, 1]`: 0 is perfectly inelastic, 1 is
    /// perfectly elastic.
    pub fn new(restitution: f64) -> SimResult<Self> {
        let restitution = SimError::check_range("restitution", restitution, 0.0, 1.0)?;
        Ok(Self { restitution })
    }

    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// New velocities for two objects of masses `m1`, `m2` (kilograms) at
    /// positions `p1`, `p2` moving with `v1`, `v2`. Only the `axis`
    /// component changes.
    pub fn resolve(
        &self,
        axis: Axis,
        (m1, p1, v1): (f64, Vector, Vector),
        (m2, p2, v2): (f64, Vector, Vector),
    ) -> (Vector, Vector) {
        let gap = p2.component(axis) - p1.component(axis);
        let (u1, u2) = (v1.component(axis), v2.component(axis));
        if gap * (u2 - u1) >= 0.0 {
            return (v1, v2);
        }

        let scale = m1.max(m2);
        let (w1, w2) = if scale > 0.0 && scale.is_finite() {
            let (a, b) = (m1 / scale, m2 / scale);
            (a / (a + b), b / (a + b))
        } else {
            (0.5, 0.5)
        };
        let e = self.restitution;
        let shared = w1 * u1 + w2 * u2;
        (
            v1.with_component(axis, shared + w2 * e * (u2 - u1)),
            v2.with_component(axis, shared + w1 * e * (u1 - u2)),
        )
    }
}

impl Default for CollisionResponseListener {
    fn default() -> Self {
        Self {
            restitution: DEFAULT_RESTITUTION,
        }
    }
}

impl Listener for CollisionResponseListener {
    fn name(&self) -> &str {
        "collision-response"
    }

    fn subscription(&self) -> Subscription {
        Subscription::Kind(EventKind::Collision)
    }

    fn handle(&self, event: &mut Event, world: &mut World) -> SimResult<()> {
        if event.is_cancelled() {
            return Ok(());
        }
        let Some(collision) = event.as_collision() else {
            return Ok(());
        };
        let (Some(first), Some(second)) = (
            world.object(collision.first()),
            world.object(collision.second()),
        ) else {
            return Ok(());
        };
        if first.is_fluid() || second.is_fluid() {
            return Ok(());
        }
        let axis = first.bounds().contact_axis(&second.bounds());
        let position = |o: &SimObject| Vector::from_dvec3(o.location().position());
        let (v1, v2) = self.resolve(
            axis,
            (first.mass_kilograms(), position(first), first.vector()),
            (second.mass_kilograms(), position(second), second.vector()),
        );
        let (first_id, second_id) = collision.objects();
        if let Some(o) = world.object_mut(first_id) {
            o.set_vector(v1);
        }
        if let Some(o) = world.object_mut(second_id) {
            o.set_vector(v2);
        }
        Ok(())
    }
}
