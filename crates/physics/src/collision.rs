use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tickworld_common::{ObjectId, SimResult, WorldId};
use tickworld_events::{CollisionEvent, Event, EventBus};
use tickworld_kernel::{lock, SharedState, World};
use tickworld_scheduler::{Interval, Task};

/// Unordered pair of object ids, stored smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectPair(ObjectId, ObjectId);

impl ObjectPair {
    pub fn new(a: ObjectId, b: ObjectId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn first(&self) -> ObjectId {
        self.0
    }

    pub fn second(&self) -> ObjectId {
        self.1
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.0 == id || self.1 == id
    }
}

/// Every unordered pair of physics-obeying objects in `world` whose bounds
/// overlap. A projectile never collides with its own shooter.
pub fn overlapping_pairs(world: &World) -> HashSet<ObjectPair> {
    let candidates: Vec<_> = world
        .objects()
        .filter(|o| o.obeys_physics())
        .map(|o| (o, o.bounds()))
        .collect();
    let mut pairs = HashSet::new();
    for (i, (a, a_bounds)) in candidates.iter().enumerate() {
        for (b, b_bounds) in &candidates[i + 1..] {
            if a_bounds.overlaps(b_bounds) && !a.is_shot_pair(b) {
                pairs.insert(ObjectPair::new(a.id(), b.id()));
            }
        }
    }
    pairs
}

/// Remembers which pairs overlapped at the end of the previous tick so that
/// a contact raises one event when it starts rather than one per tick.
#[derive(Debug, Default)]
pub struct CollisionTracker {
    worlds: HashMap<WorldId, HashSet<ObjectPair>>,
}

impl CollisionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tracked set of `world` with `current` and return the pairs
    /// that were not tracked before, in id order.
    ///
    /// Pairs that stopped overlapping, or whose objects left the world, are
    /// no longer in `current` and so are forgotten here as well.
    pub fn update(&mut self, world: WorldId, current: HashSet<ObjectPair>) -> Vec<ObjectPair> {
        let tracked = self.worlds.entry(world).or_default();
        let mut entered: Vec<ObjectPair> = current.difference(tracked).copied().collect();
        entered.sort();
        *tracked = current;
        entered
    }

    /// Forget every world for which `keep` returns false.
    pub fn retain_worlds(&mut self, mut keep: impl FnMut(WorldId) -> bool) {
        self.worlds.retain(|id, _| keep(*id));
    }

    pub fn is_tracked(&self, world: WorldId, pair: ObjectPair) -> bool {
        self.worlds
            .get(&world)
            .is_some_and(|pairs| pairs.contains(&pair))
    }

    /// Number of pairs currently in contact in `world`.
    pub fn tracked(&self, world: WorldId) -> usize {
        self.worlds.get(&world).map_or(0, HashSet::len)
    }

    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }
}

/// Detects new contacts and publishes a [`CollisionEvent`] for each.
pub struct CollisionTask {
    state: SharedState,
    bus: Arc<EventBus>,
    tracker: CollisionTracker,
}

impl CollisionTask {
    pub fn new(state: SharedState, bus: Arc<EventBus>) -> Self {
        Self {
            state,
            bus,
            tracker: CollisionTracker::new(),
        }
    }

    pub fn tracker(&self) -> &CollisionTracker {
        &self.tracker
    }
}

impl Task for CollisionTask {
    fn name(&self) -> &str {
        "collision"
    }

    fn execute(&mut self, _elapsed: Duration) -> SimResult<()> {
        let mut state = lock(&self.state);
        let live: HashSet<WorldId> = state.worlds().iter().map(World::id).collect();
        self.tracker.retain_worlds(|id| live.contains(&id));

        for world in state.worlds_mut() {
            let entered = self.tracker.update(world.id(), overlapping_pairs(world));
            for pair in entered {
                tracing::trace!(
                    world = %world.name(),
                    first = %pair.first().short(),
                    second = %pair.second().short(),
                    "collision"
                );
                let event = Event::collision(CollisionEvent::new(world.id(), pair.first(), pair.second()));
                self.bus.publish(event, world);
            }
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
    use std::sync::Mutex;
    use tickworld_common::Priority;
    use tickworld_events::{EventKind, Listener, Subscription};
    use tickworld_kernel::{SimObject, State};
    use tickworld_spatial::{Location, Vector, Volume};

    use crate::listeners::CollisionResponseListener;

    struct Collected(Mutex<Vec<(ObjectId, ObjectId)>>);

    impl Listener for Collected {
        fn name(&self) -> &str {
            "collected"
        }

        fn subscription(&self) -> Subscription {
            Subscription::Kind(EventKind::Collision)
        }

        fn priority(&self) -> Priority {
            Priority::Monitor
        }

        fn handle(&self, event: &mut Event, _world: &mut World) -> SimResult<()> {
            if let Some(c) = event.as_collision() {
                self.0.lock().unwrap().push(c.objects());
            }
            Ok(())
        }
    }

    fn block(world: &World, x: f64) -> SimObject {
        SimObject::transient(Location::new(world.id(), x, 0.0, 0.0))
            .with_volume(Volume::cube(1.0).unwrap())
    }

    fn move_to(state: &SharedState, id: ObjectId, x: f64) {
        let mut state = lock(state);
        let world = &mut state.worlds_mut()[0];
        let object = world.object_mut(id).unwrap();
        object.set_location(object.location().with_x(x));
    }

    #[test]
    fn pair_is_unordered() {
        let (a, b) = (ObjectId::new(), ObjectId::new());
        assert_eq!(ObjectPair::new(a, b), ObjectPair::new(b, a));
        assert!(ObjectPair::new(a, b).contains(a));
        assert!(ObjectPair::new(a, b).first() <= ObjectPair::new(a, b).second());
    }

    #[test]
    fn overlapping_pairs_skip_objects_outside_physics() {
        let mut world = World::new("w");
        world.add_object(block(&world, 0.0)).unwrap();
        world.add_object(block(&world, 0.5)).unwrap();
        world
            .add_object(block(&world, 0.25).with_obeys_physics(false).unwrap())
            .unwrap();
        world.add_object(block(&world, 10.0)).unwrap();
        assert_eq!(overlapping_pairs(&world).len(), 1);
    }

    #[test]
    fn projectiles_pass_through_their_shooter() {
        let mut world = World::new("w");
        let gunner = block(&world, 0.0);
        let muzzle = Location::new(world.id(), 0.4, 0.0, 0.0);
        let bullet = SimObject::projectile(muzzle, Some(gunner.id()))
            .with_volume(Volume::cube(0.1).unwrap());
        let bystander = block(&world, 0.9);
        let (bullet_id, bystander_id) = (bullet.id(), bystander.id());
        world.add_object(gunner).unwrap();
        world.add_object(bullet).unwrap();
        world.add_object(bystander).unwrap();

        let pairs = overlapping_pairs(&world);
        // The gunner and bystander touch each other; the bullet only hits the bystander.
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&ObjectPair::new(bullet_id, bystander_id)));
        assert!(!pairs.iter().any(|p| p.contains(bullet_id) && !p.contains(bystander_id)));
    }

    #[test]
    fn collisions_are_edge_triggered() {
        let mut world = World::new("w");
        let a = block(&world, 0.0);
        let b = block(&world, 5.0);
        let (a_id, b_id) = (a.id(), b.id());
        world.add_object(a).unwrap();
        world.add_object(b).unwrap();
        let mut state = State::new();
        state.add_world(world).unwrap();
        let state = state.shared();

        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(Collected(Mutex::new(Vec::new())));
        bus.register(seen.clone());
        let mut task = CollisionTask::new(state.clone(), bus);
        let tick = Duration::from_millis(15);

        task.execute(tick).unwrap();
        assert!(seen.0.lock().unwrap().is_empty());

        move_to(&state, b_id, 0.5);
        task.execute(tick).unwrap();
        assert_eq!(seen.0.lock().unwrap().len(), 1);

        // Still overlapping: nothing new.
        move_to(&state, b_id, 0.4);
        task.execute(tick).unwrap();
        task.execute(tick).unwrap();
        assert_eq!(seen.0.lock().unwrap().len(), 1);

        move_to(&state, b_id, 5.0);
        task.execute(tick).unwrap();
        assert_eq!(seen.0.lock().unwrap().len(), 1);

        move_to(&state, b_id, 0.9);
        task.execute(tick).unwrap();
        let events = seen.0.lock().unwrap();
        assert_eq!(events.len(), 2);
        let pair = ObjectPair::new(a_id, b_id);
        assert_eq!(events[1], (pair.first(), pair.second()));
    }

    #[test]
    fn tracker_forgets_removed_objects_and_worlds() {
        let mut world = World::new("w");
        let world_id = world.id();
        let a = block(&world, 0.0);
        let b = block(&world, 0.5);
        let b_id = b.id();
        world.add_object(a).unwrap();
        world.add_object(b).unwrap();
        let mut state = State::new();
        state.add_world(world).unwrap();
        let state = state.shared();

        let mut task = CollisionTask::new(state.clone(), Arc::new(EventBus::new()));
        task.execute(Duration::ZERO).unwrap();
        assert_eq!(task.tracker().tracked(world_id), 1);

        lock(&state).worlds_mut()[0].remove_object(b_id);
        task.execute(Duration::ZERO).unwrap();
        assert_eq!(task.tracker().tracked(world_id), 0);

        lock(&state).remove_world(world_id);
        task.execute(Duration::ZERO).unwrap();
        assert_eq!(task.tracker().world_count(), 0);
    }

    #[test]
    fn face_first_crossing_counts_as_collision() {
        // A long thin bar pierces a box through its faces; no corner of
        // either lies inside the other.
        let mut world = World::new("w");
        let bar = SimObject::transient(Location::origin(world.id()))
            .with_volume(Volume::new(10.0, 0.2, 0.2).unwrap());
        let slab = SimObject::transient(Location::origin(world.id()))
            .with_volume(Volume::new(1.0, 5.0, 5.0).unwrap());
        world.add_object(bar).unwrap();
        world.add_object(slab).unwrap();
        let mut tracker = CollisionTracker::new();
        assert_eq!(tracker.update(world.id(), overlapping_pairs(&world)).len(), 1);
    }

    struct Brake;

    impl Listener for Brake {
        fn name(&self) -> &str {
            "brake"
        }

        fn handle(&self, event: &mut Event, world: &mut World) -> SimResult<()> {
            let Some(c) = event.as_collision() else {
                return Ok(());
            };
            for id in [c.first(), c.second()] {
                if let Some(o) = world.object_mut(id) {
                    o.set_vector(Vector::ZERO);
                }
            }
            Ok(())
        }
    }

    #[test]
    fn listeners_change_the_state_through_their_world() {
        let mut world = World::new("w");
        let a = block(&world, 0.0).with_vector(Vector::new(1.0, 0.0, 0.0));
        let b = block(&world, 0.5).with_vector(Vector::new(-1.0, 0.0, 0.0));
        let (a_id, b_id) = (a.id(), b.id());
        world.add_object(a).unwrap();
        world.add_object(b).unwrap();
        let mut state = State::new();
        state.add_world(world).unwrap();
        let state = state.shared();

        let bus = Arc::new(EventBus::new());
        bus.register(Arc::new(Brake));
        CollisionTask::new(state.clone(), bus)
            .execute(Duration::from_millis(15))
            .unwrap();

        let state = lock(&state);
        let world = &state.worlds()[0];
        assert_eq!(world.object(a_id).unwrap().vector(), Vector::ZERO);
        assert_eq!(world.object(b_id).unwrap().vector(), Vector::ZERO);
    }

    #[test]
    fn fluid_contacts_are_published_but_not_bounced() {
        let mut world = World::new("w");
        let water = block(&world, 0.0).with_fluid(true);
        let swimmer = block(&world, 0.5).with_vector(Vector::new(-2.0, 0.0, 0.0));
        let swimmer_id = swimmer.id();
        world.add_object(water).unwrap();
        world.add_object(swimmer).unwrap();
        let mut state = State::new();
        state.add_world(world).unwrap();
        let state = state.shared();

        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(Collected(Mutex::new(Vec::new())));
        bus.register(seen.clone());
        bus.register(Arc::new(CollisionResponseListener::default()));
        CollisionTask::new(state.clone(), bus)
            .execute(Duration::from_millis(15))
            .unwrap();

        assert_eq!(seen.0.lock().unwrap().len(), 1);
        let state = lock(&state);
        let swimmer = state.worlds()[0].object(swimmer_id).unwrap();
        assert_eq!(swimmer.vector(), Vector::new(-2.0, 0.0, 0.0));
    }
}
