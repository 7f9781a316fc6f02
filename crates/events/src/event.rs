use std::fmt;
use tickworld_common::{ObjectId, WorldId};

/// Group of related event kinds a listener can subscribe to as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Physics,
}

/// Concrete kind of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Collision,
}

impl EventKind {
    pub fn category(self) -> EventCategory {
        match self {
            EventKind::Collision => EventCategory::Physics,
        }
    }
}

/// Which events a listener wants to see.
///
/// Subscribing to a category matches every kind in it. A matching listener
/// still runs only once per event; there is no per-level fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscription {
    All,
    Category(EventCategory),
    Kind(EventKind),
}

impl Subscription {
    pub fn matches(self, kind: EventKind) -> bool {
        match self {
            Subscription::All => true,
            Subscription::Category(category) => kind.category() == category,
            Subscription::Kind(k) => k == kind,
        }
    }
}

/// Two physics-obeying objects of the same world started to overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    world: WorldId,
    first: ObjectId,
    second: ObjectId,
    cancelled: bool,
}

impl CollisionEvent {
    pub fn new(world: WorldId, first: ObjectId, second: ObjectId) -> Self {
        Self {
            world,
            first,
            second,
            cancelled: false,
        }
    }

    pub fn world(&self) -> WorldId {
        self.world
    }

    pub fn first(&self) -> ObjectId {
        self.first
    }

    pub fn second(&self) -> ObjectId {
        self.second
    }

    pub fn objects(&self) -> (ObjectId, ObjectId) {
        (self.first, self.second)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// The closed set of things that can be published on the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    Collision(CollisionEvent),
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::Collision(_) => EventKind::Collision,
        }
    }
}

type OnHandled = Box<dyn FnOnce(&Event) + Send>;

/// A published event: its payload plus the chain and completion hooks every
/// event carries.
pub struct Event {
    payload: EventPayload,
    cause: Option<Box<Event>>,
    on_handled: Option<OnHandled>,
}

impl Event {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            payload,
            cause: None,
            on_handled: None,
        }
    }

    pub fn collision(event: CollisionEvent) -> Self {
        Self::new(EventPayload::Collision(event))
    }

    /// Record the event that led to this one.
    pub fn caused_by(mut self, cause: Event) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Run `callback` once, after every listener has handled this event.
    pub fn on_handled(mut self, callback: impl FnOnce(&Event) + Send + 'static) -> Self {
        self.on_handled = Some(Box::new(callback));
        self
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut EventPayload {
        &mut self.payload
    }

    /// The preceding event in a chain, `None` for a root event.
    pub fn cause(&self) -> Option<&Event> {
        self.cause.as_deref()
    }

    pub fn as_collision(&self) -> Option<&CollisionEvent> {
        match &self.payload {
            EventPayload::Collision(c) => Some(c),
        }
    }

    pub fn as_collision_mut(&mut self) -> Option<&mut CollisionEvent> {
        match &mut self.payload {
            EventPayload::Collision(c) => Some(c),
        }
    }

    /// Whether a listener cancelled this event. Events that cannot be
    /// cancelled always report `false`.
    pub fn is_cancelled(&self) -> bool {
        match &self.payload {
            EventPayload::Collision(c) => c.is_cancelled(),
        }
    }

    pub(crate) fn take_on_handled(&mut self) -> Option<OnHandled> {
        self.on_handled.take()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("payload", &self.payload)
            .field("cause", &self.cause)
            .field("on_handled", &self.on_handled.is_some())
            .finish()
    }
}
