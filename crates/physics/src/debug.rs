use std::time::Duration;
use tickworld_common::SimResult;
use tickworld_kernel::{lock, ObjectKind, SharedState, State};
use tickworld_scheduler::{Interval, Task};

/// Logs where every realistic object is, once a second.
pub struct DebugTask {
    state: SharedState,
    period: Duration,
}

impl DebugTask {
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1000);

    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            period: Self::DEFAULT_PERIOD,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }
}

/// One line per realistic object: world, id, position and velocity.
pub fn describe_realistic(state: &State) -> Vec<String> {
    state
        .worlds()
        .iter()
        .flat_map(|world| {
            world
                .objects()
                .filter(|o| o.kind() == ObjectKind::Realistic)
                .map(move |o| {
                    let loc = o.location();
                    format!(
                        "{} [{}] at ({:.2}, {:.2}, {:.2}) moving {:.2} m/s",
                        world.name(),
                        o.id().short(),
                        loc.x(),
                        loc.y(),
                        loc.z(),
                        o.velocity()
                    )
                })
        })
        .collect()
}

impl Task for DebugTask {
    fn name(&self) -> &str {
        "debug"
    }

    fn execute(&mut self, _elapsed: Duration) -> SimResult<()> {
        let lines = describe_realistic(&lock(&self.state));
        for line in lines {
            tracing::info!("{line}");
        }
        Ok(())
    }

    fn interval(&self) -> Interval {
        Interval::Every(self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickworld_kernel::{SimObject, World};
    use tickworld_spatial::{Location, Vector};

    #[test]
    fn only_realistic_objects_are_described() {
        let mut world = World::new("earth");
        world
            .add_object(
                SimObject::realistic(Location::new(world.id(), 1.0, 2.0, 3.0))
                    .with_vector(Vector::new(0.0, -3.0, 4.0)),
            )
            .unwrap();
        world
            .add_object(SimObject::immovable(Location::origin(world.id())))
            .unwrap();
        let mut state = State::new();
        state.add_world(world).unwrap();

        let lines = describe_realistic(&state);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("earth ["));
        assert!(lines[0].contains("(1.00, 2.00, 3.00)"));
        assert!(lines[0].contains("5.00 m/s"));
    }

    #[test]
    fn runs_once_a_second_by_default() {
        let task = DebugTask::new(State::new().shared());
        assert_eq!(task.interval(), Interval::Every(Duration::from_secs(1)));
        let task = task.with_period(Duration::from_millis(250));
        assert_eq!(task.interval(), Interval::Every(Duration::from_millis(250)));
    }
}
