use std::sync::Arc;
use std::time::Duration;
use tickworld_common::{Priority, SimError, SimResult, WorldId};
use tickworld_events::EventBus;
use tickworld_kernel::{lock, SharedState, State, World};
use tickworld_physics::{
    CollisionResponseListener, CollisionTask, DebugTask, EnergyLogListener, GravityTask,
    MovementTask, ResistanceTask,
};
use tickworld_render::{DebugTextRenderer, RenderTickable, RenderView};
use tickworld_scheduler::{
    Clock, ManualClock, Scheduler, SchedulerHandle, SchedulerThread, SpawnError, SystemClock,
    TickTask, Tickable, Ticker,
};

use crate::config::{ConfigError, EngineConfig};

/// Errors from driving an [`Engine`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine is already running")]
    AlreadyRunning,
    #[error("engine is not running")]
    NotRunning,
    #[error("only a headless engine can be stepped")]
    NotHeadless,
    #[error("failed to spawn scheduler thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("scheduler thread panicked")]
    SchedulerPanicked,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Advances every world's tick counter. Runs first among the tickables.
pub struct StateTickable {
    state: SharedState,
}

impl StateTickable {
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }
}

impl Tickable for StateTickable {
    fn name(&self) -> &str {
        "state"
    }

    fn priority(&self) -> Priority {
        Priority::Early
    }

    fn tick(&self, _elapsed: Duration) -> SimResult<()> {
        lock(&self.state).tick();
        Ok(())
    }
}

/// The simulation engine.
///
/// Built either on the wall clock ([`Engine::new`], then [`Engine::start`])
/// or on a manual clock ([`Engine::headless`], then [`Engine::step`]).
pub struct Engine {
    config: EngineConfig,
    state: SharedState,
    bus: Arc<EventBus>,
    ticker: Arc<Ticker>,
    render: Arc<RenderTickable<DebugTextRenderer>>,
    handle: SchedulerHandle,
    scheduler: Option<Scheduler>,
    thread: Option<SchedulerThread>,
    manual_clock: Option<Arc<ManualClock>>,
    pipeline_registered: bool,
}

impl Engine {
    /// Engine on the wall clock, driven by a background thread.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::build(config, Arc::new(SystemClock::new()), None)
    }

    /// Engine on a manual clock, advanced only by [`Engine::step`].
    pub fn headless(config: EngineConfig) -> Result<Self, EngineError> {
        let clock = Arc::new(ManualClock::new());
        Self::build(config, clock.clone(), Some(clock))
    }

    fn build(
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        manual_clock: Option<Arc<ManualClock>>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let state = State::new().shared();
        let scheduler = Scheduler::new(clock);
        let render = Arc::new(RenderTickable::new(
            state.clone(),
            DebugTextRenderer::new(),
            RenderView::default(),
        ));
        Ok(Self {
            config,
            state,
            bus: Arc::new(EventBus::new()),
            ticker: Arc::new(Ticker::new()),
            render,
            handle: scheduler.handle(),
            scheduler: Some(scheduler),
            thread: None,
            manual_clock,
            pipeline_registered: false,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    pub fn bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.bus)
    }

    pub fn ticker(&self) -> Arc<Ticker> {
        Arc::clone(&self.ticker)
    }

    /// Handle for registering extra tasks or stopping the loop from a task.
    pub fn scheduler(&self) -> SchedulerHandle {
        self.handle.clone()
    }

    pub fn is_headless(&self) -> bool {
        self.manual_clock.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    /// The frame rendered at the end of the latest tick.
    pub fn last_frame(&self) -> String {
        self.render.last_frame()
    }

    pub fn add_world(&self, world: World) -> SimResult<WorldId> {
        let id = world.id();
        lock(&self.state).add_world(world)?;
        Ok(id)
    }

    /// Create and register an empty world with the configured constants.
    pub fn create_world(&self, name: impl Into<String>) -> Result<WorldId, EngineError> {
        let world = self.config.new_world(name)?;
        Ok(self.add_world(world)?)
    }

    /// Register the physics pipeline, listeners and tickables. Idempotent.
    fn register_pipeline(&mut self) -> Result<(), EngineError> {
        if self.pipeline_registered {
            return Ok(());
        }
        let _span = tracing::info_span!("register_pipeline").entered();

        self.bus.register(Arc::new(EnergyLogListener));
        self.bus
            .register(Arc::new(CollisionResponseListener::new(self.config.restitution)?));

        self.ticker.register(Arc::new(StateTickable::new(self.state.clone())));
        self.ticker.register(self.render.clone());

        let state = &self.state;
        self.handle.register(Box::new(GravityTask::new(state.clone())));
        self.handle.register(Box::new(ResistanceTask::new(state.clone())));
        self.handle.register(Box::new(MovementTask::new(state.clone())));
        self.handle
            .register(Box::new(CollisionTask::new(state.clone(), self.bus.clone())));
        self.handle.register(Box::new(TickTask::new(self.ticker.clone())));
        if let Some(period) = self.config.debug_period() {
            self.handle
                .register(Box::new(DebugTask::new(state.clone()).with_period(period)));
        }

        tracing::info!(
            listeners = self.bus.listener_count(),
            tickables = self.ticker.len(),
            "pipeline registered"
        );
        self.pipeline_registered = true;
        Ok(())
    }

    /// Register the pipeline and start polling on a background thread.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.launch(Scheduler::spawn)
    }

    fn launch<F>(&mut self, spawn: F) -> Result<(), EngineError>
    where
        F: FnOnce(Scheduler, Duration) -> Result<SchedulerThread, SpawnError>,
    {
        let Some(scheduler) = self.scheduler.take() else {
            return Err(EngineError::AlreadyRunning);
        };
        if let Err(err) = self.register_pipeline() {
            self.scheduler = Some(scheduler);
            return Err(err);
        }
        let thread = match spawn(scheduler, self.config.poll_interval()) {
            Ok(thread) => thread,
            Err(err) => return Err(self.recover(err)),
        };
        self.thread = Some(thread);
        tracing::info!(poll_interval_ms = self.config.poll_interval_ms, "engine started");
        Ok(())
    }

    /// Take the scheduler back after a failed spawn so the engine can be
    /// started again.
    fn recover(&mut self, err: SpawnError) -> EngineError {
        let (scheduler, source) = err.into_parts();
        self.scheduler = Some(scheduler);
        EngineError::Spawn(source)
    }

    /// Stop the background loop and wait for it to finish its sweep.
    pub fn stop(&mut self) -> Result<(), EngineError> {
        let Some(thread) = self.thread.take() else {
            return Err(EngineError::NotRunning);
        };
        self.handle.stop();
        let scheduler = thread.join().ok_or(EngineError::SchedulerPanicked)?;
        self.scheduler = Some(scheduler);
        tracing::info!("engine stopped");
        Ok(())
    }

    /// Advance a headless engine's clock by `elapsed` and run one sweep of
    /// the pipeline.
    pub fn step(&mut self, elapsed: Duration) -> Result<(), EngineError> {
        let Some(clock) = self.manual_clock.clone() else {
            return Err(EngineError::NotHeadless);
        };
        self.register_pipeline()?;
        let Some(scheduler) = self.scheduler.as_mut() else {
            return Err(EngineError::AlreadyRunning);
        };
        clock.advance(elapsed);
        scheduler.poll();
        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.thread.is_some() {
            let _ = self.stop();
        }
    }
}
