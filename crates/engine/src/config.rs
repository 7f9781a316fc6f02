use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tickworld_common::SimError;
use tickworld_kernel::world::{DEFAULT_AIR_DENSITY, DEFAULT_GRAVITY, DEFAULT_GROUND_LEVEL};
use tickworld_kernel::World;
use tickworld_physics::DEFAULT_RESTITUTION;

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] SimError),
    #[error("poll interval must be at least 1 ms")]
    ZeroPollInterval,
}

/// Physics constants new worlds start with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldDefaults {
    pub gravity: f64,
    pub air_density: f64,
    pub ground_level: f64,
}

impl Default for WorldDefaults {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            air_density: DEFAULT_AIR_DENSITY,
            ground_level: DEFAULT_GROUND_LEVEL,
        }
    }
}

/// Engine settings. Every field has a default, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sleep between scheduler sweeps, in milliseconds.
    pub poll_interval_ms: u64,
    /// Fraction of the approach speed returned by a collision, in `[0, 1]`.
    pub restitution: f64,
    /// Period of the position log, in milliseconds. `None` disables it.
    pub debug_period_ms: Option<u64>,
    pub world: WorldDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 15,
            restitution: DEFAULT_RESTITUTION,
            debug_period_ms: Some(1000),
            world: WorldDefaults::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        SimError::check_range("restitution", self.restitution, 0.0, 1.0)?;
        SimError::check_positive("air density", self.world.air_density)?;
        if !self.world.gravity.is_finite() {
            return Err(SimError::NotANumber { quantity: "gravity" }.into());
        }
        if !self.world.ground_level.is_finite() {
            return Err(SimError::NotANumber {
                quantity: "ground level",
            }
            .into());
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn debug_period(&self) -> Option<Duration> {
        self.debug_period_ms.map(Duration::from_millis)
    }

    /// An empty world carrying the configured constants.
    pub fn new_world(&self, name: impl Into<String>) -> Result<World, ConfigError> {
        Ok(World::with_constants(
            name,
            self.world.gravity,
            self.world.air_density,
            self.world.ground_level,
        )?)
    }
}
