/// Player configuration
use crate::error::{PlayerError, Result};
use podcastr_audio::DriverConfig;
use podcastr_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "podcastr.toml";

/// Environment variable prefix (`PODCASTR_PLAYBACK__SHUFFLE=true`)
pub const ENV_PREFIX: &str = "PODCASTR";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub driver: DriverConfig,

    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Virtual clock of the simulated device
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Wall-clock interval between device advances
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Episode seconds played per wall-clock second
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl SimulationSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Episode time covered by one tick
    pub fn step(&self) -> Duration {
        self.tick().mul_f64(self.speed)
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            speed: default_speed(),
        }
    }
}

fn default_tick_ms() -> u64 {
    100
}

fn default_speed() -> f64 {
    60.0
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `podcastr.toml` in the
    /// working directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_sources(path, ENV_PREFIX)
    }

    pub(crate) fn from_sources(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(PlayerError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (PODCASTR_SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.simulation.tick_ms == 0 {
            return Err(PlayerError::Config(
                "simulation.tick_ms must be greater than zero".to_string(),
            ));
        }

        if !self.simulation.speed.is_finite() || self.simulation.speed <= 0.0 {
            return Err(PlayerError::Config(format!(
                "simulation.speed must be positive, got {}",
                self.simulation.speed
            )));
        }

        if self.driver.subscriber_capacity == 0 {
            return Err(PlayerError::Config(
                "driver.subscriber_capacity must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
