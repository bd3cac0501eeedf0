//! Configuration structs with defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub simulation: SimulationConfig,
    pub render: RenderConfig,
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    pub title: String,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Initial top-left position in logical pixels.
    pub position: (i32, i32),
}

/// Keyboard camera settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// World units moved per key press.
    pub step: f64,
    /// The reset pose sits this far behind (-Y) and above (+Z) the origin.
    pub rest_distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_y_degrees: f64,
    pub near: f64,
    pub far: f64,
    /// Follow the window's aspect ratio instead of a fixed 1:1.
    pub aspect_from_window: bool,
}

/// Simulation pacing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated days per update tick.
    pub days_per_tick: f64,
    /// Fixed update rate in Hz. 0 updates once per idle callback.
    pub tick_rate_hz: u32,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Line segments per orbit ring.
    pub orbit_segments: u32,
    /// Sphere subdivisions around the polar axis.
    pub sphere_slices: u32,
    /// Sphere subdivisions along the polar axis.
    pub sphere_stacks: u32,
    pub clear_color: [f32; 4],
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 700,
            title: "Solar System".to_string(),
            vsync: true,
            position: (50, 50),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            step: 20.0,
            rest_distance: 700.0,
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 1.0,
            far: 40_000_000.0,
            aspect_from_window: false,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days_per_tick: 1.0,
            tick_rate_hz: 0,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            orbit_segments: 1440,
            sphere_slices: 40,
            sphere_stacks: 32,
            clear_color: [0.7, 0.7, 0.7, 0.1],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default settings to {}", path.display());
            return Ok(config);
        }

        let config = Self::read(&path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Write `config.ron` into `config_dir`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        let write_error = |source| ConfigError::WriteError {
            path: path.clone(),
            source,
        };

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::create_dir_all(config_dir).map_err(write_error)?;
        std::fs::write(&path, text).map_err(write_error)
    }

    /// Re-read the file. `Some` only when its contents differ from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Settings changed on disk");
        Ok(Some(fresh))
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}
