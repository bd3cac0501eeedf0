//! Runtime settings for the orrery.
//!
//! Settings persist as `config.ron` in the platform config directory and can
//! be overridden from the command line. Unknown or missing fields fall back to
//! defaults so older files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, ProjectionConfig, RenderConfig,
    SimulationConfig, WindowConfig,
};
pub use error::ConfigError;
