//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "solar", about = "Animated solar system orrery")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Window title.
    #[arg(long)]
    pub title: Option<String>,

    /// Simulated days per update tick.
    #[arg(long)]
    pub days_per_tick: Option<f64>,

    /// Fixed update rate in Hz (0 = once per idle callback).
    #[arg(long)]
    pub tick_rate: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref title) = args.title {
            self.window.title = title.clone();
        }
        if let Some(days) = args.days_per_tick {
            self.simulation.days_per_tick = days;
        }
        if let Some(rate) = args.tick_rate {
            self.simulation.tick_rate_hz = rate;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1024),
            days_per_tick: Some(0.5),
            tick_rate: Some(60),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.simulation.days_per_tick, 0.5);
        assert_eq!(config.simulation.tick_rate_hz, 60);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 700);
        assert_eq!(config.window.title, "Solar System");
    }

    #[test]
    fn test_cli_no_override() {
        let defaults = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, defaults);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "solar",
            "--title",
            "Orrery",
            "--log-level",
            "debug",
            "--config",
            "/tmp/solar",
        ]);
        assert_eq!(args.title.as_deref(), Some("Orrery"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/solar")));
        assert!(args.width.is_none());
    }
}
