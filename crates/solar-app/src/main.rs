//! The `solar` binary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags, e.g. `solar --width 1024 --height 1024 --days-per-tick 0.5`.

use clap::Parser;
use solar_app::{PlatformDirs, build_system, run_with_config};
use solar_config::{CliArgs, Config};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(root) => PlatformDirs::with_config_dir(root),
        None => PlatformDirs::resolve().unwrap_or_else(|e| {
            eprintln!("Failed to resolve platform directories: {e}");
            std::process::exit(1);
        }),
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
        std::process::exit(1);
    }

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    solar_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config directory: {}", dirs.config_dir.display());

    let system = build_system(&config);
    if let Err(e) = run_with_config(config, system) {
        error!("Event loop failed: {e}");
        std::process::exit(1);
    }
}
