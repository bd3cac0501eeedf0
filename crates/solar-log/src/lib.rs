//! Structured logging for the orrery.
//!
//! Console output with uptime timestamps, plus a JSON log file in debug
//! builds. The level comes from `RUST_LOG` when set, otherwise from
//! `debug.log_level` in the config.

use std::fs::File;
use std::path::Path;

use solar_config::Config;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Targets that are too chatty at `info`.
const QUIET_TARGETS: &str = "wgpu=warn,naga=warn";

pub const LOG_FILE_NAME: &str = "solar.log";

/// Install the global subscriber.
///
/// `log_dir` only matters when `debug_build` is set; the JSON file is skipped
/// silently if the directory cannot be created.
///
/// ```no_run
/// use solar_config::Config;
/// use solar_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let directives = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = File::create(log_dir.join(LOG_FILE_NAME))
    {
        subscriber.with(json_file_layer(log_file)).init();
        return;
    }

    subscriber.init();
}

/// Filter string used when `RUST_LOG` is unset.
pub fn filter_directives(config: Option<&Config>) -> String {
    match config.map(|c| c.debug.log_level.trim()) {
        Some(level) if !level.is_empty() => format!("{level},{QUIET_TARGETS}"),
        _ => format!("info,{QUIET_TARGETS}"),
    }
}

/// `info` everywhere, `warn` for the GPU stack.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(filter_directives(None))
}

/// One JSON object per line, no ANSI codes.
fn json_file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter_str = default_env_filter().to_string();
        assert!(filter_str.contains("info"));
        assert!(filter_str.contains("wgpu=warn"));
        assert!(filter_str.contains("naga=warn"));
    }

    #[test]
    fn test_config_level_keeps_gpu_quiet() {
        let mut config = Config::default();
        config.debug.log_level = "debug".to_string();
        assert_eq!(filter_directives(Some(&config)), "debug,wgpu=warn,naga=warn");
    }

    #[test]
    fn test_empty_config_level_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directives(Some(&config)), "info,wgpu=warn,naga=warn");
        assert_eq!(filter_directives(None), "info,wgpu=warn,naga=warn");
    }

    #[test]
    fn test_subsystem_filters_parse() {
        for directives in ["info", "debug,solar_system=trace", "warn,solar_render=debug"] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    fn test_json_file_layer_writes_structured_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let file = File::create(&path).unwrap();

        let subscriber = tracing_subscriber::registry().with(json_file_layer(file));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(body = "Earth", "orbit advanced");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().expect("one log line");
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["fields"]["message"], "orbit advanced");
        assert_eq!(value["fields"]["body"], "Earth");
    }
}
