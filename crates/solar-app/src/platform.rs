//! OS-specific directories for configuration and logs.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

const APP_NAME: &str = "solar-system";

/// Where the orrery keeps its files, following OS conventions (XDG on Linux,
/// Known Folders on Windows, Library on macOS).
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
    /// Holds the JSON log of debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the directories without creating them.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_config = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);

        let data_dir = dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| app_config.join("data"));
        let cache_dir = dirs::cache_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| app_config.join("cache"));

        Ok(Self {
            config_dir: app_config.clone(),
            data_dir,
            cache_dir,
            log_dir: app_config.join("logs"),
        })
    }

    /// Everything under `root`, as selected by `--config`.
    pub fn with_config_dir(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            data_dir: root.join("data"),
            cache_dir: root.join("cache"),
            log_dir: root.join("logs"),
        }
    }

    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        for dir in [&self.config_dir, &self.data_dir, &self.cache_dir, &self.log_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_absolute() {
        let Ok(dirs) = PlatformDirs::resolve() else {
            return;
        };
        assert!(dirs.config_dir.is_absolute());
        assert!(dirs.log_dir.starts_with(&dirs.config_dir));
        assert!(dirs.config_dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_override_roots_every_dir() {
        let root = Path::new("/tmp/orrery");
        let dirs = PlatformDirs::with_config_dir(root);
        assert_eq!(dirs.config_dir, root);
        for dir in [&dirs.data_dir, &dirs.cache_dir, &dirs.log_dir] {
            assert!(dir.starts_with(root));
        }
    }

    #[test]
    fn test_create_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_config_dir(&tmp.path().join(APP_NAME));
        dirs.create_dirs().unwrap();

        assert!(dirs.config_dir.is_dir());
        assert!(dirs.data_dir.is_dir());
        assert!(dirs.cache_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_create_dirs_reports_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let dirs = PlatformDirs::with_config_dir(&blocker);
        assert!(matches!(dirs.create_dirs(), Err(PlatformError::Io(_))));
    }
}
