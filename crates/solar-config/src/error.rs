//! Configuration error types.

use std::path::PathBuf;

/// Failure to load or store `config.ron`. File errors name the file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid RON for [`Config`](crate::Config).
    #[error("invalid settings in {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("cannot encode settings: {0}")]
    SerializeError(#[source] ron::Error),
}
