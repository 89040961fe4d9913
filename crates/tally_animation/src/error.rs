//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading counter configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    /// Config parsed but holds out-of-range values
    #[error("invalid counter configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
