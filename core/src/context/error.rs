//! Error types for config persistence

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading or saving the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config is not valid TOML")]
    ParseToml {
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to store configuration")]
    Store {
        #[source]
        source: confy::ConfyError,
    },

    #[error("failed to resolve config file path")]
    ConfigPath {
        #[source]
        source: confy::ConfyError,
    },
}
