//! Application configuration
//!
//! Re-exports the shared config types and adds persistence. Loading never
//! fails outright: a broken overlay section falls back to that overlay's
//! defaults while the other overlay keeps its settings.

use std::path::{Path, PathBuf};

pub use auragrid_types::{AppConfig, OverlayConfig, OverlayKind};

use super::ConfigError;

pub const APP_NAME: &str = "auragrid";
pub const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a config document, recovering per overlay section.
///
/// Fields missing from a section take that overlay kind's defaults, and a
/// section that does not deserialize is replaced by them. Only a document
/// that is not TOML at all is an error.
pub fn parse_config(text: &str) -> Result<AppConfig, ConfigError> {
    let table: toml::Table =
        toml::from_str(text).map_err(|source| ConfigError::ParseToml { source })?;

    let mut config = AppConfig::default();
    match table.get("preview_mode") {
        Some(toml::Value::Boolean(preview_mode)) => config.preview_mode = *preview_mode,
        Some(other) => {
            tracing::warn!(value = %other, "preview_mode is not a boolean, ignoring");
        }
        None => {}
    }

    for kind in [OverlayKind::Player, OverlayKind::Target] {
        let Some(section) = table.get(kind.config_key()) else {
            continue;
        };
        match parse_overlay(kind, section.clone()) {
            Ok(overlay) => *config.overlay_mut(kind) = overlay,
            Err(err) => {
                tracing::warn!(
                    overlay = kind.config_key(),
                    error = %err,
                    "Malformed overlay config, using defaults"
                );
            }
        }
    }

    Ok(config)
}

/// Deserialize one overlay section laid over the kind's defaults
fn parse_overlay(
    kind: OverlayKind,
    section: toml::Value,
) -> Result<OverlayConfig, toml::de::Error> {
    let defaults = OverlayConfig::default_for(kind);
    let mut merged = match toml::Value::try_from(&defaults) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to encode overlay defaults");
            return section.try_into();
        }
    };
    merge_over(&mut merged, section);
    merged.try_into()
}

/// Recursively overwrite `base` with the keys present in `overlay`
fn merge_over(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_over(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    /// Load from the default location, falling back to defaults
    fn load() -> Self;
    fn load_from(path: &Path) -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    fn save_to(&self, path: &Path) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        let loaded = Self::config_path().and_then(|path| {
            if path.exists() {
                Self::load_from(&path)
            } else {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(AppConfig::default())
            }
        });
        loaded.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Using default config");
            AppConfig::default()
        })
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        parse_config(&text)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self.clone())
            .map_err(|source| ConfigError::Store { source })
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self.clone()).map_err(|source| ConfigError::Store { source })
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
            .map_err(|source| ConfigError::ConfigPath { source })
    }
}
