use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::CardConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl CardConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/cardflow/config.toml` on Unix/macOS, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("cardflow").join("config.toml")
    }

    /// Loads configuration from the default config file, or defaults when
    /// the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(CardConfig::default());
        }
        Self::load_from(&path)
    }

    /// Loads and validates the given config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: CardConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded card config");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `backdrop_alpha` lies in `[0, 1]`
    /// - `corner_radius` is finite and not negative
    /// - sheet percentages lie in `1..=100`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.backdrop_alpha) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "backdrop_alpha must be between 0 and 1, got {}",
                    self.backdrop_alpha
                ),
            });
        }

        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "corner_radius must be a non-negative number, got {}",
                    self.corner_radius
                ),
            });
        }

        for (name, value) in [
            ("sheet_width_percent", self.sheet_width_percent),
            ("sheet_height_percent", self.sheet_height_percent),
        ] {
            if !(1..=100).contains(&value) {
                return Err(ConfigError::ValidationError {
                    message: format!("{name} must be between 1 and 100, got {value}"),
                });
            }
        }

        Ok(())
    }
}
