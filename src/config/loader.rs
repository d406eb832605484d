//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tracker
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use chrono::Weekday;

use crate::error::{TrackerError, TrackerResult};
use crate::models::NegativeBillable;

use super::types::TrackerConfig;

/// Loads and provides access to tracker settings.
///
/// # File Format
///
/// ```text
/// week_starts_on: monday        # first day of a calendar week
/// negative_billable: clamp      # clamp | allow
/// bind_address: "127.0.0.1:3000"
/// ```
///
/// # Example
///
/// ```no_run
/// use pay_tracker::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/settings.yaml")?;
/// println!("Weeks start on {}", loader.week_starts_on());
/// # Ok::<(), pay_tracker::error::TrackerError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: TrackerConfig,
}

impl ConfigLoader {
    /// Loads settings from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file does not exist or cannot be read
    /// - The file contains invalid YAML or unknown values
    pub fn load<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TrackerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: TrackerConfig =
            serde_yaml::from_str(&content).map_err(|e| TrackerError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(Self { config })
    }

    /// Loads settings from `path` when given, otherwise uses the defaults.
    pub fn load_or_default(path: Option<&Path>) -> TrackerResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: TrackerConfig) -> Self {
        Self { config }
    }

    /// Returns the underlying settings.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Returns the first day of each calendar week.
    pub fn week_starts_on(&self) -> Weekday {
        self.config.week_starts_on
    }

    /// Returns the negative billable time policy.
    pub fn negative_billable(&self) -> NegativeBillable {
        self.config.negative_billable
    }

    /// Returns the HTTP bind address.
    pub fn bind_address(&self) -> &str {
        &self.config.bind_address
    }
}
