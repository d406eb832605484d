//! Configuration types for the pay tracker.
//!
//! This module contains the strongly-typed settings deserialized from the
//! YAML settings file.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::NegativeBillable;

/// Default address the HTTP API binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Settings loaded from `settings.yaml`.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// First day of each calendar week.
    pub week_starts_on: Weekday,
    /// Treatment of breaks that exceed the shift.
    pub negative_billable: NegativeBillable,
    /// Socket address for the HTTP API.
    pub bind_address: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            week_starts_on: Weekday::Mon,
            negative_billable: NegativeBillable::Clamp,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}
