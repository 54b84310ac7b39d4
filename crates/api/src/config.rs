// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger configuration.

use serde::{Deserialize, Serialize};
use taxi_ledger_domain::{BusinessClock, DEFAULT_DAY_START_HOUR, DEFAULT_TIMEZONE};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting is out of range or unknown.
    #[error("Invalid ledger configuration: {0}")]
    Invalid(String),

    /// The configuration document could not be parsed.
    #[error("Could not parse ledger configuration: {0}")]
    Parse(String),
}

const fn default_day_start_hour() -> u8 {
    DEFAULT_DAY_START_HOUR
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

/// Settings of the fleet's business day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Local hour at which a new working day opens.
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u8,
    /// IANA timezone the fleet operates in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            day_start_hour: DEFAULT_DAY_START_HOUR,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the hour is not below 24 or the
    /// timezone is unknown.
    pub fn new(day_start_hour: u8, timezone: &str) -> Result<Self, ConfigError> {
        let config: Self = Self {
            day_start_hour,
            timezone: timezone.to_string(),
        };
        config.clock()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON and
    /// `ConfigError::Invalid` for out-of-range settings.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(document).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.clock()?;
        Ok(config)
    }

    /// Builds the business clock described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a setting is out of range.
    pub fn clock(&self) -> Result<BusinessClock, ConfigError> {
        BusinessClock::new(&self.timezone, self.day_start_hour)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
