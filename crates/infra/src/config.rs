//! Recorder configuration loaded from the environment.

use kardex_inventory::Direction;
use thiserror::Error;

const FIXED_STOCK_TYPE: &str = "KARDEX_FIXED_STOCK_TYPE";
const DEFAULT_DIRECTION: &str = "KARDEX_DEFAULT_DIRECTION";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// How a recorder session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderConfig {
    /// When true the stock type comes from the movement being edited and
    /// cannot be changed in the session.
    pub fixed_stock_type: bool,
    /// Direction selected when a session opens.
    pub default_direction: Direction,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            fixed_stock_type: true,
            default_direction: Direction::Entry,
        }
    }
}

impl RecorderConfig {
    /// Read `KARDEX_FIXED_STOCK_TYPE` and `KARDEX_DEFAULT_DIRECTION`.
    ///
    /// Unset variables fall back to defaults; malformed ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RecorderConfig::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let fixed_stock_type = match lookup(FIXED_STOCK_TYPE) {
            Some(raw) => parse_bool(FIXED_STOCK_TYPE, &raw)?,
            None => {
                tracing::debug!(key = FIXED_STOCK_TYPE, "not set; using default");
                defaults.fixed_stock_type
            }
        };

        let default_direction = match lookup(DEFAULT_DIRECTION) {
            Some(raw) => raw.parse::<Direction>().map_err(|e| ConfigError::Invalid {
                key: DEFAULT_DIRECTION,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => {
                tracing::debug!(key = DEFAULT_DIRECTION, "not set; using default");
                defaults.default_direction
            }
        };

        Ok(Self {
            fixed_stock_type,
            default_direction,
        })
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected true/false".to_string(),
        }),
    }
}
