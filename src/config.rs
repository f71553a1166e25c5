//! Building a [`DeviceConfig`] from the environment or a JSON file.
//!
//! Environment keys (a `.env` file is honoured by the binary):
//! `SHUNT_RESISTORS` four comma separated micro-ohm values,
//! `ANTI_PARALLEL_DIODE` bool, `SENSE_RANGE` one of `10mv|20mv|40mv|80mv`.

use std::env;
use std::path::Path;

use crate::data_models::{DeviceConfig, SHUNT_CHANNELS};
use crate::error::ConfigError;
use crate::sense::SenseRange;

pub const SHUNT_RESISTORS_KEY: &str = "SHUNT_RESISTORS";
pub const ANTI_PARALLEL_DIODE_KEY: &str = "ANTI_PARALLEL_DIODE";
pub const SENSE_RANGE_KEY: &str = "SENSE_RANGE";

impl DeviceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; absent keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DeviceConfig::default();

        if let Some(value) = lookup(SHUNT_RESISTORS_KEY) {
            config.shunt_resistance_uohm = parse_shunts(&value)?;
        }
        if let Some(value) = lookup(ANTI_PARALLEL_DIODE_KEY) {
            config.anti_parallel_diode_mode = parse_bool(ANTI_PARALLEL_DIODE_KEY, &value)?;
        }
        if let Some(value) = lookup(SENSE_RANGE_KEY) {
            config.sense_range =
                SenseRange::from_name(&value).ok_or_else(|| ConfigError::InvalidValue {
                    key: SENSE_RANGE_KEY.to_string(),
                    reason: format!("'{}' is not one of 10mv, 20mv, 40mv, 80mv", value),
                })?;
        }

        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn parse_shunts(value: &str) -> Result<[u32; SHUNT_CHANNELS], ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: SHUNT_RESISTORS_KEY.to_string(),
        reason,
    };

    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != SHUNT_CHANNELS {
        return Err(invalid(format!(
            "expected {} values, got {}",
            SHUNT_CHANNELS,
            parts.len()
        )));
    }

    let mut shunts = [0u32; SHUNT_CHANNELS];
    for (slot, part) in shunts.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|e| invalid(format!("'{}': {}", part, e)))?;
    }
    Ok(shunts)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("'{}' is not a boolean", other),
        }),
    }
}
