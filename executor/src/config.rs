//! Executor configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// One whole unit of the fee asset, in its smallest denomination.
pub const UNIT: u64 = 1_000_000_000;

const DAY: u64 = 24 * 60 * 60;

/// Fees, staking bounds and the supply cap.
///
/// Can be loaded from a TOML file via [`Config::from_toml_file`] or built
/// programmatically (e.g. for tests). Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Fee burned by ordinary transactions.
    #[serde(default = "default_tx_fee")]
    pub tx_fee: u64,

    /// Fee burned when adding a primary network validator.
    #[serde(default = "default_add_validator_fee")]
    pub add_primary_network_validator_fee: u64,

    #[serde(default = "default_min_validator_stake")]
    pub min_validator_stake: u64,

    #[serde(default = "default_max_validator_stake")]
    pub max_validator_stake: u64,

    /// Seconds.
    #[serde(default = "default_min_stake_duration")]
    pub min_stake_duration: u64,

    /// Seconds.
    #[serde(default = "default_max_stake_duration")]
    pub max_stake_duration: u64,

    /// Upper bound on current supply, deposit rewards included.
    #[serde(default = "default_supply_cap")]
    pub supply_cap: u64,

    /// How far past chain time a validator may be scheduled to start, in seconds.
    #[serde(default = "default_max_future_start_time")]
    pub max_future_start_time: u64,
}

fn default_tx_fee() -> u64 {
    UNIT / 1_000
}

fn default_add_validator_fee() -> u64 {
    0
}

fn default_min_validator_stake() -> u64 {
    2_000 * UNIT
}

fn default_max_validator_stake() -> u64 {
    3_000_000 * UNIT
}

fn default_min_stake_duration() -> u64 {
    14 * DAY
}

fn default_max_stake_duration() -> u64 {
    365 * DAY
}

fn default_supply_cap() -> u64 {
    1_000_000_000 * UNIT
}

fn default_max_future_start_time() -> u64 {
    14 * DAY
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject bounds that no transaction could satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_validator_stake > self.max_validator_stake {
            return Err(ConfigError::Invalid(format!(
                "min_validator_stake {} exceeds max_validator_stake {}",
                self.min_validator_stake, self.max_validator_stake
            )));
        }
        if self.min_stake_duration > self.max_stake_duration {
            return Err(ConfigError::Invalid(format!(
                "min_stake_duration {} exceeds max_stake_duration {}",
                self.min_stake_duration, self.max_stake_duration
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tx_fee: default_tx_fee(),
            add_primary_network_validator_fee: default_add_validator_fee(),
            min_validator_stake: default_min_validator_stake(),
            max_validator_stake: default_max_validator_stake(),
            min_stake_duration: default_min_stake_duration(),
            max_stake_duration: default_max_stake_duration(),
            supply_cap: default_supply_cap(),
            max_future_start_time: default_max_future_start_time(),
        }
    }
}
