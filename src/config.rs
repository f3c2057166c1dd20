// 7.0 config.rs: pool settings in one place. name and the asset registry.
// 7.1 loaded from JSON or built in code; validate() runs before a pool starts.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::math::pow10;
use crate::types::{AssetId, BASE_DECIMALS};

// Largest denominator exponent; values must stay representable as Decimal
pub const MAX_DECIMALS: u8 = 28;

// One entry of the asset registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub id: AssetId,
    // Ticker shown in reports (e.g. "WETH")
    pub symbol: String,
    // Disabled assets take no new deposits but can still be withdrawn and valued
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_decimals() -> u8 {
    BASE_DECIMALS
}

impl AssetConfig {
    pub fn new(id: AssetId, symbol: &str) -> Self {
        Self {
            id,
            symbol: symbol.to_string(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

// The complete pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    // Human readable pool name
    pub name: String,
    // Prices are quoted per 10^decimals base units of an asset
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    // Assets the pool accepts as collateral
    pub assets: Vec<AssetConfig>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: "Collateral Pool".to_string(),
            decimals: BASE_DECIMALS,
            assets: vec![
                AssetConfig::new(AssetId(1), "WETH"),
                AssetConfig::new(AssetId(2), "WBTC"),
                AssetConfig::new(AssetId(3), "USDC"),
            ],
        }
    }
}

impl PoolConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&contents)
    }

    // Validate the registry for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidPool {
                reason: "Pool name must not be empty".to_string(),
            });
        }

        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidDecimals {
                reason: format!("{} exceeds the maximum of {}", self.decimals, MAX_DECIMALS),
            });
        }

        let mut ids = HashSet::new();
        let mut symbols = HashSet::new();
        for asset in &self.assets {
            if asset.symbol.trim().is_empty() {
                return Err(ConfigError::InvalidAsset {
                    asset: asset.id,
                    reason: "Symbol must not be empty".to_string(),
                });
            }
            if !ids.insert(asset.id) {
                return Err(ConfigError::DuplicateAsset {
                    key: asset.id.to_string(),
                });
            }
            if !symbols.insert(asset.symbol.to_ascii_uppercase()) {
                return Err(ConfigError::DuplicateAsset {
                    key: asset.symbol.clone(),
                });
            }
        }

        Ok(())
    }

    // Base units of one whole asset unit. None only for unvalidated configs
    pub fn price_denominator(&self) -> Option<U256> {
        if self.decimals > MAX_DECIMALS {
            return None;
        }
        pow10(self.decimals)
    }

    pub fn asset(&self, id: AssetId) -> Option<&AssetConfig> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn asset_by_symbol(&self, symbol: &str) -> Option<&AssetConfig> {
        self.assets.iter().find(|a| a.symbol.eq_ignore_ascii_case(symbol))
    }

    // Listed and enabled: accepts deposits
    pub fn is_supported(&self, id: AssetId) -> bool {
        self.asset(id).is_some_and(|a| a.enabled)
    }

    pub fn symbol(&self, id: AssetId) -> Option<&str> {
        self.asset(id).map(|a| a.symbol.as_str())
    }
}

// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid pool: {reason}")]
    InvalidPool { reason: String },

    #[error("Invalid decimals: {reason}")]
    InvalidDecimals { reason: String },

    #[error("Invalid asset {asset}: {reason}")]
    InvalidAsset { asset: AssetId, reason: String },

    #[error("Asset {key} is listed more than once")]
    DuplicateAsset { key: String },

    #[error("Cannot read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Cannot parse config: {reason}")]
    Parse { reason: String },
}
