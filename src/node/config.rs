use crate::transaction::is_valid_address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Address of the wallet holding the initial supply
pub const GENESIS_ADDRESS: &str =
    "9a27ad25d050b690b05d38e1cf20c71e8c5314cff5a936efc024a2b5e9b07f04";

/// Tokens minted into the genesis wallet
pub const GENESIS_SUPPLY: f64 = 1_000_000_000.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid genesis address: {0}")]
    InvalidGenesisAddress(String),

    #[error("Invalid genesis supply: {0}")]
    InvalidGenesisSupply(f64),
}

/// Ledger node configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Address of the genesis wallet
    pub genesis_address: String,
    /// Initial supply held by the genesis wallet
    pub genesis_supply: f64,
    /// Pre-load the demonstration pending transactions
    pub seed_demo_transactions: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            genesis_address: GENESIS_ADDRESS.to_string(),
            genesis_supply: GENESIS_SUPPLY,
            seed_demo_transactions: false,
        }
    }
}

impl NodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genesis_address(mut self, address: impl Into<String>) -> Self {
        self.genesis_address = address.into();
        self
    }

    pub fn with_genesis_supply(mut self, supply: f64) -> Self {
        self.genesis_supply = supply;
        self
    }

    pub fn with_demo_transactions(mut self, enabled: bool) -> Self {
        self.seed_demo_transactions = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_address(&self.genesis_address) {
            return Err(ConfigError::InvalidGenesisAddress(
                self.genesis_address.clone(),
            ));
        }
        if !self.genesis_supply.is_finite() || self.genesis_supply < 0.0 {
            return Err(ConfigError::InvalidGenesisSupply(self.genesis_supply));
        }
        Ok(())
    }
}
