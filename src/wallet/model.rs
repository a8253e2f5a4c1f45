use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from wallet balance operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: f64, required: f64 },
}

/// One account: its balance and the transactions it sent that were confirmed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wallet {
    seed: String,
    #[serde(default)]
    balance: f64,
    #[serde(default)]
    transaction_history: Vec<Transaction>,
}

impl Wallet {
    /// Create an empty wallet
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            balance: 0.0,
            transaction_history: Vec::new(),
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn transaction_history(&self) -> &[Transaction] {
        &self.transaction_history
    }

    /// Credit the wallet; the amount must be finite and non-negative
    pub fn increase_balance(&mut self, amount: f64) -> Result<(), WalletError> {
        check_amount(amount)?;
        self.balance += amount;
        Ok(())
    }

    /// Debit the wallet; refuses rather than going negative
    pub fn decrease_balance(&mut self, amount: f64) -> Result<(), WalletError> {
        check_amount(amount)?;
        if amount > self.balance {
            return Err(WalletError::InsufficientBalance {
                available: self.balance,
                required: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn add_transaction_to_history(&mut self, transaction: Transaction) {
        self.transaction_history.push(transaction);
    }
}

fn check_amount(amount: f64) -> Result<(), WalletError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(WalletError::InvalidAmount(amount));
    }
    Ok(())
}
