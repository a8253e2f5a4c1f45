use crate::transaction::{
    calculate_fee, is_valid_address, is_valid_fee, is_valid_id, verify_proof_of_work, Transaction,
    TransactionKind,
};
use crate::wallet::WalletStore;
use thiserror::Error;

/// Reasons a transaction is refused admission
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid transaction id: {0}")]
    InvalidId(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Invalid transaction type: {0}")]
    InvalidType(TransactionKind),

    #[error("Invalid fee: declared {declared}, expected {expected}")]
    InvalidFee { declared: f64, expected: f64 },

    #[error("Invalid proof-of-work")]
    InvalidPow,

    #[error("Insufficient balance: available {available}, required {required}")]
    InsufficientBalance { available: f64, required: f64 },
}

/// Stateless rule engine; balance checks read the wallet store
pub struct TransactionValidator<'a> {
    wallets: &'a WalletStore,
}

impl<'a> TransactionValidator<'a> {
    pub fn new(wallets: &'a WalletStore) -> Self {
        Self { wallets }
    }

    /// Validate a transaction for admission
    ///
    /// Checks, in order: id format, both addresses, token and fee amounts,
    /// kind, then the kind-specific rule (fee for fast, proof-of-work for standard) and
    /// the sender's funds.
    pub fn validate(&self, tx: &Transaction) -> Result<(), ValidationError> {
        if !is_valid_id(tx.id()) {
            return Err(ValidationError::InvalidId(tx.id().to_string()));
        }

        for address in [tx.from(), tx.to()] {
            if !is_valid_address(address) {
                return Err(ValidationError::InvalidAddress(address.to_string()));
            }
        }

        // Settlement debits token + fee; a negative amount would mint value
        for amount in [tx.token(), tx.fee()] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(ValidationError::InvalidAmount(amount));
            }
        }

        match tx.kind() {
            TransactionKind::Origin => Err(ValidationError::InvalidType(tx.kind())),
            TransactionKind::Standard => self.validate_standard(tx),
            TransactionKind::Fast => self.validate_fast(tx),
        }
    }

    fn validate_fast(&self, tx: &Transaction) -> Result<(), ValidationError> {
        if !is_valid_fee(tx.fee(), tx.data()) {
            return Err(ValidationError::InvalidFee {
                declared: tx.fee(),
                expected: calculate_fee(tx.data()),
            });
        }

        self.check_funds(tx.from(), tx.fee() + tx.token())
    }

    fn validate_standard(&self, tx: &Transaction) -> Result<(), ValidationError> {
        if !verify_proof_of_work(tx.data(), tx.nonce()) {
            return Err(ValidationError::InvalidPow);
        }

        if tx.token() > 0.0 {
            self.check_funds(tx.from(), tx.token())?;
        }

        Ok(())
    }

    fn check_funds(&self, seed: &str, required: f64) -> Result<(), ValidationError> {
        // An unknown sender has nothing to spend
        let available = self.wallets.balance(seed).unwrap_or(0.0);
        if self.wallets.contains(seed) && required <= available {
            Ok(())
        } else {
            Err(ValidationError::InsufficientBalance {
                available,
                required,
            })
        }
    }
}
