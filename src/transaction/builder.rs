use crate::transaction::{
    calculate_fee, is_valid_address, solve_proof_of_work, Transaction, TransactionKind,
};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Nonce search budget used when none is configured
pub const DEFAULT_POW_MAX_ITERATIONS: u64 = 1_000_000;

/// Errors that can occur when building a transaction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Missing sender address")]
    MissingSender,

    #[error("Missing recipient address")]
    MissingRecipient,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Transaction kind {0} cannot be built by clients")]
    UnsupportedKind(TransactionKind),

    #[error("Proof of work failed after {0} iterations")]
    ProofOfWorkExhausted(u64),
}

/// Builder for client-side transactions
///
/// Fills in what the sender is responsible for: the fee of a fast
/// transaction and the proof-of-work nonce of a standard one.
pub struct TransactionBuilder {
    from: Option<String>,
    to: Option<String>,
    token: f64,
    data: String,
    kind: TransactionKind,
    timestamp_created: Option<DateTime<Utc>>,
    pow_max_iterations: u64,
}

impl TransactionBuilder {
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            from: None,
            to: None,
            token: 0.0,
            data: String::new(),
            kind,
            timestamp_created: None,
            pow_max_iterations: DEFAULT_POW_MAX_ITERATIONS,
        }
    }

    /// Shorthand for a fee-paying transaction
    pub fn fast() -> Self {
        Self::new(TransactionKind::Fast)
    }

    /// Shorthand for a proof-of-work transaction
    pub fn standard() -> Self {
        Self::new(TransactionKind::Standard)
    }

    /// Set the sender (required)
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Set the recipient (required)
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to = Some(address.into());
        self
    }

    /// Set the amount to transfer (defaults to 0)
    pub fn token(mut self, token: f64) -> Self {
        self.token = token;
        self
    }

    /// Set the payload
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    /// Override the creation time (defaults to now)
    pub fn timestamp_created(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp_created = Some(at);
        self
    }

    /// Cap the nonce search for standard transactions
    pub fn pow_max_iterations(mut self, iterations: u64) -> Self {
        self.pow_max_iterations = iterations;
        self
    }

    /// Build the transaction, computing fee or nonce as the kind requires
    pub fn build(self) -> Result<Transaction, BuildError> {
        let from = self.from.ok_or(BuildError::MissingSender)?;
        let to = self.to.ok_or(BuildError::MissingRecipient)?;

        for address in [&from, &to] {
            if !is_valid_address(address) {
                return Err(BuildError::InvalidAddress(address.clone()));
            }
        }

        if !self.token.is_finite() || self.token < 0.0 {
            return Err(BuildError::InvalidAmount(self.token));
        }

        let (fee, nonce) = match self.kind {
            TransactionKind::Fast => (calculate_fee(&self.data), 0),
            TransactionKind::Standard => {
                let nonce = solve_proof_of_work(&self.data, self.pow_max_iterations)
                    .ok_or(BuildError::ProofOfWorkExhausted(self.pow_max_iterations))?;
                (0.0, nonce)
            }
            TransactionKind::Origin => return Err(BuildError::UnsupportedKind(self.kind)),
        };

        let tx = Transaction::new(from, to, self.token, self.data, self.kind, fee, nonce);
        Ok(match self.timestamp_created {
            Some(at) => tx.with_timestamp_created(at),
            None => tx,
        })
    }
}
