use crate::ledger::DagError;
use crate::node::ConfigError;
use crate::sync::ProtocolError;
use crate::transaction::{BuildError, ValidationError};
use crate::wallet::WalletError;
use thiserror::Error;

/// Why a transaction was not admitted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdmissionError {
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(#[from] ValidationError),

    #[error("Too many selection tips: {0}")]
    TooManySelectionTips(usize),

    #[error("Invalid selection tip {id}: {source}")]
    InvalidSelectionTip {
        id: String,
        #[source]
        source: ValidationError,
    },

    #[error("Error confirming selection tip {id}: {source}")]
    TipConfirmationFailed {
        id: String,
        #[source]
        source: DagError,
    },

    #[error("Token interchange failed: {0}")]
    Settlement(#[from] WalletError),
}

/// Errors surfaced by node operations
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Bootstrap failed: {0}")]
    Bootstrap(#[from] BuildError),

    #[error("Genesis wallet rejected: {0}")]
    Genesis(#[from] WalletError),

    #[error("Invalid wallet: {0}")]
    InvalidWallet(#[from] ValidationError),

    #[error("Malformed gossip message: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Admission rejected: {0}")]
    Admission(#[from] AdmissionError),
}
