// Protocol - the gossip envelope
//
// Every message is `{"type": ..., "data": "<JSON string>"}`:
// - wallet-create: a serialized Wallet
// - new-transaction: `{"transaction": ..., "selectionTips": [...]}`

use crate::transaction::Transaction;
use crate::wallet::Wallet;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Protocol errors
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Failed to encode message: {0}")]
    EncodeFailed(#[source] serde_json::Error),

    #[error("Failed to decode message: {0}")]
    DecodeFailed(#[source] serde_json::Error),

    #[error("Expected a {expected} message, got {actual}")]
    UnexpectedType {
        expected: MessageType,
        actual: MessageType,
    },
}

/// Types of messages on the gossip network
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "wallet-create")]
    WalletCreate,
    #[serde(rename = "new-transaction")]
    NewTransaction,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WalletCreate => "wallet-create",
            Self::NewTransaction => "new-transaction",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new transaction together with the tips it confirmed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTransactionPayload {
    pub transaction: Transaction,
    #[serde(rename = "selectionTips", default)]
    pub selection_tips: Vec<Transaction>,
}

impl NewTransactionPayload {
    pub fn new(transaction: Transaction, selection_tips: Vec<Transaction>) -> Self {
        Self {
            transaction,
            selection_tips,
        }
    }
}

/// The gossip envelope
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GossipMessage {
    #[serde(rename = "type")]
    message_type: MessageType,
    data: String,
}

impl GossipMessage {
    /// Announce a newly created wallet
    pub fn wallet_create(wallet: &Wallet) -> Result<Self, ProtocolError> {
        Ok(Self {
            message_type: MessageType::WalletCreate,
            data: serde_json::to_string(wallet).map_err(ProtocolError::EncodeFailed)?,
        })
    }

    /// Announce an admitted transaction and its tips
    pub fn new_transaction(payload: &NewTransactionPayload) -> Result<Self, ProtocolError> {
        Ok(Self {
            message_type: MessageType::NewTransaction,
            data: serde_json::to_string(payload).map_err(ProtocolError::EncodeFailed)?,
        })
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Raw JSON payload
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn decode_wallet(&self) -> Result<Wallet, ProtocolError> {
        self.expect_type(MessageType::WalletCreate)?;
        serde_json::from_str(&self.data).map_err(ProtocolError::DecodeFailed)
    }

    pub fn decode_new_transaction(&self) -> Result<NewTransactionPayload, ProtocolError> {
        self.expect_type(MessageType::NewTransaction)?;
        serde_json::from_str(&self.data).map_err(ProtocolError::DecodeFailed)
    }

    fn expect_type(&self, expected: MessageType) -> Result<(), ProtocolError> {
        if self.message_type != expected {
            return Err(ProtocolError::UnexpectedType {
                expected,
                actual: self.message_type,
            });
        }
        Ok(())
    }

    /// Serialize the envelope for the wire
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(self).map_err(ProtocolError::EncodeFailed)
    }

    /// Parse an envelope received from the wire
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        serde_json::from_slice(bytes).map_err(ProtocolError::DecodeFailed)
    }
}
