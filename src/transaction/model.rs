use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length every wallet address (seed) must have
pub const ADDRESS_LENGTH: usize = 64;

/// The kind of a transaction, which decides how it is validated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Genesis transaction seeding the money supply; never admissible
    #[serde(rename = "transaction-origin")]
    Origin,
    /// Gated by proof-of-work, pays no fee
    #[serde(rename = "transaction-standard")]
    Standard,
    /// Gated by a burned fee, needs no proof-of-work
    #[serde(rename = "transaction-fast")]
    Fast,
}

impl TransactionKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Origin => "transaction-origin",
            Self::Standard => "transaction-standard",
            Self::Fast => "transaction-fast",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a transaction: pending until selected as a tip, then confirmed for good
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
}

/// A transaction in the tangle
///
/// Serialized with the field names used on the gossip wire (`ID`, `From`,
/// `TimestampCreated`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    #[serde(rename = "ID")]
    id: String,
    timestamp_created: DateTime<Utc>,
    #[serde(default)]
    timestamp_added: Option<DateTime<Utc>>,
    #[serde(default)]
    timestamp_confirmed: Option<DateTime<Utc>>,
    token: f64,
    #[serde(default)]
    data: String,
    from: String,
    to: String,
    #[serde(default)]
    nonce: u64,
    #[serde(default)]
    fee: f64,
    status: TransactionStatus,
    #[serde(rename = "Type")]
    kind: TransactionKind,
}

impl Transaction {
    /// Create a new pending transaction with a fresh v4 UUID and the current time
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        token: f64,
        data: impl Into<String>,
        kind: TransactionKind,
        fee: f64,
        nonce: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp_created: Utc::now(),
            timestamp_added: None,
            timestamp_confirmed: None,
            token,
            data: data.into(),
            from: from.into(),
            to: to.into(),
            nonce,
            fee,
            status: TransactionStatus::Pending,
            kind,
        }
    }

    /// Replace the identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Replace the creation timestamp
    pub fn with_timestamp_created(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp_created = at;
        self
    }

    /// Replace the proof-of-work nonce
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Replace the fee
    pub fn with_fee(mut self, fee: f64) -> Self {
        self.fee = fee;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn token(&self) -> f64 {
        self.token
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn fee(&self) -> f64 {
        self.fee
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == TransactionStatus::Confirmed
    }

    pub fn timestamp_created(&self) -> DateTime<Utc> {
        self.timestamp_created
    }

    pub fn timestamp_added(&self) -> Option<DateTime<Utc>> {
        self.timestamp_added
    }

    pub fn timestamp_confirmed(&self) -> Option<DateTime<Utc>> {
        self.timestamp_confirmed
    }

    /// Total amount debited from the sender when this transaction is confirmed
    pub fn debit_amount(&self) -> f64 {
        self.token + self.fee
    }

    /// Stamp the time of pool admission
    pub fn mark_added(&mut self) {
        self.timestamp_added = Some(Utc::now());
    }

    /// Move to `Confirmed` and stamp the confirmation time.
    ///
    /// Calling this on an already confirmed transaction only re-stamps the time.
    pub fn mark_confirmed(&mut self) {
        self.mark_confirmed_at(Utc::now());
    }

    /// Move to `Confirmed` with an explicit confirmation time
    pub fn mark_confirmed_at(&mut self, at: DateTime<Utc>) {
        self.status = TransactionStatus::Confirmed;
        self.timestamp_confirmed = Some(at);
    }
}

/// Check that an identifier parses as a UUID
pub fn is_valid_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

/// Check that an address has the fixed address length, in bytes
pub fn is_valid_address(address: &str) -> bool {
    address.len() == ADDRESS_LENGTH
}
