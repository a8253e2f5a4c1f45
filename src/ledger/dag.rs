// DAG - every transaction ever admitted, pending or confirmed
//
// Entries are never removed. Edges are implicit: a transaction's parents
// are the tips it confirmed on admission.

use crate::transaction::{Transaction, TransactionStatus};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DagError {
    #[error("Transaction with ID {0} not found")]
    TransactionNotFound(String),
}

/// Point-in-time copy of the DAG, serialized as `{"Transactions": {id: tx}}`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DagSnapshot {
    pub transactions: HashMap<String, Transaction>,
}

impl DagSnapshot {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn count_with_status(&self, status: TransactionStatus) -> usize {
        self.transactions
            .values()
            .filter(|tx| tx.status() == status)
            .count()
    }
}

#[derive(Debug, Default)]
pub struct Dag {
    transactions: RwLock<HashMap<String, Transaction>>,
}

impl Dag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a transaction, overwriting any entry with the same id
    pub fn add_transaction(&self, transaction: Transaction) {
        self.transactions
            .write()
            .insert(transaction.id().to_string(), transaction);
    }

    pub fn get_transaction_by_id(&self, id: &str) -> Option<Transaction> {
        self.transactions.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.transactions.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.transactions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.read().is_empty()
    }

    /// Mark a transaction confirmed and stamp the confirmation time.
    ///
    /// There is no already-confirmed check: confirming twice succeeds and
    /// re-stamps `timestamp_confirmed`. Returns the updated entry.
    pub fn confirm_transaction(&self, id: &str) -> Result<Transaction, DagError> {
        let mut transactions = self.transactions.write();
        let transaction = transactions
            .get_mut(id)
            .ok_or_else(|| DagError::TransactionNotFound(id.to_string()))?;
        transaction.mark_confirmed();
        Ok(transaction.clone())
    }

    pub fn snapshot(&self) -> DagSnapshot {
        DagSnapshot {
            transactions: self.transactions.read().clone(),
        }
    }
}
