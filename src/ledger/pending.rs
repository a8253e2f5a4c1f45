// Pending pool - transactions waiting to be selected as tips
//
// Entries are added on admission and removed once, when a later transaction
// confirms them.

use crate::transaction::Transaction;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Number of tips every new transaction must confirm
pub const TIPS_PER_TRANSACTION: usize = 2;

#[derive(Debug, Default)]
pub struct PendingPool {
    transactions: RwLock<HashMap<String, Transaction>>,
}

impl PendingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a pending transaction
    pub fn add(&self, transaction: Transaction) {
        self.transactions
            .write()
            .insert(transaction.id().to_string(), transaction);
    }

    pub fn get(&self, id: &str) -> Option<Transaction> {
        self.transactions.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.transactions.read().contains_key(id)
    }

    /// Remove a transaction; returns it if it was pending
    pub fn delete(&self, id: &str) -> Option<Transaction> {
        self.transactions.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.transactions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.read().is_empty()
    }

    /// The oldest pending transactions by creation time, ascending.
    ///
    /// Returns at most [`TIPS_PER_TRANSACTION`] entries. Equal timestamps
    /// come out in map iteration order.
    pub fn select_tips(&self) -> Vec<Transaction> {
        let mut all: Vec<Transaction> = self.transactions.read().values().cloned().collect();
        all.sort_by_key(Transaction::timestamp_created);
        all.truncate(TIPS_PER_TRANSACTION);
        all
    }
}
