use crate::ledger::{Dag, PendingPool};
use crate::transaction::TransactionValidator;
use crate::wallet::WalletStore;
use std::sync::Arc;

/// Handles to the three shared stores.
///
/// Each store carries its own lock; nothing here locks across stores.
#[derive(Clone, Debug, Default)]
pub struct LedgerContext {
    pub wallets: Arc<WalletStore>,
    pub pending: Arc<PendingPool>,
    pub dag: Arc<Dag>,
}

impl LedgerContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator reading balances from this context's wallet store
    pub fn validator(&self) -> TransactionValidator<'_> {
        TransactionValidator::new(&self.wallets)
    }
}
