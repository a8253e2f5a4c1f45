// Settlement - confirming a tip and moving its value
//
// This is the one place that touches all three stores for a tip. The steps
// are separately locked; a failure between them leaves the stores partially
// updated. The credit step alone is compensated, exactly once.

use crate::node::{AdmissionError, LedgerContext};
use crate::transaction::Transaction;
use crate::wallet::{BalanceBook, Wallet, WalletError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Confirm-and-transfer for one selection tip
pub trait TipSettlement: Send + Sync {
    /// Confirm `tip` in the DAG, move its value, evict it from the pending
    /// pool and record it in the sender's history. Returns the confirmed DAG
    /// entry.
    fn settle(&self, tip: &Transaction) -> Result<Transaction, AdmissionError>;
}

/// Best-effort settlement with a compensating credit on partial transfer
pub struct CompensatingSettlement {
    context: LedgerContext,
    book: Arc<dyn BalanceBook>,
}

impl CompensatingSettlement {
    /// Settle against the context's wallet store
    pub fn new(context: LedgerContext) -> Self {
        let book: Arc<dyn BalanceBook> = context.wallets.clone();
        Self { context, book }
    }

    /// Move balances through `book` instead of the context's wallet store
    pub fn with_balance_book(mut self, book: Arc<dyn BalanceBook>) -> Self {
        self.book = book;
        self
    }

    /// Debit `from` by token + fee and credit `to` by token; the fee is burned.
    ///
    /// An unknown recipient is registered with a zero balance first.
    pub fn transfer(&self, tip: &Transaction) -> Result<(), WalletError> {
        let wallets = &self.book;

        if !wallets.contains(tip.from()) {
            return Err(WalletError::WalletNotFound(tip.from().to_string()));
        }
        if wallets.save_if_absent(Wallet::new(tip.to())) {
            debug!(seed = tip.to(), "registered recipient wallet");
        }

        let debit = tip.debit_amount();
        wallets.decrease_balance(tip.from(), debit)?;

        if let Err(err) = wallets.increase_balance(tip.to(), tip.token()) {
            warn!(tx_id = tip.id(), error = %err, "credit failed, restoring sender balance");
            wallets.increase_balance(tip.from(), debit)?;
            return Err(err);
        }

        Ok(())
    }
}

impl TipSettlement for CompensatingSettlement {
    fn settle(&self, tip: &Transaction) -> Result<Transaction, AdmissionError> {
        let confirmed = self
            .context
            .dag
            .confirm_transaction(tip.id())
            .map_err(|source| AdmissionError::TipConfirmationFailed {
                id: tip.id().to_string(),
                source,
            })?;

        self.transfer(tip)?;
        self.context.pending.delete(tip.id());

        let mut record = tip.clone();
        record.mark_confirmed_at(confirmed.timestamp_confirmed().unwrap_or_else(Utc::now));
        self.context.wallets.append_history(tip.from(), record)?;

        debug!(
            tx_id = tip.id(),
            from = tip.from(),
            to = tip.to(),
            token = tip.token(),
            fee = tip.fee(),
            "tip settled"
        );
        Ok(confirmed)
    }
}
