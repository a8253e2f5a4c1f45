// WalletStore - keyed registry of wallets
//
// Every operation takes the store's lock for exactly one map access, so an
// increase and a decrease on the same wallet can never interleave.

use crate::transaction::Transaction;
use crate::wallet::{Wallet, WalletError};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct WalletStore {
    wallets: RwLock<HashMap<String, Wallet>>,
}

impl WalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a wallet
    pub fn save(&self, wallet: Wallet) {
        self.wallets.write().insert(wallet.seed().to_string(), wallet);
    }

    /// Insert a wallet only if no wallet with that seed exists.
    ///
    /// Returns `true` when the wallet was inserted.
    pub fn save_if_absent(&self, wallet: Wallet) -> bool {
        let mut wallets = self.wallets.write();
        if wallets.contains_key(wallet.seed()) {
            return false;
        }
        wallets.insert(wallet.seed().to_string(), wallet);
        true
    }

    /// Get a copy of a wallet
    pub fn get(&self, seed: &str) -> Option<Wallet> {
        self.wallets.read().get(seed).cloned()
    }

    pub fn contains(&self, seed: &str) -> bool {
        self.wallets.read().contains_key(seed)
    }

    pub fn balance(&self, seed: &str) -> Option<f64> {
        self.wallets.read().get(seed).map(Wallet::balance)
    }

    pub fn len(&self) -> usize {
        self.wallets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.read().is_empty()
    }

    /// Sum of all balances
    pub fn total_supply(&self) -> f64 {
        self.wallets.read().values().map(Wallet::balance).sum()
    }

    pub fn increase_balance(&self, seed: &str, amount: f64) -> Result<(), WalletError> {
        let mut wallets = self.wallets.write();
        let wallet = wallets
            .get_mut(seed)
            .ok_or_else(|| WalletError::WalletNotFound(seed.to_string()))?;
        wallet.increase_balance(amount)
    }

    pub fn decrease_balance(&self, seed: &str, amount: f64) -> Result<(), WalletError> {
        let mut wallets = self.wallets.write();
        let wallet = wallets
            .get_mut(seed)
            .ok_or_else(|| WalletError::WalletNotFound(seed.to_string()))?;
        wallet.decrease_balance(amount)
    }

    pub fn append_history(&self, seed: &str, transaction: Transaction) -> Result<(), WalletError> {
        let mut wallets = self.wallets.write();
        let wallet = wallets
            .get_mut(seed)
            .ok_or_else(|| WalletError::WalletNotFound(seed.to_string()))?;
        wallet.add_transaction_to_history(transaction);
        Ok(())
    }
}

/// The balance operations token interchange is built on
pub trait BalanceBook: Send + Sync {
    fn contains(&self, seed: &str) -> bool;

    /// Register `wallet` unless its seed is known; `true` when inserted
    fn save_if_absent(&self, wallet: Wallet) -> bool;

    fn increase_balance(&self, seed: &str, amount: f64) -> Result<(), WalletError>;

    fn decrease_balance(&self, seed: &str, amount: f64) -> Result<(), WalletError>;
}

impl BalanceBook for WalletStore {
    fn contains(&self, seed: &str) -> bool {
        WalletStore::contains(self, seed)
    }

    fn save_if_absent(&self, wallet: Wallet) -> bool {
        WalletStore::save_if_absent(self, wallet)
    }

    fn increase_balance(&self, seed: &str, amount: f64) -> Result<(), WalletError> {
        WalletStore::increase_balance(self, seed, amount)
    }

    fn decrease_balance(&self, seed: &str, amount: f64) -> Result<(), WalletError> {
        WalletStore::decrease_balance(self, seed, amount)
    }
}
