// Wallet module - WHO OWNS WHAT
// Account balances, per-account history, and the locked registry that serializes them

mod model;
mod seed;
mod store;

pub use model::{Wallet, WalletError};
pub use seed::generate_seed;
pub use store::{BalanceBook, WalletStore};
