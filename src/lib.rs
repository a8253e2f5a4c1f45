// tanglemesh - peer-replicated tangle ledger
//
// Nodes keep a DAG of transactions. A transaction is admitted only after it
// confirms up to two older pending transactions (its tips), which moves their
// value between wallets. Admitted transactions and new wallets are gossiped
// to peers.

pub mod ledger;
pub mod node;
pub mod sync;
pub mod transaction;
pub mod transport;
pub mod wallet;

pub use node::{AdmissionError, Node, NodeConfig, NodeError};
pub use transaction::{Transaction, TransactionBuilder, TransactionKind, TransactionStatus};
pub use wallet::Wallet;
