// Node module - THE LEDGER CORE
// Configuration, genesis, tip settlement and the admission protocol

mod config;
mod context;
mod engine;
mod error;
pub mod genesis;
mod settlement;

pub use config::{ConfigError, NodeConfig, GENESIS_ADDRESS, GENESIS_SUPPLY};
pub use context::LedgerContext;
pub use engine::{Node, Source};
pub use error::{AdmissionError, NodeError};
pub use settlement::{CompensatingSettlement, TipSettlement};
