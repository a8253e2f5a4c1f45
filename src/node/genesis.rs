// Genesis - initial state of a fresh node
//
// The genesis wallet holds the whole supply and a self-referential origin
// transaction anchors the DAG. The demonstration set gives a new tangle two
// tips to confirm straight away.

use crate::node::{LedgerContext, NodeConfig, NodeError};
use crate::transaction::{BuildError, Transaction, TransactionBuilder, TransactionKind};
use crate::wallet::Wallet;
use chrono::{Duration, Utc};
use tracing::info;

/// Recipients of the demonstration pending transactions
const DEMO_RECIPIENTS: [(&str, TransactionKind); 4] = [
    (
        "8501df062b55e6f938cf5c2c36849e8c11663f8f79e28bd1a99431d825792a44",
        TransactionKind::Standard,
    ),
    (
        "dc22da8161544f7af3f949148fee1d6486b5ef3fcd339b0226384b11afb79f2e",
        TransactionKind::Standard,
    ),
    (
        "34030f5e884b81808993def07ebe442ec22c610bdf98d566fb56674ea57f6953",
        TransactionKind::Fast,
    ),
    (
        "f929aa0e806109b35f9cc2ed8483f8ce0db9b08c7e18ca7d9fbb3d9238dc9b89",
        TransactionKind::Fast,
    ),
];

const DEMO_TOKEN: f64 = 0.01;
const DEMO_DATA: &str = "test";

/// The synthetic origin transaction: from and to the genesis address, carrying the supply
pub fn origin_transaction(config: &NodeConfig) -> Transaction {
    Transaction::new(
        config.genesis_address.clone(),
        config.genesis_address.clone(),
        config.genesis_supply,
        "",
        TransactionKind::Origin,
        0.0,
        0,
    )
}

/// Genesis-funded pending transactions with strictly increasing creation times
pub fn demo_transactions(config: &NodeConfig) -> Result<Vec<Transaction>, BuildError> {
    let start = Utc::now();

    DEMO_RECIPIENTS
        .iter()
        .enumerate()
        .map(|(i, (recipient, kind))| {
            TransactionBuilder::new(*kind)
                .from(config.genesis_address.clone())
                .to(*recipient)
                .token(DEMO_TOKEN)
                .data(DEMO_DATA)
                .timestamp_created(start + Duration::milliseconds(i as i64))
                .build()
        })
        .collect()
}

/// Register the genesis wallet, the origin transaction and, if configured, the demo set
pub fn bootstrap(context: &LedgerContext, config: &NodeConfig) -> Result<(), NodeError> {
    let mut genesis = Wallet::new(config.genesis_address.clone());
    genesis.increase_balance(config.genesis_supply)?;
    context.wallets.save(genesis);

    let origin = origin_transaction(config);
    info!(tx_id = origin.id(), supply = config.genesis_supply, "genesis created");
    context.dag.add_transaction(origin);

    if config.seed_demo_transactions {
        let demo = demo_transactions(config)?;
        info!(count = demo.len(), "seeding demonstration pending transactions");
        for tx in demo {
            context.pending.add(tx.clone());
            context.dag.add_transaction(tx);
        }
    }

    Ok(())
}
