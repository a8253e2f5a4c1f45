// Node - the admission protocol and the operations exposed to callers
//
// Admission of a transaction T with selection tips [S1, S2]:
// 1. validate T (nothing is touched on failure)
// 2. per tip: validate, confirm in the DAG, transfer value, evict from the
//    pool, append to the sender's history
// 3. stamp T and insert it into the pool and the DAG as pending
// 4. broadcast T with its tips when it originated locally
//
// Steps run against separately locked stores; two admissions racing on the
// same tip can both confirm it.

use crate::ledger::{DagSnapshot, TIPS_PER_TRANSACTION};
use crate::node::genesis;
use crate::node::{
    AdmissionError, CompensatingSettlement, LedgerContext, NodeConfig, NodeError, TipSettlement,
};
use crate::sync::{GossipMessage, GossipPublisher, MessageType, NewTransactionPayload, ProtocolError};
use crate::transaction::{is_valid_address, Transaction, ValidationError};
use crate::wallet::Wallet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a transaction entered this node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Submitted to this node directly; broadcast after admission
    Local,
    /// Received from a peer; never re-broadcast
    Gossip,
}

/// A ledger node: shared stores, the settlement strategy and the outbound gossip handle
pub struct Node {
    config: NodeConfig,
    context: LedgerContext,
    settlement: Box<dyn TipSettlement>,
    publisher: Arc<dyn GossipPublisher>,
}

impl Node {
    /// Create a node with genesis state (and demo transactions if configured)
    pub fn new(config: NodeConfig, publisher: Arc<dyn GossipPublisher>) -> Result<Self, NodeError> {
        config.validate()?;

        let context = LedgerContext::new();
        genesis::bootstrap(&context, &config)?;

        Ok(Self {
            settlement: Box::new(CompensatingSettlement::new(context.clone())),
            config,
            context,
            publisher,
        })
    }

    /// Replace the tip settlement strategy
    pub fn with_settlement(mut self, settlement: Box<dyn TipSettlement>) -> Self {
        self.settlement = settlement;
        self
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn context(&self) -> &LedgerContext {
        &self.context
    }

    // ========================================================================
    // LEDGER OPERATIONS
    // ========================================================================

    /// Put a transaction straight into the pool and the DAG, skipping admission
    pub fn add_pending_transaction(&self, transaction: Transaction) {
        self.context.pending.add(transaction.clone());
        self.context.dag.add_transaction(transaction);
    }

    /// The tips a new transaction should confirm: the two oldest pending ones
    pub fn get_oldest_tips(&self) -> Vec<Transaction> {
        self.context.pending.select_tips()
    }

    /// Admit a locally submitted transaction and broadcast it
    pub fn admit_transaction(
        &self,
        transaction: Transaction,
        selection_tips: Vec<Transaction>,
    ) -> Result<Transaction, AdmissionError> {
        self.admit(transaction, selection_tips, Source::Local)
    }

    /// Run the admission protocol for a transaction from `source`
    pub fn admit(
        &self,
        mut transaction: Transaction,
        selection_tips: Vec<Transaction>,
        source: Source,
    ) -> Result<Transaction, AdmissionError> {
        if selection_tips.len() > TIPS_PER_TRANSACTION {
            return Err(AdmissionError::TooManySelectionTips(selection_tips.len()));
        }

        let validator = self.context.validator();
        validator.validate(&transaction)?;

        for tip in &selection_tips {
            validator
                .validate(tip)
                .map_err(|err| AdmissionError::InvalidSelectionTip {
                    id: tip.id().to_string(),
                    source: err,
                })?;
            self.settlement.settle(tip)?;
        }

        transaction.mark_added();
        self.context.pending.add(transaction.clone());
        self.context.dag.add_transaction(transaction.clone());

        info!(
            tx_id = transaction.id(),
            kind = %transaction.kind(),
            tips = selection_tips.len(),
            source = ?source,
            "transaction admitted"
        );

        if source == Source::Local {
            let payload = NewTransactionPayload::new(transaction.clone(), selection_tips);
            self.broadcast(GossipMessage::new_transaction(&payload));
        }

        Ok(transaction)
    }

    // ========================================================================
    // WALLETS & QUERIES
    // ========================================================================

    /// Register an empty wallet and announce it.
    ///
    /// An existing wallet is returned unchanged and not re-announced.
    pub fn create_wallet(&self, seed: &str) -> Result<Wallet, ValidationError> {
        if !is_valid_address(seed) {
            return Err(ValidationError::InvalidAddress(seed.to_string()));
        }

        let wallet = Wallet::new(seed);
        if !self.context.wallets.save_if_absent(wallet.clone()) {
            debug!(seed, "wallet already exists");
            return Ok(self.context.wallets.get(seed).unwrap_or(wallet));
        }

        info!(seed, "wallet created");
        self.broadcast(GossipMessage::wallet_create(&wallet));
        Ok(wallet)
    }

    pub fn get_wallet(&self, seed: &str) -> Option<Wallet> {
        self.context.wallets.get(seed)
    }

    pub fn dag_snapshot(&self) -> DagSnapshot {
        self.context.dag.snapshot()
    }

    // ========================================================================
    // GOSSIP
    // ========================================================================

    /// Entry point for a message delivered by the transport.
    ///
    /// Failures are logged and returned; they never affect the node beyond
    /// the message being dropped.
    pub fn handle_message(&self, message: GossipMessage) -> Result<(), NodeError> {
        let message_type = message.message_type();
        let result = self.dispatch(message);
        if let Err(err) = &result {
            warn!(message_type = %message_type, error = %err, "dropping gossip message");
        }
        result
    }

    /// Delivery entry point for the transport, which has no one to report to.
    ///
    /// A rejected message was already logged at warn by `handle_message`.
    pub fn receive(&self, message: GossipMessage) {
        if let Err(err) = self.handle_message(message) {
            debug!(error = %err, "gossip message dropped");
        }
    }

    fn dispatch(&self, message: GossipMessage) -> Result<(), NodeError> {
        match message.message_type() {
            MessageType::WalletCreate => {
                let wallet = message.decode_wallet()?;
                let seed = wallet.seed().to_string();
                if self.context.wallets.save_if_absent(wallet) {
                    info!(seed = %seed, "wallet received from peer");
                } else {
                    debug!(seed = %seed, "ignoring known wallet");
                }
                Ok(())
            }
            MessageType::NewTransaction => {
                let payload = message.decode_new_transaction()?;
                self.admit(payload.transaction, payload.selection_tips, Source::Gossip)?;
                Ok(())
            }
        }
    }

    fn broadcast(&self, message: Result<GossipMessage, ProtocolError>) {
        let result = match message {
            Ok(message) => self.publisher.publish(message).map_err(|e| e.to_string()),
            Err(err) => Err(err.to_string()),
        };
        if let Err(err) = result {
            warn!(error = %err, "gossip broadcast dropped");
        }
    }
}
