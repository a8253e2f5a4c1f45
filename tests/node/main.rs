// Node integration tests

mod admission_test;

use std::sync::Arc;
use tanglemesh::node::{Node, NodeConfig, GENESIS_ADDRESS};
use tanglemesh::sync::{ChannelPublisher, GossipMessage};
use tanglemesh::transaction::{Transaction, TransactionBuilder, ADDRESS_LENGTH};
use tokio::sync::mpsc::UnboundedReceiver;

pub fn address(c: char) -> String {
    std::iter::repeat(c).take(ADDRESS_LENGTH).collect()
}

pub fn node() -> (Node, UnboundedReceiver<GossipMessage>) {
    let (publisher, receiver) = ChannelPublisher::new();
    let node = Node::new(NodeConfig::default(), Arc::new(publisher)).unwrap();
    (node, receiver)
}

/// A genesis-funded fast transaction sitting in the pool and the DAG
pub fn pending_from_genesis(node: &Node, to: char, token: f64) -> Transaction {
    let tx = TransactionBuilder::fast()
        .from(GENESIS_ADDRESS)
        .to(address(to))
        .token(token)
        .data("test")
        .build()
        .unwrap();
    node.add_pending_transaction(tx.clone());
    tx
}

/// A zero-value standard transaction, valid for any sender
pub fn ping(from: &str, to: &str) -> Transaction {
    TransactionBuilder::standard()
        .from(from)
        .to(to)
        .data("ping")
        .build()
        .unwrap()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
