// Admission Tests
// Tip confirmation, value movement and rejection paths

use super::{address, approx_eq, node, pending_from_genesis, ping};
use tanglemesh::ledger::DagError;
use tanglemesh::node::{AdmissionError, GENESIS_ADDRESS, GENESIS_SUPPLY};
use tanglemesh::sync::MessageType;
use tanglemesh::transaction::{
    verify_proof_of_work, Transaction, TransactionBuilder, TransactionKind, TransactionStatus,
    ValidationError,
};

// ============================================================================
// SUCCESSFUL ADMISSION
// ============================================================================

#[test]
fn test_tips_confirmed_and_new_transaction_pending() {
    let (node, _rx) = node();
    let s1 = pending_from_genesis(&node, 'b', 1.0);
    let s2 = pending_from_genesis(&node, 'c', 2.0);
    let t = ping(&address('b'), GENESIS_ADDRESS);

    let admitted = node
        .admit_transaction(t.clone(), vec![s1.clone(), s2.clone()])
        .unwrap();

    let ctx = node.context();
    for tip in [&s1, &s2] {
        assert!(!ctx.pending.contains(tip.id()));
        let stored = ctx.dag.get_transaction_by_id(tip.id()).unwrap();
        assert_eq!(stored.status(), TransactionStatus::Confirmed);
        assert!(stored.timestamp_confirmed().is_some());
    }

    assert!(ctx.pending.contains(t.id()));
    let stored = ctx.dag.get_transaction_by_id(t.id()).unwrap();
    assert_eq!(stored.status(), TransactionStatus::Pending);
    assert!(stored.timestamp_added().is_some());
    assert_eq!(stored, admitted);
}

#[test]
fn test_genesis_transfer_with_fee_burn() {
    let (node, _rx) = node();
    let b = address('b');
    node.create_wallet(&b).unwrap();

    let tip = pending_from_genesis(&node, 'b', 0.01);
    node.admit_transaction(ping(&b, GENESIS_ADDRESS), vec![tip.clone()])
        .unwrap();

    let recipient = node.get_wallet(&b).unwrap();
    let genesis = node.get_wallet(GENESIS_ADDRESS).unwrap();
    assert!(approx_eq(recipient.balance(), 0.01));
    assert!(approx_eq(genesis.balance(), GENESIS_SUPPLY - 1.01));

    let history = genesis.transaction_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id(), tip.id());
    assert!(history[0].is_confirmed());
}

#[test]
fn test_total_supply_drops_by_fees_only() {
    let (node, _rx) = node();
    let tips = vec![
        pending_from_genesis(&node, 'b', 3.0),
        pending_from_genesis(&node, 'c', 4.0),
    ];
    let fees: f64 = tips.iter().map(Transaction::fee).sum();
    let before = node.context().wallets.total_supply();

    node.admit_transaction(ping(GENESIS_ADDRESS, &address('d')), tips)
        .unwrap();

    let after = node.context().wallets.total_supply();
    assert!(approx_eq(before - after, fees));
    assert!(approx_eq(node.get_wallet(&address('b')).unwrap().balance(), 3.0));
    assert!(approx_eq(node.get_wallet(&address('c')).unwrap().balance(), 4.0));
}

#[test]
fn test_admission_without_tips() {
    let (node, _rx) = node();
    let t = ping(GENESIS_ADDRESS, &address('b'));

    node.admit_transaction(t.clone(), Vec::new()).unwrap();

    assert!(node.context().pending.contains(t.id()));
    assert_eq!(node.get_oldest_tips()[0].id(), t.id());
}

#[test]
fn test_admitted_transactions_become_tips() {
    let (node, _rx) = node();
    let first = ping(GENESIS_ADDRESS, &address('b'));
    node.admit_transaction(first.clone(), Vec::new()).unwrap();

    let tips = node.get_oldest_tips();
    let second = ping(GENESIS_ADDRESS, &address('c'));
    node.admit_transaction(second.clone(), tips).unwrap();

    let snapshot = node.dag_snapshot();
    assert!(snapshot.transactions[first.id()].is_confirmed());
    assert!(!snapshot.transactions[second.id()].is_confirmed());
    assert_eq!(node.get_oldest_tips().len(), 1);
}

// ============================================================================
// REJECTION
// ============================================================================

#[test]
fn test_forged_pow_never_stored() {
    let (node, _rx) = node();
    let tip = pending_from_genesis(&node, 'b', 1.0);
    let data = "forged";
    let bad_nonce = (0..).find(|n| !verify_proof_of_work(data, *n)).unwrap();
    let t = Transaction::new(
        GENESIS_ADDRESS,
        address('b'),
        0.0,
        data,
        TransactionKind::Standard,
        0.0,
        bad_nonce,
    );

    let err = node.admit_transaction(t.clone(), vec![tip.clone()]).unwrap_err();

    assert_eq!(
        err,
        AdmissionError::InvalidTransaction(ValidationError::InvalidPow)
    );
    assert!(!node.context().pending.contains(t.id()));
    assert!(!node.context().dag.contains(t.id()));
    // The tip was left alone
    assert!(node.context().pending.contains(tip.id()));
    assert!(approx_eq(
        node.get_wallet(GENESIS_ADDRESS).unwrap().balance(),
        GENESIS_SUPPLY
    ));
}

#[test]
fn test_too_many_tips_rejected_before_any_change() {
    let (node, _rx) = node();
    let tips: Vec<Transaction> = ['b', 'c', 'd']
        .into_iter()
        .map(|c| pending_from_genesis(&node, c, 1.0))
        .collect();
    let t = ping(GENESIS_ADDRESS, &address('e'));

    let err = node.admit_transaction(t.clone(), tips.clone()).unwrap_err();

    assert_eq!(err, AdmissionError::TooManySelectionTips(3));
    assert!(!node.context().dag.contains(t.id()));
    for tip in &tips {
        assert!(node.context().pending.contains(tip.id()));
    }
}

#[test]
fn test_invalid_tip_rejects_transaction() {
    let (node, _rx) = node();
    let bad_tip = pending_from_genesis(&node, 'b', 1.0).with_fee(5.0);
    let t = ping(GENESIS_ADDRESS, &address('c'));

    let err = node.admit_transaction(t.clone(), vec![bad_tip.clone()]).unwrap_err();

    assert!(matches!(
        err,
        AdmissionError::InvalidSelectionTip { ref id, source: ValidationError::InvalidFee { .. } }
            if id == bad_tip.id()
    ));
    assert!(!node.context().pending.contains(t.id()));
    assert!(!node.context().dag.contains(t.id()));
}

#[test]
fn test_tip_unknown_to_dag() {
    let (node, _rx) = node();
    // A well-formed tip the DAG never saw
    let unknown = TransactionBuilder::fast()
        .from(GENESIS_ADDRESS)
        .to(address('b'))
        .token(1.0)
        .build()
        .unwrap();
    let t = ping(GENESIS_ADDRESS, &address('c'));

    let err = node.admit_transaction(t.clone(), vec![unknown.clone()]).unwrap_err();

    assert_eq!(
        err,
        AdmissionError::TipConfirmationFailed {
            id: unknown.id().to_string(),
            source: DagError::TransactionNotFound(unknown.id().to_string()),
        }
    );
    assert!(!node.context().dag.contains(t.id()));
}

#[test]
fn test_underfunded_tip_rejected() {
    let (node, _rx) = node();
    let poor = address('p');
    node.create_wallet(&poor).unwrap();
    let tip = TransactionBuilder::fast()
        .from(poor.as_str())
        .to(address('q'))
        .token(10.0)
        .build()
        .unwrap();
    node.add_pending_transaction(tip.clone());

    let err = node
        .admit_transaction(ping(GENESIS_ADDRESS, &address('c')), vec![tip.clone()])
        .unwrap_err();

    assert!(matches!(
        err,
        AdmissionError::InvalidSelectionTip {
            source: ValidationError::InsufficientBalance { .. },
            ..
        }
    ));
    assert!(!node.dag_snapshot().transactions[tip.id()].is_confirmed());
}

#[test]
fn test_negative_token_tip_cannot_drain_recipient() {
    let (node, _rx) = node();
    let victim = address('v');
    node.create_wallet(&victim).unwrap();
    let tip = Transaction::new(
        GENESIS_ADDRESS,
        victim.clone(),
        -100.0,
        "test",
        TransactionKind::Fast,
        1.0,
        0,
    );

    // Refused as the new transaction itself
    let err = node.admit_transaction(tip.clone(), Vec::new()).unwrap_err();
    assert_eq!(
        err,
        AdmissionError::InvalidTransaction(ValidationError::InvalidAmount(-100.0))
    );

    // Refused as a tip even when planted in the pool directly
    node.add_pending_transaction(tip.clone());
    let err = node
        .admit_transaction(ping(GENESIS_ADDRESS, &address('c')), vec![tip.clone()])
        .unwrap_err();
    assert!(matches!(
        err,
        AdmissionError::InvalidSelectionTip {
            source: ValidationError::InvalidAmount(_),
            ..
        }
    ));

    assert_eq!(node.get_wallet(&victim).unwrap().balance(), 0.0);
    assert_eq!(
        node.get_wallet(GENESIS_ADDRESS).unwrap().balance(),
        GENESIS_SUPPLY
    );
}

// ============================================================================
// BROADCAST
// ============================================================================

#[test]
fn test_local_admission_is_broadcast_with_tips() {
    let (node, mut rx) = node();
    let tip = pending_from_genesis(&node, 'b', 1.0);
    let t = ping(GENESIS_ADDRESS, &address('c'));

    node.admit_transaction(t.clone(), vec![tip.clone()]).unwrap();

    let message = rx.try_recv().unwrap();
    assert_eq!(message.message_type(), MessageType::NewTransaction);
    let payload = message.decode_new_transaction().unwrap();
    assert_eq!(payload.transaction.id(), t.id());
    assert_eq!(payload.selection_tips, vec![tip]);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_rejected_admission_is_not_broadcast() {
    let (node, mut rx) = node();
    let t = ping(GENESIS_ADDRESS, &address('c')).with_id("bad-id");

    assert!(node.admit_transaction(t, Vec::new()).is_err());
    assert!(rx.try_recv().is_err());
}

// ============================================================================
// WALLETS & GENESIS
// ============================================================================

#[test]
fn test_genesis_state() {
    let (node, _rx) = node();

    let genesis = node.get_wallet(GENESIS_ADDRESS).unwrap();
    assert_eq!(genesis.balance(), GENESIS_SUPPLY);

    let snapshot = node.dag_snapshot();
    assert_eq!(snapshot.len(), 1);
    let origin = snapshot.transactions.values().next().unwrap();
    assert_eq!(origin.kind(), TransactionKind::Origin);
    assert_eq!(origin.from(), GENESIS_ADDRESS);
    assert_eq!(origin.to(), GENESIS_ADDRESS);
    assert!(node.context().pending.is_empty());
}

#[test]
fn test_create_wallet_is_idempotent() {
    let (node, mut rx) = node();
    let seed = address('w');

    let wallet = node.create_wallet(&seed).unwrap();
    assert_eq!(wallet.balance(), 0.0);
    assert!(wallet.transaction_history().is_empty());
    assert_eq!(rx.try_recv().unwrap().message_type(), MessageType::WalletCreate);

    // The genesis wallet keeps its balance and nothing is re-announced
    let genesis = node.create_wallet(GENESIS_ADDRESS).unwrap();
    assert_eq!(genesis.balance(), GENESIS_SUPPLY);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_create_wallet_rejects_bad_seed() {
    let (node, _rx) = node();

    assert_eq!(
        node.create_wallet("abc"),
        Err(ValidationError::InvalidAddress("abc".to_string()))
    );
    assert!(node.get_wallet("abc").is_none());
}

#[test]
fn test_generated_seed_registers() {
    let (node, _rx) = node();
    let seed = tanglemesh::wallet::generate_seed();

    let wallet = node.create_wallet(&seed).unwrap();

    assert_eq!(node.get_wallet(&seed), Some(wallet));
}

#[test]
fn test_demo_tips_settle_without_peers() {
    use std::sync::Arc;
    use tanglemesh::node::{Node, NodeConfig};
    use tanglemesh::sync::NullPublisher;

    let node = Node::new(
        NodeConfig::default().with_demo_transactions(true),
        Arc::new(NullPublisher),
    )
    .unwrap();
    let tips = node.get_oldest_tips();
    assert_eq!(tips.len(), 2);

    node.admit_transaction(ping(GENESIS_ADDRESS, &address('z')), tips.clone())
        .unwrap();

    // Two standard demo tips: no fee, 0.01 each
    for tip in &tips {
        assert!(approx_eq(node.get_wallet(tip.to()).unwrap().balance(), 0.01));
    }
    assert!(approx_eq(
        node.get_wallet(GENESIS_ADDRESS).unwrap().balance(),
        GENESIS_SUPPLY - 0.02
    ));
}
