//! Allowance approval tests
//!
//! Exercises `Ledger::approve`: overwrite semantics, revocation, pair
//! isolation (including the reverse pair), self-approval, over-approval,
//! and event emission.

use lib_ledger::{Ledger, RecordingListener, TokenEvent};
use lib_types::{Address, Amount};

// ============================================================================
// Test helpers
// ============================================================================

const SUPPLY: Amount = 1_000_000_000_000;

fn test_address(n: u8) -> Address {
    let mut addr = [0u8; 32];
    addr[0] = n;
    Address::new(addr)
}

/// Ledger with the full supply held by `test_address(0)`, plus the first
/// five accounts.
fn deploy() -> (Ledger, Vec<Address>) {
    let accounts: Vec<Address> = (0..5).map(test_address).collect();
    (Ledger::new(accounts[0], SUPPLY), accounts)
}

// ============================================================================
// Approval semantics
// ============================================================================

#[test]
fn test_initial_approval_is_zero() {
    let (ledger, accounts) = deploy();

    for idx in 0..5 {
        assert_eq!(ledger.allowance(&accounts[0], &accounts[idx]), 0);
    }
}

#[test]
fn test_approve() {
    let (mut ledger, accounts) = deploy();

    ledger.approve(&accounts[0], &accounts[1], 10_000_000_000).unwrap();

    assert_eq!(ledger.allowance(&accounts[0], &accounts[1]), 10_000_000_000);
}

#[test]
fn test_modify_approve() {
    let (mut ledger, accounts) = deploy();

    ledger.approve(&accounts[0], &accounts[1], 10_000_000_000).unwrap();
    ledger.approve(&accounts[0], &accounts[1], 12_345_678).unwrap();

    assert_eq!(ledger.allowance(&accounts[0], &accounts[1]), 12_345_678);
}

#[test]
fn test_revoke_approve() {
    let (mut ledger, accounts) = deploy();

    ledger.approve(&accounts[0], &accounts[1], 10_000_000_000).unwrap();
    ledger.approve(&accounts[0], &accounts[1], 0).unwrap();

    assert_eq!(ledger.allowance(&accounts[0], &accounts[1]), 0);
}

#[test]
fn test_approve_self() {
    let (mut ledger, accounts) = deploy();

    ledger.approve(&accounts[0], &accounts[0], 10_000_000_000).unwrap();

    assert_eq!(ledger.allowance(&accounts[0], &accounts[0]), 10_000_000_000);
}

#[test]
fn test_only_affects_target() {
    let (mut ledger, accounts) = deploy();

    ledger.approve(&accounts[0], &accounts[1], 10_000_000_000).unwrap();

    // Reverse pair and every other spender stay untouched.
    assert_eq!(ledger.allowance(&accounts[1], &accounts[0]), 0);
    assert_eq!(ledger.allowance(&accounts[0], &accounts[2]), 0);
}

#[test]
fn test_approve_succeeds_with_event_payload() {
    let (mut ledger, accounts) = deploy();

    let event = ledger.approve(&accounts[0], &accounts[1], 10_000_000_000).unwrap();

    assert_eq!(
        event,
        TokenEvent::Approval {
            owner: accounts[0],
            spender: accounts[1],
            amount: 10_000_000_000,
        }
    );
}

#[test]
fn test_approval_event_fires_exactly_once() {
    let (mut ledger, accounts) = deploy();
    let listener = RecordingListener::new();
    ledger.subscribe(Box::new(listener.clone()));

    ledger.approve(&accounts[0], &accounts[1], 10_000_000_000).unwrap();

    let events = listener.events();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0],
        TokenEvent::Approval {
            owner: accounts[0],
            spender: accounts[1],
            amount: 10_000_000_000,
        }
    );
}

#[test]
fn test_approval_event_carries_new_value_not_delta() {
    let (mut ledger, accounts) = deploy();
    let listener = RecordingListener::new();
    ledger.subscribe(Box::new(listener.clone()));

    ledger.approve(&accounts[0], &accounts[1], 500).unwrap();
    ledger.approve(&accounts[0], &accounts[1], 200).unwrap();

    let events = listener.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].amount(), 200);
}

#[test]
fn test_over_approval_is_legal() {
    let (mut ledger, accounts) = deploy();
    let balance = ledger.balance_of(&accounts[0]);

    ledger.approve(&accounts[0], &accounts[1], balance * 10).unwrap();

    assert_eq!(ledger.allowance(&accounts[0], &accounts[1]), balance * 10);
}

#[test]
fn test_approve_touches_no_balances() {
    let (mut ledger, accounts) = deploy();
    let sender_balance = ledger.balance_of(&accounts[0]);

    ledger.approve(&accounts[0], &accounts[1], 10_000_000_000).unwrap();

    assert_eq!(ledger.balance_of(&accounts[0]), sender_balance);
    assert_eq!(ledger.balance_of(&accounts[1]), 0);
    assert_eq!(ledger.total_supply(), SUPPLY);
    assert!(ledger.verify_invariants().is_ok());
}
