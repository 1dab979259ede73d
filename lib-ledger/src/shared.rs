//! Serialized Concurrent Access
//!
//! [`Ledger`] is not thread-safe internally. `SharedLedger` wraps one
//! ledger in `std::sync::RwLock` so mutations execute in a single global
//! order, each as one indivisible step, while queries read a consistent
//! snapshot. No operation blocks on I/O or suspends while holding the lock.

use std::sync::{Arc, RwLock};

use lib_types::{Address, Amount};

use crate::errors::LedgerResult;
use crate::events::{TokenEvent, TokenEventListener};
use crate::genesis::GenesisParams;
use crate::ledger::Ledger;

/// Cloneable handle to a ledger shared across threads
///
/// Clones refer to the same underlying ledger; independent ledgers need
/// independent `SharedLedger` values.
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    /// Wrap an existing ledger
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Deploy a fresh ledger behind a shared handle
    pub fn deploy(params: GenesisParams) -> Self {
        Self::new(Ledger::deploy(params))
    }

    // =========================================================================
    // QUERIES (read lock)
    // =========================================================================

    /// Get balance of an account
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.inner.read().unwrap().balance_of(account)
    }

    /// Get remaining allowance for a spender
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.inner.read().unwrap().allowance(owner, spender)
    }

    /// The fixed total supply
    pub fn total_supply(&self) -> Amount {
        self.inner.read().unwrap().total_supply()
    }

    /// Check the conservation invariant
    pub fn verify_invariants(&self) -> LedgerResult<()> {
        self.inner.read().unwrap().verify_invariants()
    }

    /// Subscribe an observer to the ledger's events
    pub fn subscribe(&self, listener: Box<dyn TokenEventListener>) {
        self.inner.read().unwrap().subscribe(listener);
    }

    // =========================================================================
    // OPERATIONS (write lock)
    // =========================================================================

    /// Move `amount` from `caller` to `to`
    pub fn transfer(
        &self,
        caller: &Address,
        to: &Address,
        amount: Amount,
    ) -> LedgerResult<TokenEvent> {
        self.inner.write().unwrap().transfer(caller, to, amount)
    }

    /// Set the allowance of `spender` over `caller`'s balance
    pub fn approve(
        &self,
        caller: &Address,
        spender: &Address,
        amount: Amount,
    ) -> LedgerResult<TokenEvent> {
        self.inner.write().unwrap().approve(caller, spender, amount)
    }

    /// Spend `amount` out of `from`'s balance via `caller`'s allowance
    pub fn transfer_from(
        &self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> LedgerResult<TokenEvent> {
        self.inner
            .write()
            .unwrap()
            .transfer_from(caller, from, to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address(n: u8) -> Address {
        let mut addr = [0u8; 32];
        addr[0] = n;
        Address::new(addr)
    }

    #[test]
    fn test_clones_share_state() {
        let a = test_address(1);
        let b = test_address(2);
        let shared = SharedLedger::new(Ledger::new(a, 1_000));
        let clone = shared.clone();

        shared.transfer(&a, &b, 300).unwrap();

        assert_eq!(clone.balance_of(&a), 700);
        assert_eq!(clone.balance_of(&b), 300);
    }

    #[test]
    fn test_operations_serialize_across_threads() {
        let a = test_address(1);
        let b = test_address(2);
        let shared = SharedLedger::new(Ledger::new(a, 10_000));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = shared.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let _ = ledger.transfer(&a, &b, 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.balance_of(&a), 10_000 - 800);
        assert_eq!(shared.balance_of(&b), 800);
        assert!(shared.verify_invariants().is_ok());
    }
}
