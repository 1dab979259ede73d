//! Ledger State and Transition Logic
//!
//! The ledger owns two maps (balances, allowances) and a fixed total
//! supply. Three operations mutate them: [`Ledger::transfer`],
//! [`Ledger::approve`] and [`Ledger::transfer_from`]. Each call either
//! completes fully (all effects plus exactly one event) or fails with no
//! effect at all.
//!
//! # Invariants
//!
//! - `total_supply == Σ balances[*]` at every observable point
//! - Balances never go negative (enforced before any write)
//! - An allowance entry is touched only by operations naming that exact
//!   (owner, spender) pair

use std::collections::HashMap;

use lib_types::{Address, Amount};

use crate::errors::{LedgerError, LedgerResult};
use crate::events::{EventPublisher, TokenEvent, TokenEventListener};
use crate::genesis::{GenesisParams, TokenMetadata};

// =============================================================================
// LEDGER STATE
// =============================================================================

/// The token ledger
///
/// Each instance is fully independent: one per deployment, or one per test,
/// with no shared state between instances.
///
/// Not thread-safe internally. For concurrent access wrap it in
/// [`SharedLedger`](crate::shared::SharedLedger).
#[derive(Debug)]
pub struct Ledger {
    /// Display-only metadata
    metadata: TokenMetadata,
    /// Account balances; absent accounts hold zero
    balances: HashMap<Address, Amount>,
    /// Remaining allowances: owner -> spender -> amount
    allowances: HashMap<Address, HashMap<Address, Amount>>,
    /// Total supply, fixed at genesis
    total_supply: Amount,
    /// Optional second deployment account; recorded, never privileged
    operator: Option<Address>,
    /// Event fan-out for successful mutations
    publisher: EventPublisher,
}

impl Ledger {
    /// Create a ledger with the full supply credited to `initial_holder`.
    pub fn new(initial_holder: Address, supply: Amount) -> Self {
        Self::deploy(GenesisParams {
            metadata: TokenMetadata::default(),
            initial_holder,
            operator: None,
            supply,
        })
    }

    /// Create a ledger from deployment parameters.
    pub fn deploy(params: GenesisParams) -> Self {
        let mut balances = HashMap::new();
        balances.insert(params.initial_holder, params.supply);

        tracing::debug!(
            "Ledger deployed: {} ({}) supply {} to {}",
            params.metadata.name,
            params.metadata.symbol,
            params.supply,
            params.initial_holder
        );

        Self {
            metadata: params.metadata,
            balances,
            allowances: HashMap::new(),
            total_supply: params.supply,
            operator: params.operator,
            publisher: EventPublisher::new(),
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Human-readable token name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Token symbol
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Number of decimal places (display only)
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// The second deployment account, if one was recorded
    pub fn operator(&self) -> Option<Address> {
        self.operator
    }

    /// The fixed total supply
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Get remaining allowance for a spender
    ///
    /// `allowance(a, a)` is a legitimate, independently tracked entry.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Subscribe an observer to this ledger's events
    pub fn subscribe(&self, listener: Box<dyn TokenEventListener>) {
        self.publisher.subscribe(listener);
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Move `amount` from `caller`'s balance to `to`'s balance.
    ///
    /// A zero `amount` succeeds and still emits. `caller == to` nets to no
    /// balance change.
    ///
    /// # Errors
    /// - [`LedgerError::InsufficientBalance`] if `caller` holds less than
    ///   `amount`
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: Amount,
    ) -> LedgerResult<TokenEvent> {
        self.move_balance(caller, to, amount)?;

        tracing::debug!("Transfer: {} -> {} amount {}", caller, to, amount);

        let event = TokenEvent::Transfer {
            from: *caller,
            to: *to,
            amount,
        };
        self.publisher.publish(&event);
        Ok(event)
    }

    /// Set the allowance of `spender` over `caller`'s balance.
    ///
    /// Overwrites any prior value; zero revokes. An allowance may exceed the
    /// owner's balance (checked only at spend time). No balance is touched,
    /// and no other (owner, spender) pair is affected.
    pub fn approve(
        &mut self,
        caller: &Address,
        spender: &Address,
        amount: Amount,
    ) -> LedgerResult<TokenEvent> {
        self.allowances
            .entry(*caller)
            .or_insert_with(HashMap::new)
            .insert(*spender, amount);

        tracing::debug!("Approval: {} => {} amount {}", caller, spender, amount);

        let event = TokenEvent::Approval {
            owner: *caller,
            spender: *spender,
            amount,
        };
        self.publisher.publish(&event);
        Ok(event)
    }

    /// Spend `amount` out of `from`'s balance on the authority of `caller`'s
    /// allowance.
    ///
    /// On success the allowance is always decremented, even for
    /// `from == to` where the balances net out. The caller's own balance is
    /// never touched unless the caller is a party to the movement. The
    /// emitted event reports `from`/`to`, not the caller.
    ///
    /// # Errors
    /// - [`LedgerError::InsufficientAllowance`] if the remaining allowance
    ///   for (`from`, `caller`) is below `amount`
    /// - [`LedgerError::InsufficientBalance`] if `from` holds less than
    ///   `amount`
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> LedgerResult<TokenEvent> {
        let allowed = self.allowance(from, caller);
        let remaining = allowed
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance {
                available: allowed,
                required: amount,
            })?;

        self.move_balance(from, to, amount)?;
        self.allowances
            .entry(*from)
            .or_insert_with(HashMap::new)
            .insert(*caller, remaining);

        tracing::debug!(
            "TransferFrom: {} -> {} amount {} (spender {}, remaining allowance {})",
            from,
            to,
            amount,
            caller,
            remaining
        );

        let event = TokenEvent::Transfer {
            from: *from,
            to: *to,
            amount,
        };
        self.publisher.publish(&event);
        Ok(event)
    }

    /// Stage and commit a balance movement.
    ///
    /// Both new balances are computed from a pre-write snapshot; every
    /// failure exit happens before the first write. `to` is written last,
    /// so for `from == to` the commit restores the original balance and the
    /// movement nets to zero.
    fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        let from_balance = self.balance_of(from);
        let debited = from_balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                available: from_balance,
                required: amount,
            })?;
        let credited = if from == to {
            from_balance
        } else {
            self.balance_of(to)
                .checked_add(amount)
                .ok_or(LedgerError::Overflow)?
        };

        self.balances.insert(*from, debited);
        self.balances.insert(*to, credited);
        Ok(())
    }

    // =========================================================================
    // INVARIANT VERIFICATION
    // =========================================================================

    /// Check the conservation invariant: `total_supply == Σ balances[*]`.
    pub fn verify_invariants(&self) -> LedgerResult<()> {
        let sum_balances: Amount = self.balances.values().sum();
        if self.total_supply != sum_balances {
            return Err(LedgerError::ConservationViolated(format!(
                "total_supply {} != sum(balances) {}",
                self.total_supply, sum_balances
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
