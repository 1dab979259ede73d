//! Fungible-Token Ledger
//!
//! This crate defines the token ledger: balance accounting, allowance
//! accounting, and the three operations that mutate them.
//!
//! Caller authentication is enforced by whatever runtime hosts the ledger;
//! every operation receives an already-authenticated caller account.
//!
//! # Key Types
//!
//! - [`Ledger`]: ledger state and its state-transition logic
//! - [`SharedLedger`]: serialized concurrent access to one ledger
//! - [`GenesisParams`]: deployment configuration
//! - [`TokenEvent`]: notification emitted on every successful mutation
//!
//! # Execution
//!
//! Use [`Ledger::transfer`], [`Ledger::approve`] and
//! [`Ledger::transfer_from`] to execute state transitions with full
//! validation.

pub mod errors;
pub mod events;
pub mod genesis;
pub mod ledger;
pub mod shared;

pub use errors::{LedgerError, LedgerResult};
pub use events::{EventPublisher, RecordingListener, TokenEvent, TokenEventListener};
pub use genesis::{GenesisParams, TokenMetadata};
pub use ledger::Ledger;
pub use shared::SharedLedger;
