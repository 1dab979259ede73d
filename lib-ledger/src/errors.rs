//! Ledger Errors

use lib_types::Amount;
use thiserror::Error;

/// Error during ledger operations
///
/// Every failure is terminal and synchronous: the triggering call mutates
/// nothing and emits nothing. Callers correct the request and re-issue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient balance: have {available}, need {required}")]
    InsufficientBalance { available: Amount, required: Amount },

    #[error("Insufficient allowance: have {available}, need {required}")]
    InsufficientAllowance { available: Amount, required: Amount },

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Conservation invariant violated: {0}")]
    ConservationViolated(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
