//! Genesis Deployment Parameters
//!
//! A ledger is created exactly once, with the full supply credited to a
//! single initial holder. [`GenesisParams`] describes that deployment and
//! deserializes from configuration.

use lib_types::{Address, Amount};
use serde::{Deserialize, Serialize};

/// Display-only token metadata
///
/// Metadata MUST NOT affect balances, allowances or supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable token name
    pub name: String,
    /// Token symbol (e.g. "TST")
    pub symbol: String,
    /// Number of decimal places (display only)
    pub decimals: u8,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "Token".to_string(),
            symbol: "TKN".to_string(),
            decimals: 18,
        }
    }
}

/// Parameters for deploying a ledger
///
/// Inputs are trusted at this boundary; construction has no failure mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisParams {
    /// Display-only metadata
    #[serde(default)]
    pub metadata: TokenMetadata,
    /// Account credited with the full supply at genesis
    pub initial_holder: Address,
    /// Optional second deployment account. Recorded and queryable; holds no
    /// privileged mutating surface.
    #[serde(default)]
    pub operator: Option<Address>,
    /// Fixed total supply, immutable after genesis
    pub supply: Amount,
}
