//! # Core Domain Entities
//!
//! Defines the entities mirrored from the crowdfunding ledger plus the
//! wallet-session snapshot.
//!
//! ## Clusters
//!
//! - **Ledger**: `Campaign`, `ContributorRecord`, `CampaignDraft`
//! - **Session**: `WalletSnapshot`, `ChainId`

use serde::{Deserialize, Serialize};

// Re-export the chain primitives used across all crates.
pub use primitive_types::{H160, H256, U256};

/// A 20-byte ledger account address.
pub type Address = H160;

/// A chain identifier as reported by the signing agent.
pub type ChainId = u64;

/// A transaction hash returned by ledger write operations.
pub type TxHash = H256;

// =============================================================================
// CLUSTER A: THE LEDGER
// =============================================================================

/// A crowdfunding campaign as held by the ledger.
///
/// Read-only to the client: every instance is a snapshot copy taken during
/// one fetch cycle. `id` is monotonic, unique, and stable for the lifetime
/// of the campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Ledger-assigned identifier.
    pub id: u64,
    /// Campaign title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Address of the campaign creator.
    pub creator: Address,
    /// Funding goal in the smallest unit.
    pub goal: U256,
    /// Deadline as seconds since the Unix epoch.
    pub deadline: u64,
    /// Total contributed so far, in the smallest unit.
    pub total_raised: U256,
    /// Whether the creator has withdrawn the funds.
    pub withdrawn: bool,
    /// Number of contribution rows recorded by the ledger.
    pub contributor_count: u64,
}

impl Campaign {
    /// Create a fresh campaign snapshot with nothing raised yet.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        creator: Address,
        goal: U256,
        deadline: u64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            creator,
            goal,
            deadline,
            total_raised: U256::zero(),
            withdrawn: false,
            contributor_count: 0,
        }
    }
}

/// One contribution row for a campaign.
///
/// Rows are ordered by ledger insertion; a repeat contributor may appear as
/// separate or merged rows depending on ledger semantics, so rows are
/// treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRecord {
    /// Contributor address.
    pub address: Address,
    /// Contributed amount in the smallest unit.
    pub amount: U256,
}

/// Caller-supplied fields for creating a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDraft {
    /// Campaign title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Funding goal in the smallest unit.
    pub goal: U256,
    /// Deadline as seconds since the Unix epoch.
    pub deadline: u64,
}

// =============================================================================
// CLUSTER B: THE SESSION
// =============================================================================

/// The wallet identity as of the most recent silent check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WalletSnapshot {
    /// Currently authorized address, if any.
    pub address: Option<Address>,
    /// Chain the agent is pointed at, if known.
    pub chain_id: Option<ChainId>,
}

impl WalletSnapshot {
    /// Snapshot with no identity and no chain (agent absent or locked).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether an address is currently authorized.
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}
