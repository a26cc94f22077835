//! # Gateway Ports
//!
//! The consumed ledger capability: typed reads over campaign state and
//! write operations returning awaitable transaction handles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Campaign, CampaignDraft, ClientError, ContributorRecord, TxHash, U256};
use tokio::sync::oneshot;

/// Receipt for a finalized write operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Hash of the finalized transaction.
    pub tx_hash: TxHash,
    /// Block the transaction landed in.
    pub block_number: u64,
}

/// Handle to a submitted but not yet finalized write operation.
///
/// The effect is durable only once [`PendingTx::confirmed`] returns `Ok`;
/// until then the client must not mutate any cached state on its behalf.
pub struct PendingTx {
    tx_hash: TxHash,
    done: oneshot::Receiver<Result<TxReceipt, ClientError>>,
}

impl PendingTx {
    /// Pair a transaction hash with the completion channel the adapter
    /// resolves on finalization.
    pub fn new(tx_hash: TxHash, done: oneshot::Receiver<Result<TxReceipt, ClientError>>) -> Self {
        Self { tx_hash, done }
    }

    /// Hash assigned at submission time.
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Suspend until the ledger finalizes (or rejects) the transaction.
    ///
    /// # Errors
    ///
    /// Returns the ledger's rejection, or `NetworkFailure` if the adapter
    /// dropped the transaction before resolving it.
    pub async fn confirmed(self) -> Result<TxReceipt, ClientError> {
        self.done.await.map_err(|_| {
            ClientError::NetworkFailure("transaction dropped before confirmation".to_string())
        })?
    }
}

/// The ledger's read/write interface.
///
/// Reads return snapshot copies in ledger order. Writes return a
/// [`PendingTx`]; authorization and business rules (goal-reached
/// requirements and the like) are enforced by the ledger, not here.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Fetch one campaign.
    ///
    /// # Errors
    /// - `NotFound` if the id is unknown
    async fn campaign(&self, id: u64) -> Result<Campaign, ClientError>;

    /// Fetch all campaigns, in ledger insertion order.
    async fn campaigns(&self) -> Result<Vec<Campaign>, ClientError>;

    /// Fetch one contribution row; `index` runs `0..contributor_count`.
    async fn contributor_at(&self, id: u64, index: u64)
        -> Result<ContributorRecord, ClientError>;

    /// Submit a campaign creation.
    async fn create_campaign(&self, draft: CampaignDraft) -> Result<PendingTx, ClientError>;

    /// Submit a contribution to a campaign.
    async fn contribute(&self, id: u64, amount: U256) -> Result<PendingTx, ClientError>;

    /// Submit a funds withdrawal for a campaign.
    async fn withdraw_funds(&self, id: u64) -> Result<PendingTx, ClientError>;

    /// Submit a refund of all contributors of a campaign.
    async fn refund_contributors(&self, id: u64) -> Result<PendingTx, ClientError>;
}
