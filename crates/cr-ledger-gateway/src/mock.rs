//! # Mock Ledger Adapter
//!
//! In-memory [`LedgerGateway`] implementation for tests and local
//! development: scripted failures, per-operation fetch counters, and
//! simulated confirmation latency.

use crate::ports::{LedgerGateway, PendingTx, TxReceipt};
use async_trait::async_trait;
use shared_types::{Address, Campaign, CampaignDraft, ClientError, ContributorRecord, TxHash, U256};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tokio::time::Duration;

#[derive(Default)]
struct LedgerState {
    campaigns: Vec<Campaign>,
    contributions: Vec<Vec<ContributorRecord>>,
}

impl LedgerState {
    fn campaign_mut(&mut self, id: u64) -> Result<&mut Campaign, ClientError> {
        self.campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ClientError::NotFound(id))
    }
}

/// Scriptable in-memory ledger.
pub struct MockLedger {
    caller: Address,
    state: Arc<Mutex<LedgerState>>,
    block_number: Arc<AtomicU64>,
    read_delay: Duration,
    confirm_delay: Duration,
    fail_reads: AtomicBool,
    fail_submissions: AtomicBool,
    reject_confirmations: AtomicBool,
    list_fetches: AtomicUsize,
    detail_fetches: AtomicUsize,
    contributor_fetches: AtomicUsize,
}

impl MockLedger {
    /// Create an empty ledger whose write operations act as `caller`.
    pub fn new(caller: Address) -> Self {
        Self {
            caller,
            state: Arc::new(Mutex::new(LedgerState::default())),
            block_number: Arc::new(AtomicU64::new(0)),
            read_delay: Duration::from_millis(5),
            confirm_delay: Duration::from_millis(20),
            fail_reads: AtomicBool::new(false),
            fail_submissions: AtomicBool::new(false),
            reject_confirmations: AtomicBool::new(false),
            list_fetches: AtomicUsize::new(0),
            detail_fetches: AtomicUsize::new(0),
            contributor_fetches: AtomicUsize::new(0),
        }
    }

    /// Seed a campaign directly, bypassing the transaction path.
    pub fn seed(&self, campaign: Campaign) {
        let mut state = self.lock_state();
        state.contributions.push(Vec::new());
        state.campaigns.push(campaign);
    }

    /// Make all reads fail until switched back.
    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    /// Make write submissions fail before a handle is issued.
    pub fn fail_submissions(&self, on: bool) {
        self.fail_submissions.store(on, Ordering::SeqCst);
    }

    /// Make submitted transactions resolve as rejected.
    pub fn reject_confirmations(&self, on: bool) {
        self.reject_confirmations.store(on, Ordering::SeqCst);
    }

    /// Number of `campaigns` list fetches served or attempted.
    pub fn list_fetch_count(&self) -> usize {
        self.list_fetches.load(Ordering::SeqCst)
    }

    /// Number of single-campaign fetches served or attempted.
    pub fn detail_fetch_count(&self) -> usize {
        self.detail_fetches.load(Ordering::SeqCst)
    }

    /// Number of contributor-row fetches served or attempted.
    pub fn contributor_fetch_count(&self) -> usize {
        self.contributor_fetches.load(Ordering::SeqCst)
    }

    fn lock_state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn simulate_read(&self) -> Result<(), ClientError> {
        tokio::time::sleep(self.read_delay).await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ClientError::NetworkFailure("ledger unreachable".to_string()));
        }
        Ok(())
    }

    fn fresh_tx_hash() -> TxHash {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(uuid::Uuid::new_v4().as_bytes());
        bytes[16..].copy_from_slice(uuid::Uuid::new_v4().as_bytes());
        TxHash::from(bytes)
    }

    /// Issue a handle and apply `effect` after the confirmation delay.
    fn submit<E>(&self, effect: E) -> Result<PendingTx, ClientError>
    where
        E: FnOnce(&mut LedgerState) -> Result<(), ClientError> + Send + 'static,
    {
        if self.fail_submissions.load(Ordering::SeqCst) {
            return Err(ClientError::NetworkFailure(
                "ledger rejected the submission".to_string(),
            ));
        }

        let tx_hash = Self::fresh_tx_hash();
        let (done_tx, done_rx) = oneshot::channel();
        let state = Arc::clone(&self.state);
        let block_number = Arc::clone(&self.block_number);
        let reject = self.reject_confirmations.load(Ordering::SeqCst);
        let delay = self.confirm_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = if reject {
                Err(ClientError::NetworkFailure("execution reverted".to_string()))
            } else {
                let mut state = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                effect(&mut state).map(|()| TxReceipt {
                    tx_hash,
                    block_number: block_number.fetch_add(1, Ordering::SeqCst) + 1,
                })
            };
            if done_tx.send(result).is_err() {
                tracing::debug!(%tx_hash, "confirmation receiver dropped");
            }
        });

        Ok(PendingTx::new(tx_hash, done_rx))
    }
}

#[async_trait]
impl LedgerGateway for MockLedger {
    async fn campaign(&self, id: u64) -> Result<Campaign, ClientError> {
        self.detail_fetches.fetch_add(1, Ordering::SeqCst);
        self.simulate_read().await?;
        let state = self.lock_state();
        state
            .campaigns
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ClientError::NotFound(id))
    }

    async fn campaigns(&self) -> Result<Vec<Campaign>, ClientError> {
        self.list_fetches.fetch_add(1, Ordering::SeqCst);
        self.simulate_read().await?;
        Ok(self.lock_state().campaigns.clone())
    }

    async fn contributor_at(
        &self,
        id: u64,
        index: u64,
    ) -> Result<ContributorRecord, ClientError> {
        self.contributor_fetches.fetch_add(1, Ordering::SeqCst);
        self.simulate_read().await?;
        let state = self.lock_state();
        let position = state
            .campaigns
            .iter()
            .position(|c| c.id == id)
            .ok_or(ClientError::NotFound(id))?;
        state.contributions[position]
            .get(index as usize)
            .cloned()
            .ok_or_else(|| {
                ClientError::ValidationFailure(format!(
                    "contributor index {index} out of range for campaign {id}"
                ))
            })
    }

    async fn create_campaign(&self, draft: CampaignDraft) -> Result<PendingTx, ClientError> {
        let creator = self.caller;
        self.submit(move |state| {
            let id = state.campaigns.len() as u64;
            state.contributions.push(Vec::new());
            state.campaigns.push(Campaign::new(
                id,
                draft.title,
                draft.description,
                creator,
                draft.goal,
                draft.deadline,
            ));
            Ok(())
        })
    }

    async fn contribute(&self, id: u64, amount: U256) -> Result<PendingTx, ClientError> {
        let contributor = self.caller;
        self.submit(move |state| {
            let position = state
                .campaigns
                .iter()
                .position(|c| c.id == id)
                .ok_or(ClientError::NotFound(id))?;
            let rows = &mut state.contributions[position];
            // Repeat contributions from one address merge into a single row.
            match rows.iter_mut().find(|row| row.address == contributor) {
                Some(row) => row.amount += amount,
                None => rows.push(ContributorRecord {
                    address: contributor,
                    amount,
                }),
            }
            let count = rows.len() as u64;
            let campaign = &mut state.campaigns[position];
            campaign.total_raised += amount;
            campaign.contributor_count = count;
            Ok(())
        })
    }

    async fn withdraw_funds(&self, id: u64) -> Result<PendingTx, ClientError> {
        self.submit(move |state| {
            let campaign = state.campaign_mut(id)?;
            if campaign.withdrawn || campaign.total_raised < campaign.goal {
                return Err(ClientError::NetworkFailure(
                    "execution reverted: goal not reached".to_string(),
                ));
            }
            campaign.withdrawn = true;
            Ok(())
        })
    }

    async fn refund_contributors(&self, id: u64) -> Result<PendingTx, ClientError> {
        self.submit(move |state| {
            let position = state
                .campaigns
                .iter()
                .position(|c| c.id == id)
                .ok_or(ClientError::NotFound(id))?;
            let campaign = &mut state.campaigns[position];
            if campaign.total_raised >= campaign.goal {
                return Err(ClientError::NetworkFailure(
                    "execution reverted: goal was reached".to_string(),
                ));
            }
            campaign.total_raised = U256::zero();
            campaign.contributor_count = 0;
            state.contributions[position].clear();
            Ok(())
        })
    }
}
