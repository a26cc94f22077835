//! # Campaign Client
//!
//! Typed cache instances over the ledger gateway plus the validated write
//! path. A write mutates nothing locally; only a confirmed completion
//! invalidates (and refreshes) the affected keys, so a failed transaction
//! leaves displayed state untouched.

use crate::config::ClientConfig;
use crate::fetchers::{ContributorFetcher, DetailFetcher, ListFetcher};
use cr_ledger_gateway::{LedgerGateway, TxReceipt};
use cr_poll_cache::{PollCache, PollHandle};
use shared_types::{Campaign, CampaignDraft, ClientError, ContributorRecord, U256};
use std::sync::Arc;
use tokio::sync::watch;

type ListCache = PollCache<(), Vec<Campaign>, ListFetcher>;
type DetailCache = PollCache<u64, Campaign, DetailFetcher>;
type ContributorCache = PollCache<u64, Vec<ContributorRecord>, ContributorFetcher>;

/// Facade over the cached, continuously refreshed ledger view.
pub struct CampaignClient {
    gateway: Arc<dyn LedgerGateway>,
    list: Arc<ListCache>,
    detail: Arc<DetailCache>,
    contributors: Arc<ContributorCache>,
    config: ClientConfig,
}

impl CampaignClient {
    /// Wire the caches over a gateway.
    pub fn new(gateway: Arc<dyn LedgerGateway>, config: ClientConfig) -> Arc<Self> {
        let list = PollCache::new(
            ListFetcher {
                gateway: Arc::clone(&gateway),
            },
            config.list_refresh,
        );
        let detail = PollCache::new(
            DetailFetcher {
                gateway: Arc::clone(&gateway),
            },
            config.detail_refresh,
        );
        let contributors = PollCache::new(
            ContributorFetcher {
                gateway: Arc::clone(&gateway),
            },
            config.contributors_refresh,
        );
        Arc::new(Self {
            gateway,
            list,
            detail,
            contributors,
            config,
        })
    }

    /// Timing configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Last-known campaign list; triggers a background refresh when due.
    pub fn campaigns(&self) -> Option<Vec<Campaign>> {
        self.list.read(&())
    }

    /// Last-known snapshot of one campaign.
    pub fn campaign(&self, id: u64) -> Option<Campaign> {
        self.detail.read(&id)
    }

    /// Last-known contributor rows of one campaign.
    pub fn contributor_rows(&self, id: u64) -> Option<Vec<ContributorRecord>> {
        self.contributors.read(&id)
    }

    /// Refresh the list now (explicit "refresh" action).
    pub async fn refresh_campaigns(&self) -> Result<Vec<Campaign>, ClientError> {
        self.list.refresh(&()).await
    }

    /// Refresh one campaign now.
    pub async fn refresh_campaign(&self, id: u64) -> Result<Campaign, ClientError> {
        self.detail.refresh(&id).await
    }

    /// Refresh one campaign's contributor rows now.
    pub async fn refresh_contributors(
        &self,
        id: u64,
    ) -> Result<Vec<ContributorRecord>, ClientError> {
        self.contributors.refresh(&id).await
    }

    /// Watch the campaign list as snapshots are applied.
    pub fn subscribe_campaigns(&self) -> watch::Receiver<Option<Vec<Campaign>>> {
        self.list.subscribe(&())
    }

    /// Watch one campaign.
    pub fn subscribe_campaign(&self, id: u64) -> watch::Receiver<Option<Campaign>> {
        self.detail.subscribe(&id)
    }

    /// Watch one campaign's contributor rows.
    pub fn subscribe_contributors(
        &self,
        id: u64,
    ) -> watch::Receiver<Option<Vec<ContributorRecord>>> {
        self.contributors.subscribe(&id)
    }

    /// Start interval polling of the list. Drop the handle to stop.
    pub fn watch_campaigns(&self) -> PollHandle {
        self.list.spawn_poll(())
    }

    /// Start interval polling of one campaign.
    pub fn watch_campaign(&self, id: u64) -> PollHandle {
        self.detail.spawn_poll(id)
    }

    /// Start interval polling of one campaign's contributor rows.
    pub fn watch_contributors(&self, id: u64) -> PollHandle {
        self.contributors.spawn_poll(id)
    }

    /// Overwrite one campaign's cached snapshot optimistically. With
    /// `revalidate`, a real refresh reconciles it immediately after.
    pub fn optimistic_campaign(&self, campaign: Campaign, revalidate: bool) {
        let id = campaign.id;
        self.detail.mutate_local(&id, campaign, revalidate);
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    /// Create a campaign and await finalization, then refresh the list.
    ///
    /// `now` is the caller's clock (seconds since epoch), used only for
    /// edge validation of the deadline.
    ///
    /// # Errors
    ///
    /// - `ValidationFailure` for an empty title, a zero goal, or a deadline
    ///   not in the future
    /// - the gateway's submission or confirmation failure, in which case no
    ///   cached state changes
    pub async fn create_campaign(
        &self,
        draft: CampaignDraft,
        now: u64,
    ) -> Result<TxReceipt, ClientError> {
        validate_draft(&draft, now)?;
        let receipt = self.gateway.create_campaign(draft).await?.confirmed().await?;
        tracing::info!(tx_hash = %receipt.tx_hash, "campaign created");
        self.list.invalidate(&());
        self.list.spawn_refresh(());
        Ok(receipt)
    }

    /// Contribute to a campaign and await finalization, then refresh the
    /// affected views (detail, list, contributor rows).
    pub async fn contribute(&self, id: u64, amount: U256) -> Result<TxReceipt, ClientError> {
        if amount.is_zero() {
            return Err(ClientError::ValidationFailure(
                "contribution amount must be positive".to_string(),
            ));
        }
        let receipt = self.gateway.contribute(id, amount).await?.confirmed().await?;
        tracing::info!(campaign = id, tx_hash = %receipt.tx_hash, "contribution confirmed");
        self.invalidate_campaign_views(id, true);
        Ok(receipt)
    }

    /// Withdraw a campaign's funds and await finalization.
    pub async fn withdraw_funds(&self, id: u64) -> Result<TxReceipt, ClientError> {
        let receipt = self.gateway.withdraw_funds(id).await?.confirmed().await?;
        tracing::info!(campaign = id, tx_hash = %receipt.tx_hash, "withdrawal confirmed");
        self.invalidate_campaign_views(id, false);
        Ok(receipt)
    }

    /// Refund a campaign's contributors and await finalization.
    pub async fn refund_contributors(&self, id: u64) -> Result<TxReceipt, ClientError> {
        let receipt = self
            .gateway
            .refund_contributors(id)
            .await?
            .confirmed()
            .await?;
        tracing::info!(campaign = id, tx_hash = %receipt.tx_hash, "refund confirmed");
        self.invalidate_campaign_views(id, true);
        Ok(receipt)
    }

    /// Invalidate and refresh the views a confirmed write touched.
    fn invalidate_campaign_views(&self, id: u64, rows_changed: bool) {
        self.detail.invalidate(&id);
        self.detail.spawn_refresh(id);
        self.list.invalidate(&());
        self.list.spawn_refresh(());
        if rows_changed {
            self.contributors.invalidate(&id);
            self.contributors.spawn_refresh(id);
        }
    }
}

fn validate_draft(draft: &CampaignDraft, now: u64) -> Result<(), ClientError> {
    if draft.title.trim().is_empty() {
        return Err(ClientError::ValidationFailure(
            "title must not be empty".to_string(),
        ));
    }
    if draft.goal.is_zero() {
        return Err(ClientError::ValidationFailure(
            "goal must be positive".to_string(),
        ));
    }
    if draft.deadline <= now {
        return Err(ClientError::ValidationFailure(
            "deadline must be in the future".to_string(),
        ));
    }
    Ok(())
}
