//! # Gateway Fetchers
//!
//! [`Fetch`] implementations backing each cached view. Contributor rows
//! are assembled by walking `contributor_at` over the campaign's current
//! row count.

use async_trait::async_trait;
use cr_ledger_gateway::LedgerGateway;
use cr_poll_cache::Fetch;
use shared_types::{Campaign, ClientError, ContributorRecord};
use std::sync::Arc;

pub(crate) struct ListFetcher {
    pub gateway: Arc<dyn LedgerGateway>,
}

#[async_trait]
impl Fetch<(), Vec<Campaign>> for ListFetcher {
    async fn fetch(&self, _key: &()) -> Result<Vec<Campaign>, ClientError> {
        self.gateway.campaigns().await
    }
}

pub(crate) struct DetailFetcher {
    pub gateway: Arc<dyn LedgerGateway>,
}

#[async_trait]
impl Fetch<u64, Campaign> for DetailFetcher {
    async fn fetch(&self, id: &u64) -> Result<Campaign, ClientError> {
        self.gateway.campaign(*id).await
    }
}

pub(crate) struct ContributorFetcher {
    pub gateway: Arc<dyn LedgerGateway>,
}

#[async_trait]
impl Fetch<u64, Vec<ContributorRecord>> for ContributorFetcher {
    async fn fetch(&self, id: &u64) -> Result<Vec<ContributorRecord>, ClientError> {
        let campaign = self.gateway.campaign(*id).await?;
        let mut rows = Vec::with_capacity(campaign.contributor_count as usize);
        for index in 0..campaign.contributor_count {
            rows.push(self.gateway.contributor_at(*id, index).await?);
        }
        Ok(rows)
    }
}
