//! # Campaign Browser
//!
//! The list view-model: holds the status filter and sort key, feeds search
//! input through the debouncer, and produces the ordered, filtered view
//! plus aggregate statistics from the current list snapshot.

use crate::client::CampaignClient;
use cr_campaign_view::{derive_view, CampaignQuery, CampaignView, CollectionStats, SortKey, StatusFilter};
use cr_poll_cache::{Debouncer, PollHandle};
use shared_types::{Campaign, ClientError};
use std::sync::{Arc, Mutex, MutexGuard};

/// Browsing state over the cached campaign list.
///
/// Holds the list's interval polling alive for its own lifetime; dropping
/// the browser cancels the poll and the debounce timer.
pub struct CampaignBrowser {
    client: Arc<CampaignClient>,
    query: Mutex<CampaignQuery>,
    search: Debouncer<String>,
    _poll: PollHandle,
}

impl CampaignBrowser {
    /// Start browsing: begins interval polling of the list.
    pub fn new(client: Arc<CampaignClient>) -> Self {
        let search = Debouncer::new(client.config().debounce_window);
        let poll = client.watch_campaigns();
        Self {
            client,
            query: Mutex::new(CampaignQuery::default()),
            search,
            _poll: poll,
        }
    }

    fn lock_query(&self) -> MutexGuard<'_, CampaignQuery> {
        self.query.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Submit a keystroke; it applies once the debounce window lapses.
    pub fn set_search(&self, input: impl Into<String>) {
        self.search.submit(input.into());
    }

    /// Switch the status facet. Takes effect immediately.
    pub fn set_status(&self, status: StatusFilter) {
        self.lock_query().status = status;
    }

    /// Switch the sort key. Takes effect immediately.
    pub fn set_sort(&self, sort: SortKey) {
        self.lock_query().sort = sort;
    }

    /// Reset search, status, and sort to their defaults.
    pub fn clear_filters(&self) {
        *self.lock_query() = CampaignQuery::default();
        self.search.submit(String::new());
    }

    /// The effective query: selected facets plus the applied (debounced)
    /// search value.
    pub fn query(&self) -> CampaignQuery {
        let mut query = self.lock_query().clone();
        if let Some(applied) = self.search.current() {
            query.search = applied;
        }
        query
    }

    /// The ordered, filtered, derived view of the current snapshot at
    /// `now` (seconds since epoch).
    pub fn view(&self, now: u64) -> Vec<CampaignView> {
        let snapshot = self.client.campaigns().unwrap_or_default();
        self.query()
            .apply(&snapshot, now)
            .iter()
            .map(|campaign| derive_view(campaign, now))
            .collect()
    }

    /// Aggregates over the full (unfiltered) snapshot at `now`.
    pub fn stats(&self, now: u64) -> CollectionStats {
        CollectionStats::compute(&self.client.campaigns().unwrap_or_default(), now)
    }

    /// Explicit refresh action.
    pub async fn refresh(&self) -> Result<Vec<Campaign>, ClientError> {
        self.client.refresh_campaigns().await
    }
}
