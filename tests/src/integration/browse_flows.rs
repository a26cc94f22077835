//! # Browse Flow Tests
//!
//! The browser view-model over the cached list: debounced search,
//! status facets, sorting, and collection statistics.

#[cfg(test)]
mod tests {
    use cr_campaign_view::{CampaignStatus, SortKey, StatusFilter};
    use cr_client_runtime::{CampaignBrowser, CampaignClient, ClientConfig};
    use cr_ledger_gateway::{LedgerGateway, MockLedger};
    use shared_types::{unit_scale, Address, Campaign, U256};
    use std::sync::Arc;
    use tokio::time::Duration;

    const NOW: u64 = 1_700_000_000;

    fn eth(n: u64) -> U256 {
        U256::from(n) * unit_scale()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    fn seeded_browser() -> (Arc<MockLedger>, Arc<CampaignClient>, CampaignBrowser) {
        let ledger = Arc::new(MockLedger::new(Address::repeat_byte(0xAB)));

        let mut garden = Campaign::new(
            0,
            "Community Garden",
            "Raised beds and a tool shed",
            Address::repeat_byte(0x01),
            eth(10),
            NOW + 86_400,
        );
        garden.total_raised = eth(4);
        ledger.seed(garden);

        let mut mural = Campaign::new(
            1,
            "Harbor Mural",
            "Paint the old pier wall",
            Address::repeat_byte(0x02),
            eth(5),
            NOW + 3_600,
        );
        mural.total_raised = eth(5);
        ledger.seed(mural);

        let client = CampaignClient::new(
            Arc::clone(&ledger) as Arc<dyn LedgerGateway>,
            ClientConfig::for_testing(),
        );
        let browser = CampaignBrowser::new(Arc::clone(&client));
        (ledger, client, browser)
    }

    #[tokio::test(start_paused = true)]
    async fn test_browser_view_reflects_the_snapshot() {
        let (_, _, browser) = seeded_browser();
        browser.refresh().await.unwrap();

        let view = browser.view(NOW);
        assert_eq!(view.len(), 2);
        // Default sort: recent first.
        assert_eq!(view[0].campaign.id, 1);
        assert_eq!(view[0].status, CampaignStatus::GoalReached);
        assert_eq!(view[1].progress_pct, 40);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_apply_one_search() {
        let (_, _, browser) = seeded_browser();
        browser.refresh().await.unwrap();

        let window = ClientConfig::for_testing().debounce_window;
        for keystroke in ["m", "mu", "mur", "mural"] {
            browser.set_search(keystroke);
            tokio::time::advance(window / 3).await;
        }
        // Before the window lapses the full view still shows.
        assert_eq!(browser.view(NOW).len(), 2);

        tokio::time::advance(window * 2).await;
        let view = browser.view(NOW);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].campaign.title, "Harbor Mural");
        assert_eq!(browser.query().search, "mural");
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_facet_and_sort_take_effect_immediately() {
        let (_, _, browser) = seeded_browser();
        browser.refresh().await.unwrap();

        browser.set_status(StatusFilter::Active);
        let view = browser.view(NOW);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].campaign.id, 0);

        browser.set_status(StatusFilter::All);
        browser.set_sort(SortKey::MostFunded);
        let ids: Vec<u64> = browser.view(NOW).iter().map(|v| v.campaign.id).collect();
        assert_eq!(ids, vec![1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_filters_restores_the_full_view() {
        let (_, _, browser) = seeded_browser();
        browser.refresh().await.unwrap();

        let window = ClientConfig::for_testing().debounce_window;
        browser.set_search("mural");
        browser.set_status(StatusFilter::GoalReached);
        tokio::time::advance(window * 2).await;
        assert_eq!(browser.view(NOW).len(), 1);

        browser.clear_filters();
        tokio::time::advance(window * 2).await;
        assert_eq!(browser.view(NOW).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_cover_the_unfiltered_snapshot() {
        let (_, _, browser) = seeded_browser();
        browser.refresh().await.unwrap();
        browser.set_status(StatusFilter::Withdrawn);

        let stats = browser.stats(NOW);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 1);
        assert!((stats.total_raised - 9.0).abs() < 1e-9);
        // Mean of 40% and 100%.
        assert!((stats.avg_funding_pct - 70.0).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_ledger_yields_empty_view_and_zero_stats() {
        let ledger = Arc::new(MockLedger::new(Address::repeat_byte(0xAB)));
        let client = CampaignClient::new(
            Arc::clone(&ledger) as Arc<dyn LedgerGateway>,
            ClientConfig::for_testing(),
        );
        let browser = CampaignBrowser::new(Arc::clone(&client));
        browser.refresh().await.unwrap();

        for status in [StatusFilter::All, StatusFilter::Active, StatusFilter::Ended] {
            browser.set_status(status);
            assert!(browser.view(NOW).is_empty());
        }
        let stats = browser.stats(NOW);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.active, 0);
        assert_eq!(stats.total_raised, 0.0);
        assert_eq!(stats.avg_funding_pct, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_browser_polling_tracks_ledger_writes() {
        let (ledger, _, browser) = seeded_browser();
        settle().await;

        ledger
            .contribute(0, eth(6))
            .await
            .unwrap()
            .confirmed()
            .await
            .unwrap();
        tokio::time::advance(ClientConfig::for_testing().list_refresh).await;
        settle().await;

        let view = browser.view(NOW);
        let garden = view.iter().find(|v| v.campaign.id == 0).unwrap();
        assert_eq!(garden.campaign.total_raised, eth(10));
        assert_eq!(garden.status, CampaignStatus::GoalReached);
    }
}
