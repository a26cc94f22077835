//! # Campaign Flow Tests
//!
//! End-to-end ledger → cache flows: writes confirm before anything is
//! invalidated, failed writes leave displayed state untouched, and
//! concurrent readers share one underlying fetch.

#[cfg(test)]
mod tests {
    use cr_client_runtime::{CampaignClient, ClientConfig};
    use cr_ledger_gateway::{LedgerGateway, MockLedger};
    use shared_types::{unit_scale, Address, Campaign, CampaignDraft, ClientError, U256};
    use std::sync::Arc;
    use tokio::time::Duration;

    const NOW: u64 = 1_700_000_000;

    fn eth(n: u64) -> U256 {
        U256::from(n) * unit_scale()
    }

    fn seeded() -> (Arc<MockLedger>, Arc<CampaignClient>) {
        let ledger = Arc::new(MockLedger::new(Address::repeat_byte(0xAB)));
        ledger.seed(Campaign::new(
            0,
            "Community Garden",
            "Raised beds for the neighborhood",
            Address::repeat_byte(0x01),
            eth(10),
            NOW + 86_400,
        ));
        let client = CampaignClient::new(
            Arc::clone(&ledger) as Arc<dyn LedgerGateway>,
            ClientConfig::for_testing(),
        );
        (ledger, client)
    }

    /// Let spawned refresh and confirmation tasks run under the paused
    /// clock.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_contribution_becomes_visible_after_confirmation() {
        let (_, client) = seeded();
        client.refresh_campaigns().await.unwrap();

        client.contribute(0, eth(3)).await.unwrap();
        settle().await;

        let list = client.campaigns().unwrap();
        assert_eq!(list[0].total_raised, eth(3));
        let rows = client.refresh_contributors(0).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, eth(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_write_leaves_displayed_state_untouched() {
        let (ledger, client) = seeded();
        client.refresh_campaigns().await.unwrap();

        ledger.reject_confirmations(true);
        let err = client.contribute(0, eth(3)).await.unwrap_err();
        assert!(matches!(err, ClientError::NetworkFailure(_)));
        settle().await;

        let list = client.campaigns().unwrap();
        assert!(list[0].total_raised.is_zero());
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_failures_never_reach_the_ledger() {
        let (ledger, client) = seeded();

        let draft = CampaignDraft {
            title: "   ".to_string(),
            description: String::new(),
            goal: eth(5),
            deadline: NOW + 100,
        };
        assert!(matches!(
            client.create_campaign(draft, NOW).await.unwrap_err(),
            ClientError::ValidationFailure(_)
        ));
        assert!(matches!(
            client.contribute(0, U256::zero()).await.unwrap_err(),
            ClientError::ValidationFailure(_)
        ));
        settle().await;
        assert_eq!(ledger.campaigns().await.unwrap().len(), 1);
        assert!(ledger.campaigns().await.unwrap()[0].total_raised.is_zero());
    }

    #[tokio::test(start_paused = true)]
    async fn test_created_campaign_appears_in_the_list() {
        let (_, client) = seeded();
        client.refresh_campaigns().await.unwrap();

        let draft = CampaignDraft {
            title: "Harbor Mural".to_string(),
            description: "Paint the old pier wall".to_string(),
            goal: eth(5),
            deadline: NOW + 86_400,
        };
        client.create_campaign(draft, NOW).await.unwrap();
        settle().await;

        let list = client.campaigns().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].title, "Harbor Mural");
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_list_refreshes_share_one_fetch() {
        let (ledger, client) = seeded();
        let (a, b) = tokio::join!(client.refresh_campaigns(), client.refresh_campaigns());
        assert_eq!(a.unwrap().len(), 1);
        assert_eq!(b.unwrap().len(), 1);
        assert_eq!(ledger.list_fetch_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_ledger_serves_stale_list() {
        let (ledger, client) = seeded();
        client.refresh_campaigns().await.unwrap();

        ledger.fail_reads(true);
        assert!(client.refresh_campaigns().await.is_err());
        // Passive readers keep the last good snapshot.
        assert_eq!(client.campaigns().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_polling_picks_up_external_writes() {
        let (ledger, client) = seeded();
        let _poll = client.watch_campaigns();
        settle().await;
        assert_eq!(client.campaigns().unwrap().len(), 1);

        // Another participant contributes directly on the ledger.
        ledger
            .contribute(0, eth(4))
            .await
            .unwrap()
            .confirmed()
            .await
            .unwrap();

        tokio::time::advance(ClientConfig::for_testing().list_refresh).await;
        settle().await;
        assert_eq!(client.campaigns().unwrap()[0].total_raised, eth(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_optimistic_detail_survives_until_reconciled() {
        let (ledger, client) = seeded();
        let real = client.refresh_campaign(0).await.unwrap();

        ledger.fail_reads(true);
        let mut hoped = real.clone();
        hoped.total_raised = eth(3);
        client.optimistic_campaign(hoped.clone(), true);
        settle().await;
        // Revalidation failed: the optimistic snapshot stays visible.
        assert_eq!(client.campaign(0).unwrap(), hoped);

        // A later successful fetch overwrites it with ledger truth.
        ledger.fail_reads(false);
        let reconciled = client.refresh_campaign(0).await.unwrap();
        assert!(reconciled.total_raised.is_zero());
        assert_eq!(client.campaign(0).unwrap(), reconciled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_read_of_unknown_campaign_stays_empty() {
        let (_, client) = seeded();
        assert!(matches!(
            client.refresh_campaign(99).await.unwrap_err(),
            ClientError::NotFound(99)
        ));
        assert_eq!(client.campaign(99), None);
    }
}
