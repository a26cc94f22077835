//! # Session Flow Tests
//!
//! The wallet session against the scripted agent, wired next to the
//! campaign client the way a presentation layer consumes both.

#[cfg(test)]
mod tests {
    use cr_client_runtime::{CampaignClient, ClientConfig};
    use cr_ledger_gateway::{LedgerGateway, MockLedger};
    use cr_wallet_session::{
        AgentEvent, IntentStore, MemoryIntentStore, MockAgent, SessionState, SigningAgent,
        WalletSession,
    };
    use shared_types::{unit_scale, Address, Campaign, U256};
    use std::sync::Arc;
    use tokio::time::Duration;

    const NOW: u64 = 1_700_000_000;
    const INTERVAL: Duration = Duration::from_secs(60);

    fn eth(n: u64) -> U256 {
        U256::from(n) * unit_scale()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    fn session(agent: &Arc<MockAgent>, intent: &Arc<MemoryIntentStore>) -> WalletSession {
        WalletSession::new(
            Some(Arc::clone(agent) as Arc<dyn SigningAgent>),
            Arc::clone(intent) as Arc<dyn IntentStore>,
            INTERVAL,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_intent_survives_across_session_instances() {
        let agent = Arc::new(MockAgent::new());
        let intent = Arc::new(MemoryIntentStore::new());

        let creator = Address::repeat_byte(0x42);
        agent.grant(creator);
        {
            let first = session(&agent, &intent);
            first.connect().await.unwrap();
            assert!(intent.get());
        }

        // A fresh session over the same store mounts with intent set and
        // silently picks the identity back up, without prompting.
        let prompts_before = agent.prompt_count();
        let second = session(&agent, &intent);
        settle().await;
        assert_eq!(second.address(), Some(creator));
        assert_eq!(agent.prompt_count(), prompts_before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_revocation_mid_session_disconnects_everywhere() {
        let agent = Arc::new(MockAgent::new());
        let intent = Arc::new(MemoryIntentStore::new());
        let session = session(&agent, &intent);

        agent.grant(Address::repeat_byte(0x42));
        session.connect().await.unwrap();
        let mut identity = session.subscribe();

        agent.set_accounts(Vec::new());
        agent.emit(AgentEvent::AccountsChanged(Vec::new()));
        settle().await;

        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(!intent.get());
        // Subscribers converge on the cleared identity too.
        assert_eq!(identity.borrow_and_update().clone().unwrap().address, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_owner_gating_matches_session_identity() {
        let creator = Address::repeat_byte(0x42);
        let ledger = Arc::new(MockLedger::new(creator));
        let mut campaign = Campaign::new(
            0,
            "Community Garden",
            "Raised beds",
            creator,
            eth(10),
            NOW + 86_400,
        );
        campaign.total_raised = eth(10);
        ledger.seed(campaign);

        let client = CampaignClient::new(
            Arc::clone(&ledger) as Arc<dyn LedgerGateway>,
            ClientConfig::for_testing(),
        );
        let agent = Arc::new(MockAgent::new());
        let intent = Arc::new(MemoryIntentStore::new());
        let session = WalletSession::new(
            Some(Arc::clone(&agent) as Arc<dyn SigningAgent>),
            Arc::clone(&intent) as Arc<dyn IntentStore>,
            INTERVAL,
        );

        agent.grant(creator);
        session.connect().await.unwrap();

        // Presentation-style gating: the connected address owns the
        // campaign, the goal is reached, and nothing is withdrawn yet.
        let snapshot = client.refresh_campaign(0).await.unwrap();
        assert_eq!(session.address(), Some(snapshot.creator));
        assert!(snapshot.total_raised >= snapshot.goal);
        assert!(!snapshot.withdrawn);

        client.withdraw_funds(0).await.unwrap();
        settle().await;
        assert!(client.campaign(0).unwrap().withdrawn);
    }

    #[tokio::test(start_paused = true)]
    async fn test_agentless_embedding_stays_empty_without_errors() {
        let intent = Arc::new(MemoryIntentStore::new());
        let session = WalletSession::new(
            None,
            Arc::clone(&intent) as Arc<dyn IntentStore>,
            INTERVAL,
        );

        let snapshot = session.refresh().await.unwrap();
        assert_eq!(snapshot.address, None);
        assert_eq!(snapshot.chain_id, None);
        assert_eq!(session.state(), SessionState::Disconnected);
    }
}
