//! # Session Manager
//!
//! Connection identity as one cached key plus the event loop reacting to
//! agent notifications. All identity writes flow through the cache, so
//! subscribers observe a single ordered stream and the last write by
//! arrival order wins.

use crate::ports::{AgentEvent, IntentStore, SigningAgent};
use async_trait::async_trait;
use cr_poll_cache::{Fetch, PollCache};
use shared_types::{Address, ClientError, WalletSnapshot};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Silent identity check: currently authorized accounts plus the chain,
/// never a prompt. An absent agent reads as an empty identity.
struct IdentityFetcher {
    agent: Option<Arc<dyn SigningAgent>>,
}

#[async_trait]
impl Fetch<(), WalletSnapshot> for IdentityFetcher {
    async fn fetch(&self, _key: &()) -> Result<WalletSnapshot, ClientError> {
        let Some(agent) = &self.agent else {
            return Ok(WalletSnapshot::empty());
        };
        let accounts = agent.authorized_accounts().await?;
        let chain_id = agent.chain_id().await?;
        Ok(WalletSnapshot {
            address: accounts.first().copied(),
            chain_id: Some(chain_id),
        })
    }
}

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No identity check has completed yet.
    Unknown,
    /// An explicit connect call is awaiting the human.
    Connecting,
    /// An address is authorized.
    Connected(Address),
    /// Checked, and no address is authorized.
    Disconnected,
}

/// Wallet session state machine.
///
/// Owns exactly one agent event subscription for its lifetime; dropping
/// the session aborts the event loop and releases it.
pub struct WalletSession {
    agent: Option<Arc<dyn SigningAgent>>,
    intent: Arc<dyn IntentStore>,
    identity: Arc<PollCache<(), WalletSnapshot, IdentityFetcher>>,
    connecting: watch::Sender<bool>,
    listener: Option<JoinHandle<()>>,
}

impl WalletSession {
    /// Build a session against an optional agent and the injected intent
    /// store. Must be called within a runtime: the event loop is spawned
    /// here, and if persisted intent is set, one silent refresh is kicked
    /// off (never an authorization prompt).
    pub fn new(
        agent: Option<Arc<dyn SigningAgent>>,
        intent: Arc<dyn IntentStore>,
        refresh_interval: Duration,
    ) -> Self {
        let identity = PollCache::new(
            IdentityFetcher {
                agent: agent.clone(),
            },
            refresh_interval,
        );

        let listener = agent.as_ref().map(|agent| {
            Self::spawn_listener(agent.subscribe(), Arc::clone(&identity), Arc::clone(&intent))
        });

        if intent.get() {
            identity.spawn_refresh(());
        }

        Self {
            agent,
            intent,
            identity,
            connecting: watch::channel(false).0,
            listener,
        }
    }

    fn spawn_listener(
        mut events: broadcast::Receiver<AgentEvent>,
        identity: Arc<PollCache<(), WalletSnapshot, IdentityFetcher>>,
        intent: Arc<dyn IntentStore>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(AgentEvent::AccountsChanged(accounts)) if accounts.is_empty() => {
                        // External disconnect: drop identity now, then
                        // converge with a silent check.
                        intent.set(false);
                        identity.mutate_local(&(), WalletSnapshot::empty(), false);
                        if let Err(error) = identity.refresh(&()).await {
                            tracing::warn!(%error, "identity refresh after revocation failed");
                        }
                    }
                    Ok(event) => {
                        tracing::debug!(?event, "agent notification; refreshing identity");
                        if let Err(error) = identity.refresh(&()).await {
                            tracing::warn!(%error, "identity refresh failed");
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Dropped notifications must not strand the state:
                        // converge on the agent's current answer.
                        tracing::debug!(skipped, "agent events lagged; refreshing identity");
                        let _ = identity.refresh(&()).await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Explicitly connect: prompt for authorization, persist the intent,
    /// and refresh identity.
    ///
    /// # Errors
    ///
    /// - `AgentUnavailable` when no agent is present (no state change)
    /// - `AuthorizationDenied` or the agent's failure when the prompt is
    ///   declined; the session stays disconnected and never retries
    pub async fn connect(&self) -> Result<WalletSnapshot, ClientError> {
        let agent = self.agent.as_ref().ok_or(ClientError::AgentUnavailable)?;
        self.connecting.send_replace(true);
        let result = self.connect_inner(agent).await;
        self.connecting.send_replace(false);
        result
    }

    async fn connect_inner(
        &self,
        agent: &Arc<dyn SigningAgent>,
    ) -> Result<WalletSnapshot, ClientError> {
        agent.request_authorization().await?;
        self.intent.set(true);
        self.identity.refresh(&()).await
    }

    /// Local-only disconnect: clear the persisted intent and the address.
    /// The agent is not contacted and may still consider itself authorized.
    pub fn disconnect(&self) {
        self.intent.set(false);
        let chain_id = self.identity.peek(&()).and_then(|s| s.chain_id);
        self.identity.mutate_local(
            &(),
            WalletSnapshot {
                address: None,
                chain_id,
            },
            false,
        );
    }

    /// Reconnect: with persisted intent this behaves as [`connect`];
    /// otherwise only a silent refresh runs, picking up any pre-existing
    /// permission without prompting.
    ///
    /// [`connect`]: WalletSession::connect
    pub async fn reconnect(&self) -> Result<WalletSnapshot, ClientError> {
        if self.intent.get() {
            self.connect().await
        } else {
            self.identity.refresh(&()).await
        }
    }

    /// Silently refresh identity now.
    pub async fn refresh(&self) -> Result<WalletSnapshot, ClientError> {
        self.identity.refresh(&()).await
    }

    /// Last-known identity snapshot, if any check completed yet.
    pub fn snapshot(&self) -> Option<WalletSnapshot> {
        self.identity.peek(&())
    }

    /// Currently authorized address, if any.
    pub fn address(&self) -> Option<Address> {
        self.snapshot().and_then(|s| s.address)
    }

    /// Current state of the machine.
    pub fn state(&self) -> SessionState {
        if *self.connecting.borrow() {
            return SessionState::Connecting;
        }
        match self.identity.peek(&()) {
            None => SessionState::Unknown,
            Some(snapshot) => match snapshot.address {
                Some(address) => SessionState::Connected(address),
                None => SessionState::Disconnected,
            },
        }
    }

    /// Watch identity snapshots as they are applied.
    pub fn subscribe(&self) -> watch::Receiver<Option<WalletSnapshot>> {
        self.identity.subscribe(&())
    }

    /// Watch the transient connecting flag.
    pub fn subscribe_connecting(&self) -> watch::Receiver<bool> {
        self.connecting.subscribe()
    }
}

impl Drop for WalletSession {
    fn drop(&mut self) {
        if let Some(listener) = &self.listener {
            listener.abort();
        }
    }
}
