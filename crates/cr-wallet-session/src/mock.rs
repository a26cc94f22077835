//! # Mock Signing Agent
//!
//! Scriptable agent for tests: configurable grant/deny, a prompt counter,
//! and direct event injection.

use crate::ports::{AgentEvent, SigningAgent};
use async_trait::async_trait;
use shared_types::{Address, ChainId, ClientError};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::broadcast;

/// In-memory signing agent.
pub struct MockAgent {
    /// Address handed out when an authorization prompt is granted; `None`
    /// scripts a denial.
    grant: Mutex<Option<Address>>,
    /// Accounts a silent check currently reports.
    accounts: Mutex<Vec<Address>>,
    chain: AtomicU64,
    prompts: AtomicUsize,
    events: broadcast::Sender<AgentEvent>,
}

impl Default for MockAgent {
    fn default() -> Self {
        Self {
            grant: Mutex::new(None),
            accounts: Mutex::new(Vec::new()),
            chain: AtomicU64::new(1),
            prompts: AtomicUsize::new(0),
            events: broadcast::channel(16).0,
        }
    }
}

impl MockAgent {
    /// Agent with no authorized accounts and prompts scripted to deny.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next prompts to grant `address`.
    pub fn grant(&self, address: Address) {
        *self.lock(&self.grant) = Some(address);
    }

    /// Script prompts to be denied.
    pub fn deny(&self) {
        *self.lock(&self.grant) = None;
    }

    /// Set what silent checks report, without emitting an event.
    pub fn set_accounts(&self, accounts: Vec<Address>) {
        *self.lock(&self.accounts) = accounts;
    }

    /// Point the agent at another chain, without emitting an event.
    pub fn set_chain(&self, chain_id: ChainId) {
        self.chain.store(chain_id, Ordering::SeqCst);
    }

    /// Push a notification to all subscribers.
    pub fn emit(&self, event: AgentEvent) {
        let _ = self.events.send(event);
    }

    /// How many times a human prompt was raised.
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    fn lock<'a, T>(&self, field: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
        field.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SigningAgent for MockAgent {
    async fn request_authorization(&self) -> Result<Vec<Address>, ClientError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        let granted = *self.lock(&self.grant);
        match granted {
            Some(address) => {
                *self.lock(&self.accounts) = vec![address];
                Ok(vec![address])
            }
            None => Err(ClientError::AuthorizationDenied),
        }
    }

    async fn authorized_accounts(&self) -> Result<Vec<Address>, ClientError> {
        Ok(self.lock(&self.accounts).clone())
    }

    async fn chain_id(&self) -> Result<ChainId, ClientError> {
        Ok(self.chain.load(Ordering::SeqCst))
    }

    fn subscribe(&self) -> broadcast::Receiver<AgentEvent> {
        self.events.subscribe()
    }
}
