//! # Session Ports
//!
//! Outbound capabilities the session manager depends on: the signing agent
//! and the persisted reconnect-intent flag.

use async_trait::async_trait;
use shared_types::{Address, ChainId, ClientError};
use tokio::sync::broadcast;

/// Notification pushed by the signing agent at an arbitrary time, possibly
/// mid-connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// The authorized account list changed. Empty means the agent revoked
    /// access (external disconnect).
    AccountsChanged(Vec<Address>),
    /// The agent switched chains.
    ChainChanged(ChainId),
}

/// The browser-resident signing agent ("wallet").
///
/// Key material and transaction signing live entirely behind this port;
/// the client never sees them.
#[async_trait]
pub trait SigningAgent: Send + Sync {
    /// Request authorization. May prompt the human; suspends until granted
    /// or denied.
    async fn request_authorization(&self) -> Result<Vec<Address>, ClientError>;

    /// Currently authorized accounts, silently (never prompts).
    async fn authorized_accounts(&self) -> Result<Vec<Address>, ClientError>;

    /// Chain the agent is currently pointed at.
    async fn chain_id(&self) -> Result<ChainId, ClientError>;

    /// Subscribe to agent notifications.
    fn subscribe(&self) -> broadcast::Receiver<AgentEvent>;
}

/// Persisted "was explicitly connected by user action" flag.
///
/// Best-effort storage: adapters absorb I/O failures the way the original
/// flag absorbs storage exceptions, so session transitions never fail on
/// persistence.
pub trait IntentStore: Send + Sync {
    /// Whether the user explicitly connected before.
    fn get(&self) -> bool;

    /// Persist or clear the flag.
    fn set(&self, connected: bool);
}
