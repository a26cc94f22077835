//! # Wallet Session
//!
//! State machine over the user's connection identity against the resident
//! signing agent: `Unknown → {Disconnected, Connected}` with a transient
//! `Connecting` entered only during an explicit connect call.
//!
//! The session is built atop the polling cache — identity is just one more
//! cached key whose fetcher performs the silent (prompt-free) check — and
//! owns exactly one agent event subscription for its lifetime.
//!
//! ## Module Structure
//!
//! ```text
//! cr-wallet-session/
//! ├── ports.rs    # SigningAgent + IntentStore ports, AgentEvent
//! ├── store.rs    # Memory and JSON-file intent store adapters
//! ├── manager.rs  # WalletSession state machine + event loop
//! └── mock.rs     # Scriptable MockAgent for tests
//! ```

pub mod manager;
pub mod mock;
pub mod ports;
pub mod store;

pub use manager::{SessionState, WalletSession};
pub use mock::MockAgent;
pub use ports::{AgentEvent, IntentStore, SigningAgent};
pub use store::{JsonFileIntentStore, MemoryIntentStore};
