//! # Ledger Gateway
//!
//! The typed call surface wrapping the crowdfunding ledger's read and write
//! operations. The ledger itself is an external collaborator; this crate
//! owns its contract (the [`LedgerGateway`] port and the [`PendingTx`]
//! write handle) plus an in-memory mock adapter for tests.
//!
//! Write operations return a handle that must be awaited to completion
//! before the effect is treated as durable; the client's only job after a
//! confirmation is to invalidate the affected cache keys.

pub mod mock;
pub mod ports;

pub use mock::MockLedger;
pub use ports::{LedgerGateway, PendingTx, TxReceipt};
