//! # ChainRaise Client Test Suite
//!
//! Unified test crate for cross-crate choreography that no single crate
//! can exercise alone: gateway → cache → derivation → browser, and the
//! wallet session against the scripted agent.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── campaign_flows.rs  # Ledger writes, cache reconciliation
//!     ├── session_flows.rs   # Wallet session against the mock agent
//!     └── browse_flows.rs    # Debounced search, filter/sort, stats
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cr-tests
//!
//! # By category
//! cargo test -p cr-tests integration::campaign_flows
//! cargo test -p cr-tests integration::session_flows
//! cargo test -p cr-tests integration::browse_flows
//! ```

#![allow(dead_code)]

pub mod integration;
