//! # Client Runtime
//!
//! The composition root: wires the ledger gateway into typed poll caches
//! for the campaign list, campaign details, and contributor rows; performs
//! edge validation on write operations and invalidates exactly the
//! affected keys after confirmation; and exposes the `CampaignBrowser`
//! view-model that ties the debounced search input to the filter/sort
//! engine.
//!
//! ## Module Structure
//!
//! ```text
//! cr-client-runtime/
//! ├── config.rs    # Refresh cadences and the debounce window
//! ├── fetchers.rs  # Gateway-backed Fetch implementations
//! ├── client.rs    # CampaignClient: caches + validated writes
//! ├── browser.rs   # CampaignBrowser view-model
//! └── telemetry.rs # Tracing bootstrap
//! ```

pub mod browser;
pub mod client;
pub mod config;
mod fetchers;
pub mod telemetry;

pub use browser::CampaignBrowser;
pub use client::CampaignClient;
pub use config::ClientConfig;
pub use telemetry::init_tracing;
