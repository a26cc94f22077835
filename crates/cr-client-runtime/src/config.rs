//! # Client Configuration
//!
//! Refresh cadences for each cached view and the search debounce window.

use serde::{Deserialize, Serialize};
use tokio::time::Duration;

/// Client-wide timing configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Refresh interval for the campaign list.
    pub list_refresh: Duration,

    /// Refresh interval for a single campaign's detail view.
    pub detail_refresh: Duration,

    /// Refresh interval for a campaign's contributor rows.
    pub contributors_refresh: Duration,

    /// Delay window applied to search input.
    pub debounce_window: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            list_refresh: Duration::from_secs(5),
            detail_refresh: Duration::from_secs(4),
            contributors_refresh: Duration::from_secs(8),
            debounce_window: Duration::from_millis(300),
        }
    }
}

impl ClientConfig {
    /// Create a config for testing (tighter cadences).
    pub fn for_testing() -> Self {
        Self {
            list_refresh: Duration::from_millis(500),
            detail_refresh: Duration::from_millis(400),
            contributors_refresh: Duration::from_millis(800),
            debounce_window: Duration::from_millis(50),
        }
    }
}
