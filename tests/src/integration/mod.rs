//! Cross-crate integration flows.

pub mod browse_flows;
pub mod campaign_flows;
pub mod session_flows;
