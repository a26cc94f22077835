//! # Aggregate Statistics
//!
//! One-pass statistics over a campaign snapshot, computed once per
//! collection rather than per card.

use crate::status::{derive_status, CampaignStatus};
use serde::{Deserialize, Serialize};
use shared_types::{to_display, Campaign};

/// Aggregates over one snapshot of the campaign list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    /// Number of campaigns.
    pub total: usize,
    /// Number currently `Active`.
    pub active: usize,
    /// Sum of raised amounts, in display units.
    pub total_raised: f64,
    /// Mean per-campaign progress fraction, as a percentage. Uncapped:
    /// overfunded campaigns pull the mean above 100.
    pub avg_funding_pct: f64,
}

impl CollectionStats {
    /// Compute all aggregates in a single pass at `now`.
    pub fn compute(campaigns: &[Campaign], now: u64) -> Self {
        let total = campaigns.len();
        let mut active = 0usize;
        let mut raised_sum = 0.0f64;
        let mut fraction_sum = 0.0f64;

        for campaign in campaigns {
            if derive_status(campaign, now) == CampaignStatus::Active {
                active += 1;
            }
            raised_sum += to_display(campaign.total_raised);
            let goal = to_display(campaign.goal).max(1e-18);
            fraction_sum += to_display(campaign.total_raised) / goal;
        }

        let avg_funding_pct = if total > 0 {
            fraction_sum / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            active,
            total_raised: raised_sum,
            avg_funding_pct,
        }
    }
}
