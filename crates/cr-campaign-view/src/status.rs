//! # Status Derivation
//!
//! Maps raw campaign fields plus the current time to the user-facing
//! status, progress percentage, and time-remaining bucket.

use serde::{Deserialize, Serialize};
use shared_types::{Campaign, U256};
use std::fmt;

const HOUR_SECS: u64 = 3_600;
const DAY_SECS: u64 = 86_400;

/// User-facing campaign status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CampaignStatus {
    /// Still collecting, goal not yet met, deadline ahead.
    Active,
    /// Raised at least the goal.
    GoalReached,
    /// Deadline passed without meeting the goal.
    Ended,
    /// Funds were withdrawn by the creator.
    Withdrawn,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "Active",
            Self::GoalReached => "Goal Reached",
            Self::Ended => "Ended",
            Self::Withdrawn => "Withdrawn",
        };
        f.write_str(label)
    }
}

/// Derive the status of a campaign at `now` (seconds since epoch).
///
/// Precedence is fixed: withdrawal and goal completion outrank temporal
/// expiry, so a withdrawn campaign with a past deadline reads `Withdrawn`,
/// never `Ended`.
pub fn derive_status(campaign: &Campaign, now: u64) -> CampaignStatus {
    if campaign.withdrawn {
        CampaignStatus::Withdrawn
    } else if campaign.total_raised >= campaign.goal {
        CampaignStatus::GoalReached
    } else if now >= campaign.deadline {
        CampaignStatus::Ended
    } else {
        CampaignStatus::Active
    }
}

/// Integer progress percentage, floored and clamped to `[0, 100]`.
///
/// A zero goal displays as fully funded: it is trivially met.
pub fn progress_pct(campaign: &Campaign) -> u8 {
    if campaign.goal.is_zero() {
        return 100;
    }
    let scaled = campaign.total_raised.saturating_mul(U256::from(100u64)) / campaign.goal;
    std::cmp::min(scaled, U256::from(100u64)).as_u64() as u8
}

/// Time left until a deadline, bucketed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeRemaining {
    /// At least a day left (ceiling count).
    Days(u64),
    /// Between one hour and a day left (ceiling count).
    Hours(u64),
    /// Positive time left, under an hour.
    LessThanAnHour,
    /// Deadline reached or passed.
    Ended,
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(1) => f.write_str("1 day left"),
            Self::Days(n) => write!(f, "{n} days left"),
            Self::Hours(1) => f.write_str("1 hour left"),
            Self::Hours(n) => write!(f, "{n} hours left"),
            Self::LessThanAnHour => f.write_str("less than an hour left"),
            Self::Ended => f.write_str("ended"),
        }
    }
}

/// Bucket the remaining time before `deadline` as of `now`.
///
/// Counts round up: any positive remainder reports the next unit, so a
/// campaign with time left never shows zero days or zero hours.
pub fn time_remaining(deadline: u64, now: u64) -> TimeRemaining {
    let secs = deadline.saturating_sub(now);
    if secs == 0 {
        TimeRemaining::Ended
    } else if secs >= DAY_SECS {
        TimeRemaining::Days(secs.div_ceil(DAY_SECS))
    } else if secs >= HOUR_SECS {
        TimeRemaining::Hours(secs.div_ceil(HOUR_SECS))
    } else {
        TimeRemaining::LessThanAnHour
    }
}

/// A campaign snapshot enriched with everything derived from it.
///
/// Recomputed on demand from the snapshot and the clock; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignView {
    /// The raw snapshot.
    pub campaign: Campaign,
    /// Derived status.
    pub status: CampaignStatus,
    /// Progress percentage in `[0, 100]`.
    pub progress_pct: u8,
    /// Bucketed time remaining.
    pub time_remaining: TimeRemaining,
}

/// Derive the full view of one campaign at `now`.
pub fn derive_view(campaign: &Campaign, now: u64) -> CampaignView {
    CampaignView {
        status: derive_status(campaign, now),
        progress_pct: progress_pct(campaign),
        time_remaining: time_remaining(campaign.deadline, now),
        campaign: campaign.clone(),
    }
}
