//! # Filter / Sort / Search
//!
//! Pure transformation of a cached campaign collection given a search
//! string, a status filter, and a sort key. No hidden state: the result is
//! a function of exactly those inputs plus the clock.

use crate::status::{derive_status, CampaignStatus};
use serde::{Deserialize, Serialize};
use shared_types::{Campaign, ClientError};
use std::cmp::Ordering;
use std::str::FromStr;

/// Status facet, reusing the derivation semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    /// No status restriction.
    #[default]
    All,
    /// Only `Active` campaigns.
    Active,
    /// Only `Ended` campaigns.
    Ended,
    /// Only `GoalReached` campaigns.
    GoalReached,
    /// Only `Withdrawn` campaigns.
    Withdrawn,
}

impl StatusFilter {
    fn matches(self, campaign: &Campaign, now: u64) -> bool {
        match self {
            Self::All => true,
            Self::Active => derive_status(campaign, now) == CampaignStatus::Active,
            Self::Ended => derive_status(campaign, now) == CampaignStatus::Ended,
            Self::GoalReached => derive_status(campaign, now) == CampaignStatus::GoalReached,
            Self::Withdrawn => derive_status(campaign, now) == CampaignStatus::Withdrawn,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            "goal-reached" => Ok(Self::GoalReached),
            "withdrawn" => Ok(Self::Withdrawn),
            other => Err(ClientError::ValidationFailure(format!(
                "unknown status filter: {other:?}"
            ))),
        }
    }
}

/// Sort key. All sorts are stable, so ties keep their prior relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Descending id (newest first).
    #[default]
    Recent,
    /// Descending raised amount.
    MostFunded,
    /// Descending raised/goal ratio.
    NearlyComplete,
    /// Ascending deadline.
    EndingSoon,
    /// Descending goal.
    GoalAmount,
    /// Descending contributor count.
    ContributorCount,
}

impl FromStr for SortKey {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(Self::Recent),
            "most-funded" => Ok(Self::MostFunded),
            "nearly-complete" => Ok(Self::NearlyComplete),
            "ending-soon" => Ok(Self::EndingSoon),
            "goal-amount" => Ok(Self::GoalAmount),
            "contributor-count" => Ok(Self::ContributorCount),
            other => Err(ClientError::ValidationFailure(format!(
                "unknown sort key: {other:?}"
            ))),
        }
    }
}

/// Compare funding ratios exactly by cross-multiplying into 512 bits.
/// A zero goal reads as an unbounded ratio when anything was raised, and
/// as zero when nothing was.
fn funding_ratio_cmp(a: &Campaign, b: &Campaign) -> Ordering {
    let lhs = a.total_raised.full_mul(b.goal);
    let rhs = b.total_raised.full_mul(a.goal);
    lhs.cmp(&rhs)
}

/// The full filter/sort/search input set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignQuery {
    /// Case-insensitive substring matched against title and description.
    pub search: String,
    /// Status facet.
    pub status: StatusFilter,
    /// Ordering of the result.
    pub sort: SortKey,
}

impl CampaignQuery {
    /// Apply the query to a snapshot at `now`, returning the ordered,
    /// filtered copy.
    pub fn apply(&self, campaigns: &[Campaign], now: u64) -> Vec<Campaign> {
        let needle = self.search.trim().to_lowercase();
        let mut out: Vec<Campaign> = campaigns
            .iter()
            .filter(|c| {
                (needle.is_empty()
                    || c.title.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle))
                    && self.status.matches(c, now)
            })
            .cloned()
            .collect();

        match self.sort {
            SortKey::Recent => out.sort_by(|a, b| b.id.cmp(&a.id)),
            SortKey::MostFunded => out.sort_by(|a, b| b.total_raised.cmp(&a.total_raised)),
            SortKey::NearlyComplete => out.sort_by(|a, b| funding_ratio_cmp(b, a)),
            SortKey::EndingSoon => out.sort_by(|a, b| a.deadline.cmp(&b.deadline)),
            SortKey::GoalAmount => out.sort_by(|a, b| b.goal.cmp(&a.goal)),
            SortKey::ContributorCount => {
                out.sort_by(|a, b| b.contributor_count.cmp(&a.contributor_count))
            }
        }
        out
    }
}
