//! # Campaign View
//!
//! Pure derivation from raw ledger fields plus wall-clock time: status,
//! progress percentage, time-remaining labels, aggregate statistics, and
//! the filter/sort/search engine over a cached snapshot.
//!
//! Nothing here performs I/O or holds state; every function is a total
//! mapping of its inputs, which is what makes the layer directly unit
//! testable.

pub mod query;
pub mod stats;
pub mod status;

pub use query::{CampaignQuery, SortKey, StatusFilter};
pub use stats::CollectionStats;
pub use status::{derive_status, derive_view, progress_pct, time_remaining, CampaignStatus, CampaignView, TimeRemaining};
