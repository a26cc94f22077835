//! # Polling Data Cache
//!
//! Generic key-addressed cache with interval refresh, in-flight
//! deduplication, manual invalidation, and optimistic-write support. Both
//! the campaign views and the wallet session are built on top of it.
//!
//! ## Guarantees
//!
//! - At most one fetch per key is in flight at any instant; a refresh
//!   requested while one is pending attaches to the existing result.
//! - A failing fetch leaves the last-known value untouched (stale-on-error)
//!   and surfaces the error only to the callers awaiting that call.
//! - Subscribers observe value changes through per-key watch channels,
//!   notified after the update is applied.
//!
//! ## Module Structure
//!
//! ```text
//! cr-poll-cache/
//! ├── cache.rs     # PollCache, cache entries, poll handles
//! ├── fetcher.rs   # Fetch port + closure adapter
//! └── debounce.rs  # Last-write-wins input debouncer
//! ```

pub mod cache;
pub mod debounce;
pub mod fetcher;

pub use cache::{PollCache, PollHandle};
pub use debounce::Debouncer;
pub use fetcher::{Fetch, FnFetcher};
