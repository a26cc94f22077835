//! # Shared Types Crate
//!
//! This crate contains the domain entities mirrored from the crowdfunding
//! ledger, the client-wide error taxonomy, and the fixed-point unit
//! conversion between the ledger's smallest unit and the display unit.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Snapshots are immutable**: a `Campaign` is a read-only copy of ledger
//!   state as of one fetch; the cache layer owns the only mutation paths.
//! - **Unsigned by construction**: amounts and counts use `U256`/`u64`, so
//!   the non-negativity invariants hold at the type level.

pub mod entities;
pub mod errors;
pub mod units;

pub use entities::*;
pub use errors::ClientError;
pub use units::{format_display, parse_display, to_display, unit_scale, DECIMALS};
