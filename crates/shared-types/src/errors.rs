//! # Error Types
//!
//! The client-wide error taxonomy. Variants are `Clone` because a single
//! fetch result may be fanned out to every caller that joined the in-flight
//! request.

use thiserror::Error;

/// Errors surfaced by the client core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// No signing agent is present; connect and write operations are
    /// impossible.
    #[error("Signing agent not detected")]
    AgentUnavailable,

    /// The human declined an authorization prompt.
    #[error("Authorization denied by user")]
    AuthorizationDenied,

    /// A ledger call could not complete.
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Unknown campaign id.
    #[error("Campaign not found: {0}")]
    NotFound(u64),

    /// Caller-supplied input out of the allowed range. Raised at the edge,
    /// never by the cache.
    #[error("Validation failure: {0}")]
    ValidationFailure(String),
}
