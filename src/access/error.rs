//! Access layer error definitions.

use thiserror::Error;

use crate::upstream::UpstreamError;

/// Errors surfaced by the access layer.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The upstream call failed after exhausting its retries.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Upstream answered, but had no record for the identifier.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

impl AccessError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccessError::NotFound { .. })
    }
}

/// Result type for access layer operations.
pub type AccessResult<T> = Result<T, AccessError>;
