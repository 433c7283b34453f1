//! Location store error types

use thiserror::Error;

/// Failures reported by a location store while persisting verification state
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The backing store could not be reached or opened
    #[error("location store unavailable: {reason}")]
    Unavailable { reason: String },
    /// The store refused a particular fix
    #[error("location store rejected fix {source_id}: {reason}")]
    Rejected { source_id: String, reason: String },
    /// The edit session was used after it had been ended
    #[error("edit session already closed")]
    SessionClosed,
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Whether retrying the same write later could succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Unavailable { .. } => true,
            StoreError::Rejected { .. } => false,
            StoreError::SessionClosed => false,
        }
    }
}
