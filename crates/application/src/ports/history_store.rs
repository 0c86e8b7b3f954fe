//! History store port
//!
//! Append-only from the pipeline's point of view; listing and clearing
//! history belong to the persistence collaborator.

use async_trait::async_trait;
use quiver_domain::HistoryEntry;
use thiserror::Error;

/// Errors an append can report.
#[derive(Debug, Error)]
pub enum HistoryStoreError {
    /// The store could not be reached.
    #[error("history request failed: {0}")]
    Http(String),

    /// The store answered with a non-success status.
    #[error("history append rejected with status {status}")]
    Rejected {
        /// The status the store answered with
        status: u16,
    },

    /// The store's answer could not be decoded.
    #[error("invalid history response: {0}")]
    InvalidResponse(String),
}

/// Workspace-scoped request history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Appends one entry; returns the identifier the store assigned.
    async fn append(&self, entry: &HistoryEntry) -> Result<u64, HistoryStoreError>;
}
