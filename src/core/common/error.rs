//! Crate-wide error type.
//!
//! Component errors (`KdTreeError`, `StoreError`) convert into `TaskTreeError`
//! unchanged, so callers can still match on the original failure.

use crate::core::indexing::kdtree::KdTreeError;
use crate::core::storage::StoreError;
use crate::core::types::TaskId;

#[derive(Debug, thiserror::Error)]
pub enum TaskTreeError {
    /// Index construction or reconstruction failed.
    #[error("Index error: {0}")]
    Index(#[from] KdTreeError),

    /// The task store failed; no structure was written.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// No task with this id exists.
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lock Timeout: {0}")]
    LockTimeout(String),
}

impl TaskTreeError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
