// src/core/indexing/kdtree/error.rs

use crate::core::types::TaskId;

/// Errors raised while selecting, building or reconstructing a task index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KdTreeError {
    /// Selection requested over zero elements.
    #[error("KD-Tree Empty Input: selection over an empty collection")]
    EmptyInput,
    /// Requested rank lies outside `[0, len)`.
    #[error("KD-Tree Invalid Rank: rank {rank} out of range for {len} elements")]
    InvalidRank { rank: usize, len: usize },
    /// Two input records share an id, so their ancestry paths would collide.
    #[error("KD-Tree Duplicate Id: task {0} appears more than once")]
    DuplicateId(TaskId),
    /// Persisted ancestry paths do not describe a single well-formed tree.
    #[error("KD-Tree Corrupt Structure: {0}")]
    CorruptStructure(String),
    #[error("KD-Tree Internal Error: {0}")]
    Internal(String),
}

impl KdTreeError {
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptStructure(msg.into())
    }
}
