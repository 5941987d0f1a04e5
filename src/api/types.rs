use crate::core::types::Task;
use serde::{Deserialize, Serialize};

/// A task returned by a best-match lookup with its distance to the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMatch {
    pub task: Task,
    pub distance: f64,
}
