#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::cast_sign_loss)]
#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::correctness, clippy::perf, clippy::style, clippy::complexity)]

//! # tasktree: per-user KD-Tree task matching
//!
//! `tasktree` keeps each user's tasks in a balanced KD-Tree over time of day,
//! mood, energy and distance from the origin, and answers "which of my tasks
//! best fits right now" queries against it.
//!
//! - Median-of-medians selection for linear-time splits
//! - Iterative builder, no recursion on the input size
//! - Tree shape persisted as an ancestry path on every task
//! - Weighted nearest-neighbour search with subtree pruning
//! - Pluggable storage: in-memory or an atomically rewritten JSON file

pub mod api;
pub mod core;

// Re-export key types for easier use by library consumers
pub use crate::api::{TaskIndex, TaskMatch};
pub use crate::core::common::TaskTreeError;
pub use crate::core::config::Config;
pub use crate::core::types::{NewTask, Task, TaskId, TaskQuery};

/// Core result type for the library
pub type Result<T> = std::result::Result<T, TaskTreeError>;

#[cfg(test)]
mod tests {
    use crate::{Config, NewTask, TaskIndex, TaskQuery};

    #[test]
    fn basic_task_index_operations() {
        let config = Config::for_testing();
        let store = config.open_store().unwrap();
        let index = TaskIndex::new(store, config);

        let nodes = index
            .insert(NewTask {
                user: "alice".to_string(),
                time: 480.0,
                mood: 4.0,
                energy: 2.0,
                latitude: 51.5,
                longitude: -0.12,
            })
            .unwrap();
        assert_eq!(nodes.len(), 1);

        let target = TaskQuery { time: 500.0, mood: 4.0, energy: 2.0, ..TaskQuery::default() };
        let hits = index.best_ten("alice", &target).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].task.id, nodes[0].id);

        index.delete(nodes[0].id).unwrap();
        assert!(index.all().unwrap().is_empty());
    }
}
