// src/core/storage/traits.rs

use crate::core::types::{Task, TaskId};
use std::sync::Arc;

/// Errors reported by a task store. The index propagates them unchanged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Key-value storage for tasks, keyed by id.
///
/// Methods take `&self`; implementations synchronise internally so one store
/// can be shared between threads. Collections are returned ordered by id.
pub trait TaskStore: Send + Sync {
    /// Reserves a fresh id. Ids are never reused.
    fn next_id(&self) -> Result<TaskId, StoreError>;

    /// Creates or replaces a task by id.
    fn save(&self, task: Task) -> Result<Task, StoreError>;

    /// Creates or replaces every given task as one batch: either all are
    /// visible afterwards or none are.
    fn save_all(&self, tasks: Vec<Task>) -> Result<Vec<Task>, StoreError>;

    fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError>;

    /// Removes a task. Returns `Ok(false)` if it did not exist.
    fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError>;

    fn exists_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        self.find_by_id(id).map(|found| found.is_some())
    }

    /// All tasks owned by `user`; empty if the user has none.
    fn find_all_for_user(&self, user: &str) -> Result<Vec<Task>, StoreError>;

    fn find_all(&self) -> Result<Vec<Task>, StoreError>;
}

impl<S: TaskStore + ?Sized> TaskStore for Arc<S> {
    fn next_id(&self) -> Result<TaskId, StoreError> {
        (**self).next_id()
    }
    fn save(&self, task: Task) -> Result<Task, StoreError> {
        (**self).save(task)
    }
    fn save_all(&self, tasks: Vec<Task>) -> Result<Vec<Task>, StoreError> {
        (**self).save_all(tasks)
    }
    fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        (**self).find_by_id(id)
    }
    fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        (**self).delete_by_id(id)
    }
    fn exists_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        (**self).exists_by_id(id)
    }
    fn find_all_for_user(&self, user: &str) -> Result<Vec<Task>, StoreError> {
        (**self).find_all_for_user(user)
    }
    fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        (**self).find_all()
    }
}

impl<S: TaskStore + ?Sized> TaskStore for Box<S> {
    fn next_id(&self) -> Result<TaskId, StoreError> {
        (**self).next_id()
    }
    fn save(&self, task: Task) -> Result<Task, StoreError> {
        (**self).save(task)
    }
    fn save_all(&self, tasks: Vec<Task>) -> Result<Vec<Task>, StoreError> {
        (**self).save_all(tasks)
    }
    fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        (**self).find_by_id(id)
    }
    fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        (**self).delete_by_id(id)
    }
    fn exists_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        (**self).exists_by_id(id)
    }
    fn find_all_for_user(&self, user: &str) -> Result<Vec<Task>, StoreError> {
        (**self).find_all_for_user(user)
    }
    fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        (**self).find_all()
    }
}
