// src/core/storage/implementations/in_memory.rs

use super::StoreState;
use crate::core::common::lock_utils::{read_lock_poisoned, write_lock_poisoned};
use crate::core::storage::traits::{StoreError, TaskStore};
use crate::core::types::{Task, TaskId};
use std::sync::RwLock;

/// Volatile task store. Batches are applied under a single write lock.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    state: RwLock<StoreState>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for InMemoryTaskStore {
    fn next_id(&self) -> Result<TaskId, StoreError> {
        let mut state = self.state.write().map_err(write_lock_poisoned)?;
        state.allocate_id()
    }

    fn save(&self, task: Task) -> Result<Task, StoreError> {
        let mut state = self.state.write().map_err(write_lock_poisoned)?;
        state.put(task.clone());
        Ok(task)
    }

    fn save_all(&self, tasks: Vec<Task>) -> Result<Vec<Task>, StoreError> {
        let mut state = self.state.write().map_err(write_lock_poisoned)?;
        for task in &tasks {
            state.put(task.clone());
        }
        Ok(tasks)
    }

    fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        let state = self.state.read().map_err(read_lock_poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        let mut state = self.state.write().map_err(write_lock_poisoned)?;
        Ok(state.tasks.remove(&id).is_some())
    }

    fn exists_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        let state = self.state.read().map_err(read_lock_poisoned)?;
        Ok(state.tasks.contains_key(&id))
    }

    fn find_all_for_user(&self, user: &str) -> Result<Vec<Task>, StoreError> {
        let state = self.state.read().map_err(read_lock_poisoned)?;
        Ok(state.for_user(user))
    }

    fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        let state = self.state.read().map_err(read_lock_poisoned)?;
        Ok(state.tasks.values().cloned().collect())
    }
}
