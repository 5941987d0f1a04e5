pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryTaskStore;
pub use json_file::JsonFileTaskStore;

use crate::core::storage::traits::StoreError;
use crate::core::types::{Task, TaskId};
use std::collections::BTreeMap;

/// Contents shared by the store implementations: tasks ordered by id plus
/// the id counter.
#[derive(Debug, Default, Clone)]
pub(crate) struct StoreState {
    pub(crate) next_id: u64,
    pub(crate) tasks: BTreeMap<TaskId, Task>,
}

impl StoreState {
    /// Never hands out an id at or below one already stored. Fails once
    /// `u64::MAX` has been used rather than wrapping around.
    pub(crate) fn allocate_id(&mut self) -> Result<TaskId, StoreError> {
        let floor = self.tasks.keys().next_back().map_or(0, |id| id.0);
        let id = self
            .next_id
            .max(floor)
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("id space exhausted".to_string()))?;
        self.next_id = id;
        Ok(TaskId(id))
    }

    pub(crate) fn put(&mut self, task: Task) {
        self.next_id = self.next_id.max(task.id.0);
        self.tasks.insert(task.id, task);
    }

    pub(crate) fn for_user(&self, user: &str) -> Vec<Task> {
        self.tasks.values().filter(|t| t.user == user).cloned().collect()
    }
}

#[cfg(test)]
mod tests;
