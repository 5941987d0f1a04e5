// src/core/storage/implementations/json_file.rs

//! File-backed task store.
//!
//! The whole store is one JSON document. Every mutation rewrites it through a
//! temporary sibling file that is synced and then renamed over the data
//! file, so readers of the file never see a half-written batch.

use super::StoreState;
use crate::core::common::lock_utils::{read_lock_poisoned, write_lock_poisoned};
use crate::core::storage::traits::{StoreError, TaskStore};
use crate::core::types::{Task, TaskId};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// On-disk layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    next_id: u64,
    tasks: Vec<Task>,
}

#[derive(Debug)]
pub struct JsonFileTaskStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl JsonFileTaskStore {
    /// Opens the store at `path`, creating parent directories as needed. A
    /// missing file is an empty store; a leftover temporary file from an
    /// interrupted write is discarded.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` or `StoreError::Serialization` if the file
    /// exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp = temp_path(&path);
        if temp.exists() {
            tracing::warn!(path = %temp.display(), "discarding incomplete store write");
            fs::remove_file(&temp)?;
        }

        let state = load(&path)?;
        tracing::debug!(path = %path.display(), tasks = state.tasks.len(), "opened task store");
        Ok(Self { path, state: RwLock::new(state) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `mutate` to a copy of the state, persists the copy, and only
    /// then publishes it in memory. Nothing is written if `mutate` fails.
    fn commit<R>(
        &self,
        mutate: impl FnOnce(&mut StoreState) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut state = self.state.write().map_err(write_lock_poisoned)?;
        let mut next = state.clone();
        let result = mutate(&mut next)?;
        persist(&self.path, &next)?;
        *state = next;
        Ok(result)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    path.with_extension("tmp")
}

fn load(path: &Path) -> Result<StoreState, StoreError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreState::default()),
        Err(e) => return Err(StoreError::Io(e)),
    };
    let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
    let mut state = StoreState { next_id: snapshot.next_id, ..StoreState::default() };
    for task in snapshot.tasks {
        state.put(task);
    }
    Ok(state)
}

fn persist(path: &Path, state: &StoreState) -> Result<(), StoreError> {
    let temp = temp_path(path);

    struct TempFileGuard<'a>(&'a Path);
    impl Drop for TempFileGuard<'_> {
        fn drop(&mut self) {
            let _ = fs::remove_file(self.0);
        }
    }
    let _guard = TempFileGuard(&temp);

    let file = OpenOptions::new().write(true).create(true).truncate(true).open(&temp)?;
    let mut writer = BufWriter::new(file);
    let snapshot = Snapshot {
        next_id: state.next_id,
        tasks: state.tasks.values().cloned().collect(),
    };
    serde_json::to_writer(&mut writer, &snapshot)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    fs::rename(&temp, path)?;
    Ok(())
}

impl TaskStore for JsonFileTaskStore {
    fn next_id(&self) -> Result<TaskId, StoreError> {
        self.commit(StoreState::allocate_id)
    }

    fn save(&self, task: Task) -> Result<Task, StoreError> {
        self.commit(|state| {
            state.put(task.clone());
            Ok(task)
        })
    }

    fn save_all(&self, tasks: Vec<Task>) -> Result<Vec<Task>, StoreError> {
        tracing::debug!(count = tasks.len(), path = %self.path.display(), "writing task batch");
        self.commit(|state| {
            for task in &tasks {
                state.put(task.clone());
            }
            Ok(tasks)
        })
    }

    fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        let state = self.state.read().map_err(read_lock_poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        if !self.exists_by_id(id)? {
            return Ok(false);
        }
        self.commit(|state| Ok(state.tasks.remove(&id).is_some()))
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
