use crate::api::types::TaskMatch;
use crate::core::common::lock_utils::{lock_table_poisoned, user_lock_poisoned};
use crate::core::common::TaskTreeError;
use crate::core::config::Config;
use crate::core::indexing::kdtree::{build_index, find_nearest, IndexTree};
use crate::core::storage::TaskStore;
use crate::core::types::{NewTask, Task, TaskId, TaskQuery};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// `TaskIndex` maintains one balanced index per user on top of a `TaskStore`.
///
/// Every write rebuilds the owning user's index from scratch and persists all
/// of that user's re-stamped tasks as one batch. Ancestry paths are therefore
/// not stable: any insertion or rebuild may move every node of that user.
///
/// Writes for the same user are serialised; different users never block
/// each other. A user's lock entry lives only while some call holds it.
#[derive(Debug)]
pub struct TaskIndex<S: TaskStore> {
    store: S,
    config: Config,
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: TaskStore> TaskIndex<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config, user_locks: Mutex::new(HashMap::new()) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the lock guarding `user`'s structure, creating it on first use.
    fn user_lock(&self, user: &str) -> Result<Arc<Mutex<()>>, TaskTreeError> {
        let mut locks = self.user_locks.lock().map_err(lock_table_poisoned)?;
        Ok(Arc::clone(locks.entry(user.to_string()).or_default()))
    }

    /// Runs `work` holding the locks of every user in `users`. Locks are
    /// taken in name order so overlapping calls cannot deadlock.
    fn with_user_locks<R>(
        &self,
        users: &[&str],
        work: impl FnOnce() -> Result<R, TaskTreeError>,
    ) -> Result<R, TaskTreeError> {
        let mut names = users.to_vec();
        names.sort_unstable();
        names.dedup();

        let locks = names
            .iter()
            .map(|user| self.user_lock(user))
            .collect::<Result<Vec<_>, _>>()?;
        let result = lock_all(&locks).and_then(|guards| {
            let result = work();
            drop(guards);
            result
        });
        self.release_user_locks(&names, locks);
        result
    }

    /// Drops lock-table entries nobody else is holding or waiting on.
    fn release_user_locks(&self, names: &[&str], locks: Vec<Arc<Mutex<()>>>) {
        let Ok(mut table) = self.user_locks.lock() else {
            return;
        };
        for (name, lock) in names.iter().zip(locks) {
            // One reference in the table, one here.
            if Arc::strong_count(&lock) == 2 {
                table.remove(*name);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_users(&self) -> usize {
        self.user_locks.lock().map_or(0, |table| table.len())
    }

    /// Adds a task and rebuilds its owner's index.
    ///
    /// Returns the owner's full, freshly stamped node sequence in pre-order.
    ///
    /// # Errors
    ///
    /// * `TaskTreeError::InvalidInput` if the task fails validation.
    /// * `TaskTreeError::Store` if the store fails, including when no task id
    ///   is left to allocate; the previously persisted structure is left
    ///   untouched.
    pub fn insert(&self, new_task: NewTask) -> Result<Vec<Task>, TaskTreeError> {
        new_task.validate()?;
        let user = new_task.user.clone();
        self.with_user_locks(&[user.as_str()], || {
            let id = self.store.next_id()?;
            let mut records = self.store.find_all_for_user(&user)?;
            records.push(new_task.into_task(id));
            tracing::debug!(%user, %id, records = records.len(), "inserting task");
            self.persist_user(&user, records)
        })
    }

    /// Rebuilds and persists `user`'s index from the tasks currently stored.
    ///
    /// A user with no tasks yields an empty sequence and no writes.
    ///
    /// # Errors
    ///
    /// * `TaskTreeError::Index` if the stored tasks cannot be indexed, for
    ///   example because of a duplicate id.
    /// * `TaskTreeError::Store` if reading or writing fails; on a failed write
    ///   the previous structure is kept.
    pub fn rebuild(&self, user: &str) -> Result<Vec<Task>, TaskTreeError> {
        self.with_user_locks(&[user], || {
            let records = self.store.find_all_for_user(user)?;
            self.persist_user(user, records)
        })
    }

    /// Builds over `records` and writes the result as one batch. The caller
    /// holds `user`'s lock.
    fn persist_user(&self, user: &str, records: Vec<Task>) -> Result<Vec<Task>, TaskTreeError> {
        if records.is_empty() {
            tracing::debug!(%user, "no tasks to index");
            return Ok(Vec::new());
        }
        let persisted = self.store.save_all(restamp(records)?)?;
        tracing::info!(%user, nodes = persisted.len(), "rebuilt task index");
        Ok(persisted)
    }

    /// Up to `limit` of `user`'s tasks closest to `target`, nearest first.
    ///
    /// Uses the persisted structure. If it cannot be reconstructed (for
    /// example after a raw delete), a transient index is built in memory
    /// instead; nothing is written in that case.
    ///
    /// # Errors
    ///
    /// Returns `TaskTreeError::InvalidInput` if `target` has a non-finite
    /// attribute.
    pub fn best_match(
        &self,
        user: &str,
        target: &TaskQuery,
        limit: usize,
    ) -> Result<Vec<TaskMatch>, TaskTreeError> {
        target.validate()?;
        let records = self.store.find_all_for_user(user)?;
        if records.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let tree = match IndexTree::from_stamped(records.clone()) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!(%user, error = %e, "persisted index unusable, building transient index");
                build_index(records)?
            }
        };

        let weights = &self.config.weights;
        let mut matches = Vec::with_capacity(limit.min(tree.len()));
        for hit in find_nearest(&tree, target, limit, weights) {
            if let Some(node) = tree.node(hit.node) {
                matches.push(TaskMatch { task: node.task().clone(), distance: hit.distance });
            }
        }
        Ok(matches)
    }

    /// `best_match` with the configured default limit (ten unless changed).
    pub fn best_ten(&self, user: &str, target: &TaskQuery) -> Result<Vec<TaskMatch>, TaskTreeError> {
        self.best_match(user, target, self.config.best_match_limit)
    }

    /// Looks up a task by id.
    ///
    /// # Errors
    ///
    /// Returns `TaskTreeError::NotFound` if no such task exists.
    pub fn get(&self, id: TaskId) -> Result<Task, TaskTreeError> {
        self.store.find_by_id(id)?.ok_or(TaskTreeError::NotFound(id))
    }

    /// Removes the raw record only; the owner's index is not rebuilt, so
    /// remaining ancestry paths may refer to it until the next rebuild.
    ///
    /// # Errors
    ///
    /// Returns `TaskTreeError::NotFound` if no such task exists.
    pub fn delete(&self, id: TaskId) -> Result<(), TaskTreeError> {
        if !self.store.exists_by_id(id)? {
            return Err(TaskTreeError::NotFound(id));
        }
        self.store.delete_by_id(id)?;
        tracing::debug!(%id, "deleted task");
        Ok(())
    }

    /// Replaces the task stored under `id` (creating it if absent) and
    /// rebuilds every affected user's index.
    ///
    /// When the task changes owner, both users are locked and both rebuilt
    /// structures are written in a single batch.
    ///
    /// # Errors
    ///
    /// * `TaskTreeError::InvalidInput` if the task fails validation.
    /// * `TaskTreeError::Store` if the store fails; neither user's structure
    ///   is changed in that case.
    pub fn update(&self, id: TaskId, new_task: NewTask) -> Result<Task, TaskTreeError> {
        new_task.validate()?;
        let user = new_task.user.clone();
        loop {
            let seen_owner = self.store.find_by_id(id)?.map(|t| t.user);
            let mut users = vec![user.as_str()];
            users.extend(seen_owner.as_deref());

            let updated = self.with_user_locks(&users, || {
                let previous_owner = self.store.find_by_id(id)?.map(|t| t.user);
                if previous_owner != seen_owner {
                    return Ok(None);
                }

                let mut records = self.store.find_all_for_user(&user)?;
                records.retain(|t| t.id != id);
                records.push(new_task.clone().into_task(id));
                let mut batch = restamp(records)?;

                if let Some(owner) = previous_owner.filter(|owner| *owner != user) {
                    let mut remaining = self.store.find_all_for_user(&owner)?;
                    remaining.retain(|t| t.id != id);
                    tracing::debug!(%id, from = %owner, to = %user, "moving task");
                    batch.extend(restamp(remaining)?);
                }

                let persisted = self.store.save_all(batch)?;
                tracing::info!(%id, nodes = persisted.len(), "updated task");
                persisted
                    .into_iter()
                    .find(|t| t.id == id)
                    .map(Some)
                    .ok_or(TaskTreeError::NotFound(id))
            })?;

            match updated {
                Some(task) => return Ok(task),
                None => tracing::debug!(%id, "owner changed during update, retrying"),
            }
        }
    }

    pub fn all(&self) -> Result<Vec<Task>, TaskTreeError> {
        Ok(self.store.find_all()?)
    }

    pub fn tasks_for_user(&self, user: &str) -> Result<Vec<Task>, TaskTreeError> {
        Ok(self.store.find_all_for_user(user)?)
    }
}

fn lock_all(locks: &[Arc<Mutex<()>>]) -> Result<Vec<MutexGuard<'_, ()>>, TaskTreeError> {
    locks.iter().map(|lock| lock.lock().map_err(user_lock_poisoned)).collect()
}

/// Fresh index over `records` in pre-order, stamped. Empty input gives an
/// empty sequence.
fn restamp(records: Vec<Task>) -> Result<Vec<Task>, TaskTreeError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    Ok(build_index(records)?.into_tasks())
}
