//! Lock error handling utilities
//!
//! Poisoned locks are reported as errors instead of propagating the panic.

use crate::core::common::TaskTreeError;
use crate::core::storage::StoreError;
use std::sync::{MutexGuard, PoisonError, RwLockReadGuard, RwLockWriteGuard};

/// Convert a poisoned per-user mutex into a `TaskTreeError`
pub fn user_lock_poisoned<T>(_: PoisonError<MutexGuard<T>>) -> TaskTreeError {
    TaskTreeError::LockTimeout("User lock poisoned".to_string())
}

/// Convert a poisoned lock-table mutex into a `TaskTreeError`
pub fn lock_table_poisoned<T>(_: PoisonError<MutexGuard<T>>) -> TaskTreeError {
    TaskTreeError::LockTimeout("Failed to lock user lock table".to_string())
}

/// Convert a poisoned store read lock into a `StoreError`
pub fn read_lock_poisoned<T>(_: PoisonError<RwLockReadGuard<T>>) -> StoreError {
    StoreError::LockPoisoned("Failed to acquire read lock".to_string())
}

/// Convert a poisoned store write lock into a `StoreError`
pub fn write_lock_poisoned<T>(_: PoisonError<RwLockWriteGuard<T>>) -> StoreError {
    StoreError::LockPoisoned("Failed to acquire write lock".to_string())
}
