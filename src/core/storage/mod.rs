// src/core/storage/mod.rs

//! Task storage backends.

pub mod implementations;
pub mod traits;

pub use implementations::{InMemoryTaskStore, JsonFileTaskStore};
pub use traits::{StoreError, TaskStore};
