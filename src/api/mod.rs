//! Public service facade over the task index.

pub mod task_index;
pub mod types;

pub use task_index::TaskIndex;
pub use types::TaskMatch;

#[cfg(test)]
mod tests;
