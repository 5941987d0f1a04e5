// src/core/types/mod.rs

pub mod ancestry;
pub mod dimension;
pub mod task;

pub use ancestry::{Ancestry, ParseAncestryError};
pub use dimension::{Coordinates, Dimension};
pub use task::{parse_time_of_day, NewTask, Task, TaskId, TaskQuery};
