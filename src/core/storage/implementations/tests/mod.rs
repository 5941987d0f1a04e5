mod in_memory_tests;

use crate::core::types::{Task, TaskId};

pub(super) fn task(id: u64, user: &str) -> Task {
    Task {
        id: TaskId(id),
        user: user.to_string(),
        time: id as f64,
        mood: 3.0,
        energy: 2.0,
        latitude: 10.0,
        longitude: 20.0,
        ancestry: None,
    }
}
