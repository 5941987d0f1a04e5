
use crate::core::types::NewTask;

pub(super) fn new_task(user: &str, time: f64) -> NewTask {
    NewTask {
        user: user.to_string(),
        time,
        mood: 3.0,
        energy: 3.0,
        latitude: 0.0,
        longitude: 0.0,
    }
}
