mod test_select;
mod test_tree;

use crate::core::types::{Task, TaskId};

/// Task with the given id and attributes, owned by "alice".
pub(super) fn task(id: u64, time: f64, mood: f64, energy: f64, lat: f64, lon: f64) -> Task {
    Task {
        id: TaskId(id),
        user: "alice".to_string(),
        time,
        mood,
        energy,
        latitude: lat,
        longitude: lon,
        ancestry: None,
    }
}

/// Deterministic pseudo-random tasks with ids `1..=n`.
pub(super) fn random_tasks(n: usize, seed: u64) -> Vec<Task> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    (1..=n as u64)
        .map(|id| {
            task(
                id,
                rng.gen_range(0.0..1440.0),
                f64::from(rng.gen_range(1..=5)),
                f64::from(rng.gen_range(1..=5)),
                rng.gen_range(-90.0..90.0),
                rng.gen_range(-180.0..180.0),
            )
        })
        .collect()
}
