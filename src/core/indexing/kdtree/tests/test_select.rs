// src/core/indexing/kdtree/tests/test_select.rs

#[cfg(test)]
mod select_tests {
    use crate::core::indexing::kdtree::{select_nth, select_nth_ref, KdTreeError};
    use crate::core::types::{Coordinates, Dimension, Task};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use super::super::{random_tasks, task};

    fn ident(v: &f64) -> f64 {
        *v
    }

    fn check_against_sort(values: &[f64], k: usize) {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mut scratch = values.to_vec();
        let picked = *select_nth_ref(&mut scratch, k, &ident).unwrap();
        assert_eq!(picked, sorted[k], "len {} rank {}", values.len(), k);
    }

    #[test]
    fn test_matches_sort_for_distinct_values() {
        let mut rng = StdRng::seed_from_u64(0x5e1ec7);
        for size in 1..=500usize {
            let mut values: Vec<f64> = (0..size).map(|i| i as f64 * 1.5 - 100.0).collect();
            values.shuffle(&mut rng);
            if size <= 60 {
                for k in 0..size {
                    check_against_sort(&values, k);
                }
            } else {
                for k in (0..size).step_by(size / 20) {
                    check_against_sort(&values, k);
                }
                check_against_sort(&values, size - 1);
            }
        }
    }

    #[test]
    fn test_matches_sort_with_duplicates() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut values: Vec<f64> = (0..300).map(|i| f64::from(i % 7)).collect();
        values.shuffle(&mut rng);
        for k in 0..values.len() {
            check_against_sort(&values, k);
        }
    }

    #[test]
    fn test_partitions_around_selected_rank() {
        let tasks = random_tasks(137, 11);
        let key = |t: &Task| t.coordinate(Dimension::Distance);
        let mut work = tasks.clone();
        let k = work.len() / 2;
        let index = select_nth(&mut work, k, &key).unwrap();
        assert_eq!(index, k);
        let pivot = key(&work[k]);
        assert!(work[..k].iter().all(|t| key(t) <= pivot));
        assert!(work[k + 1..].iter().all(|t| key(t) >= pivot));
        assert_eq!(work.len(), tasks.len());
    }

    #[test]
    fn test_generic_over_dimension() {
        let mut tasks = vec![
            task(1, 5.0, 9.0, 0.0, 0.0, 0.0),
            task(2, 1.0, 2.0, 0.0, 0.0, 0.0),
            task(3, 9.0, 4.0, 0.0, 0.0, 0.0),
        ];
        let by_time = |t: &Task| t.time;
        let by_mood = |t: &Task| t.mood;
        assert_eq!(select_nth_ref(&mut tasks, 1, &by_time).unwrap().id.0, 1);
        assert_eq!(select_nth_ref(&mut tasks, 1, &by_mood).unwrap().id.0, 3);
    }

    #[test]
    fn test_deterministic_for_fixed_input_order() {
        let tasks = random_tasks(250, 3);
        let key = |t: &Task| t.mood;
        let mut first = tasks.clone();
        let mut second = tasks;
        let a = select_nth_ref(&mut first, 125, &key).unwrap().id;
        let b = select_nth_ref(&mut second, 125, &key).unwrap().id;
        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_errors() {
        let mut empty: Vec<Task> = Vec::new();
        let key = |t: &Task| t.time;
        assert_eq!(select_nth(&mut empty, 0, &key), Err(KdTreeError::EmptyInput));

        let mut one = vec![task(1, 0.0, 0.0, 0.0, 0.0, 0.0)];
        assert_eq!(
            select_nth(&mut one, 1, &key),
            Err(KdTreeError::InvalidRank { rank: 1, len: 1 })
        );
    }
}
