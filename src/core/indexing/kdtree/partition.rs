// src/core/indexing/kdtree/partition.rs

//! The two partition steps used by the index: rank partitioning around a
//! designated pivot (selection) and value splitting around a cut (tree build).

use std::cmp::Ordering;

/// Reorders `items` around the element at `pivot` and returns the pivot's
/// final index.
///
/// Everything strictly less than the pivot ends up before the returned index,
/// everything else after it. Relative order is not preserved.
///
/// # Panics
///
/// Panics if `pivot` is out of bounds.
pub fn rank_partition<T, F>(items: &mut [T], pivot: usize, key: &F) -> usize
where
    F: Fn(&T) -> f64,
{
    let last = items.len() - 1;
    items.swap(pivot, last);
    let pivot_value = key(&items[last]);

    let mut store = 0;
    for i in 0..last {
        if key(&items[i]).total_cmp(&pivot_value) == Ordering::Less {
            items.swap(store, i);
            store += 1;
        }
    }
    items.swap(store, last);
    store
}

/// Moves every element equal to the value at `pivot` into the run directly
/// after it, assuming `items[pivot + 1..]` holds only values `>=` the pivot.
/// Returns the end (exclusive) of the equal run.
pub fn gather_equal<T, F>(items: &mut [T], pivot: usize, key: &F) -> usize
where
    F: Fn(&T) -> f64,
{
    let pivot_value = key(&items[pivot]);
    let mut end = pivot + 1;
    for i in pivot + 1..items.len() {
        if key(&items[i]).total_cmp(&pivot_value) == Ordering::Equal {
            items.swap(end, i);
            end += 1;
        }
    }
    end
}

/// Splits `items` around `cut`: elements whose key is `>= cut` ("above")
/// are moved behind those that are below it. Returns the boundary, so
/// `items[..boundary]` is below and `items[boundary..]` is above.
pub fn value_split<T, F>(items: &mut [T], cut: f64, key: &F) -> usize
where
    F: Fn(&T) -> f64,
{
    let mut boundary = 0;
    for i in 0..items.len() {
        if key(&items[i]).total_cmp(&cut) == Ordering::Less {
            items.swap(boundary, i);
            boundary += 1;
        }
    }
    boundary
}
