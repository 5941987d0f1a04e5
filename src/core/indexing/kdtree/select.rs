// src/core/indexing/kdtree/select.rs

//! Linear-time order-statistic selection (median of medians).

use super::error::KdTreeError;
use super::partition::{gather_equal, rank_partition};

/// Group size for the median-of-medians pivot estimate.
const GROUP_SIZE: usize = 5;

/// Rearranges `items` so that the element of rank `k` (0-indexed, ascending by
/// `key`) sits at index `k`, with nothing greater before it and nothing
/// smaller after it. Returns `k`.
///
/// The key is supplied by the caller, so the same routine selects along any
/// dimension. Worst-case linear time; the pivot estimate recurses only on the
/// group medians, so stack depth is logarithmic in `items.len()`.
/// The result is deterministic for a given input order.
///
/// # Errors
///
/// * `KdTreeError::EmptyInput` if `items` is empty.
/// * `KdTreeError::InvalidRank` if `k >= items.len()`.
pub fn select_nth<T, F>(items: &mut [T], k: usize, key: &F) -> Result<usize, KdTreeError>
where
    F: Fn(&T) -> f64,
{
    if items.is_empty() {
        return Err(KdTreeError::EmptyInput);
    }
    if k >= items.len() {
        return Err(KdTreeError::InvalidRank { rank: k, len: items.len() });
    }

    // items[..lo] <= target <= items[hi..] throughout.
    let mut lo = 0;
    let mut hi = items.len();
    loop {
        let window = &mut items[lo..hi];
        if window.len() <= GROUP_SIZE {
            sort_by_key(window, key);
            return Ok(k);
        }

        let pivot = median_of_medians(window, key)?;
        let rank = rank_partition(window, pivot, key);
        let equal_end = gather_equal(window, rank, key);

        let (rank, equal_end) = (lo + rank, lo + equal_end);
        match k {
            k if k < rank => hi = rank,
            k if k < equal_end => return Ok(k),
            _ => lo = equal_end,
        }
    }
}

/// Convenience wrapper returning a reference to the selected element.
///
/// # Errors
///
/// Same as [`select_nth`].
pub fn select_nth_ref<'a, T, F>(items: &'a mut [T], k: usize, key: &F) -> Result<&'a T, KdTreeError>
where
    F: Fn(&T) -> f64,
{
    let index = select_nth(items, k, key)?;
    Ok(&items[index])
}

/// Picks a pivot guaranteed to sit between the 30th and 70th percentile.
///
/// Each group of five is sorted in place and its median swapped to the
/// front of `items`; the median of those medians is then selected
/// recursively. Returns the pivot's index in `items`.
fn median_of_medians<T, F>(items: &mut [T], key: &F) -> Result<usize, KdTreeError>
where
    F: Fn(&T) -> f64,
{
    let mut medians = 0;
    let mut start = 0;
    while start < items.len() {
        let end = (start + GROUP_SIZE).min(items.len());
        sort_by_key(&mut items[start..end], key);
        let median = start + (end - start) / 2;
        items.swap(medians, median);
        medians += 1;
        start = end;
    }
    select_nth(&mut items[..medians], medians / 2, key)
}

fn sort_by_key<T, F>(items: &mut [T], key: &F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| key(a).total_cmp(&key(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(v: &f64) -> f64 {
        *v
    }

    #[test]
    fn test_empty_input_is_error() {
        let mut empty: Vec<f64> = Vec::new();
        assert_eq!(select_nth(&mut empty, 0, &ident), Err(KdTreeError::EmptyInput));
    }

    #[test]
    fn test_rank_out_of_range_is_error() {
        let mut values = vec![1.0, 2.0, 3.0];
        assert_eq!(
            select_nth(&mut values, 3, &ident),
            Err(KdTreeError::InvalidRank { rank: 3, len: 3 })
        );
    }

    #[test]
    fn test_small_input_sorted_directly() {
        let mut values = vec![5.0, 1.0, 9.0];
        assert_eq!(*select_nth_ref(&mut values, 1, &ident).unwrap(), 5.0);
    }

    #[test]
    fn test_selects_median_of_larger_input() {
        let mut values: Vec<f64> = (0..101).rev().map(f64::from).collect();
        let index = select_nth(&mut values, 50, &ident).unwrap();
        assert_eq!(values[index], 50.0);
        assert!(values[..50].iter().all(|v| *v <= 50.0));
        assert!(values[51..].iter().all(|v| *v >= 50.0));
    }

    #[test]
    fn test_all_equal_values_terminate() {
        let mut values = vec![3.0; 1000];
        assert_eq!(*select_nth_ref(&mut values, 999, &ident).unwrap(), 3.0);
    }
}
