//! Longitude ordering helpers shared by markers and clusters

use std::cmp::Ordering;

/// Share of changed entries above which a full sort beats insertion sort
pub const SORT_RATIO_THRESHOLD: f64 = 0.2;

/// Sort strategy picked for a batch of changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    /// Nothing changed since the last sort
    Skip,
    Insertion,
    General,
}

/// Picks the sort strategy for `changes` modified entries out of `len`
pub fn choose_strategy(changes: usize, len: usize) -> SortStrategy {
    if changes == 0 || len == 0 {
        SortStrategy::Skip
    } else if changes as f64 / len as f64 > SORT_RATIO_THRESHOLD {
        SortStrategy::General
    } else {
        SortStrategy::Insertion
    }
}

/// Stable insertion sort on an f64 key, ascending
///
/// Runs in O(n * k) on an array where k entries are out of place, which is
/// the usual shape of the marker list between two view passes.
pub fn insertion_sort_by_key<T, F>(items: &mut [T], mut key: F)
where
    F: FnMut(&T) -> f64,
{
    for i in 1..items.len() {
        let current = key(&items[i]);
        let mut j = i;
        while j > 0 && key(&items[j - 1]) > current {
            j -= 1;
        }
        if j < i {
            items[j..=i].rotate_right(1);
        }
    }
}

/// Unstable comparison sort on an f64 key, ascending
pub fn general_sort_by_key<T, F>(items: &mut [T], mut key: F)
where
    F: FnMut(&T) -> f64,
{
    items.sort_unstable_by(|a, b| key(a).total_cmp(&key(b)));
}

/// Sorts `items` with the given strategy
pub fn sort_by_key<T, F>(items: &mut [T], strategy: SortStrategy, key: F)
where
    F: FnMut(&T) -> f64,
{
    match strategy {
        SortStrategy::Skip => {}
        SortStrategy::Insertion => insertion_sort_by_key(items, key),
        SortStrategy::General => general_sort_by_key(items, key),
    }
}

/// Returns the first index whose key is `>= value`, or `items.len()`
///
/// `items` must be sorted ascending by `key`.
pub fn lower_bound_by_key<T, F>(items: &[T], value: f64, mut key: F) -> usize
where
    F: FnMut(&T) -> f64,
{
    let mut lo = 0usize;
    let mut hi = items.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if key(&items[mid]).partial_cmp(&value) == Some(Ordering::Less) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Checks that `items` is non-decreasing by `key`
pub fn is_sorted_by_key<T, F>(items: &[T], mut key: F) -> bool
where
    F: FnMut(&T) -> f64,
{
    items.windows(2).all(|w| key(&w[0]) <= key(&w[1]))
}
