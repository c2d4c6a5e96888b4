//! In-place quicksort with Hoare partitioning around the middle element.
//!
//! Not stable. A comparator that panics leaves the buffer holding some
//! permutation of its original elements; only swaps ever move data.

use crate::dynamic_array::DynamicArray;
use core::cmp::Ordering;

/// Sorts `array` by `compare`. Length and elements are unchanged except for order.
pub fn sort<T, F>(array: &mut DynamicArray<T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if array.len() <= 1 {
        return;
    }
    // Live slots are always `Some`; the fallback arm only keeps the order total.
    sort_slice(array.live_slots_mut(), |a, b| match (a, b) {
        (Some(a), Some(b)) => compare(a, b),
        _ => a.is_some().cmp(&b.is_some()),
    });
}

/// Sorts a plain buffer in place by `compare`.
pub fn sort_slice<T, F>(buffer: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if buffer.len() <= 1 {
        return;
    }
    quick_sort(buffer, &mut compare);
}

/// Ascending by `Ord`.
pub fn sort_natural<T: Ord>(array: &mut DynamicArray<T>) {
    sort(array, T::cmp);
}

/// Descending by `Ord`.
pub fn sort_reverse<T: Ord>(array: &mut DynamicArray<T>) {
    sort(array, |a, b| b.cmp(a));
}

/// Partitions `buffer`, then sorts the smaller side recursively and the
/// larger side in the loop, so stack depth stays logarithmic.
fn quick_sort<T, F>(mut buffer: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while buffer.len() > 1 {
        let (end, start) = partition(buffer, compare);
        let (lower, rest) = core::mem::take(&mut buffer).split_at_mut(end);
        let (_, upper) = rest.split_at_mut(start - end);
        if lower.len() < upper.len() {
            quick_sort(lower, compare);
            buffer = upper;
        } else {
            quick_sort(upper, compare);
            buffer = lower;
        }
    }
}

/// Hoare partition of a buffer with at least two elements.
///
/// Returns `(end, start)` once the cursors cross: `[0, end)` holds elements
/// not greater than the pivot, `[start, len)` elements not less than it,
/// and anything in `[end, start)` equals the pivot. Both ranges are
/// strictly shorter than the buffer.
fn partition<T, F>(buffer: &mut [T], compare: &mut F) -> (usize, usize)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let last = buffer.len() - 1;
    // Tracks the pivot value as swaps move it.
    let mut pivot = last / 2;
    let mut left = 0;
    let mut end = buffer.len();

    while left < end {
        while left < last && compare(&buffer[left], &buffer[pivot]) == Ordering::Less {
            left += 1;
        }
        while end > 1 && compare(&buffer[end - 1], &buffer[pivot]) == Ordering::Greater {
            end -= 1;
        }
        if left < end {
            let right = end - 1;
            buffer.swap(left, right);
            if pivot == left {
                pivot = right;
            } else if pivot == right {
                pivot = left;
            }
            left += 1;
            end -= 1;
        }
    }
    (end, left)
}
