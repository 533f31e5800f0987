use super::depth_limit;
use super::heap::heap_select;
use super::sort::insertion_sort;
use super::sort::partition_pivot;
use crate::cursor::RandomAccessIterator;

/// Ranges at most this long are finished by insertion sort.
const SELECT_THRESHOLD: isize = 3;

/// Reorder `[first, last)` so the element at `nth` is the one that would be
/// there if the range were sorted, with nothing greater before it and
/// nothing less after it.
///
/// # Safety
///
/// `[first, nth)` and `[nth, last)` must be valid ranges.
pub unsafe fn nth_element<I>(first: I, nth: I, last: I)
where
    I: RandomAccessIterator,
    I::Reference: PartialOrd,
{
    // SAFETY: forwarded to the caller.
    unsafe { nth_element_by(first, nth, last, |a, b| a < b) };
}

/// [`nth_element`] with a comparator. Introselect: quickselect with a heap
/// select fallback once the depth limit is exhausted.
///
/// # Safety
///
/// `[first, nth)` and `[nth, last)` must be valid ranges.
pub unsafe fn nth_element_by<I, F>(first: I, nth: I, last: I, mut less: F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    if first == last || nth == last {
        return;
    }
    let mut first = first;
    let mut last = last;
    let mut depth = depth_limit(last.distance(&first));

    // SAFETY: `[first, last)` only ever shrinks around `nth`.
    unsafe {
        while last.distance(&first) > SELECT_THRESHOLD {
            if depth == 0 {
                heap_select(first, nth.offset(1), last, &mut less);
                first.swap(&nth);
                return;
            }
            depth -= 1;
            let cut = partition_pivot(first, last, &mut less);
            if cut <= nth {
                first = cut;
            } else {
                last = cut;
            }
        }
        insertion_sort(first, last, &mut less);
    }
}
