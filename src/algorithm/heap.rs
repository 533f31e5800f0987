//! Binary max-heaps under `less`, and the partial sorts built on them.
//!
//! Heap routines work on a hole: the element to place is held as a snapshot
//! while larger children or parents are moved into the hole, and written
//! once its slot is found.

use super::less_at;
use crate::cursor::RandomAccessIterator;

/// Arrange `[first, last)` into a heap.
///
/// # Safety
///
/// `[first, last)` must be a valid range.
pub unsafe fn make_heap_by<I, F>(first: I, last: I, mut less: F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    // SAFETY: forwarded to the caller.
    unsafe { make_heap(first, last, &mut less) };
}

/// Add the element at `last - 1` to the heap `[first, last - 1)`.
///
/// # Safety
///
/// `[first, last)` must be a valid range whose first `len - 1` elements
/// form a heap.
pub unsafe fn push_heap_by<I, F>(first: I, last: I, mut less: F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let len = last.distance(&first);
    if len < 2 {
        return;
    }
    // SAFETY: forwarded to the caller.
    unsafe {
        let value = last.offset(-1).read();
        push_hole(first, len - 1, 0, value, &mut less);
    }
}

/// Move the largest element of the heap `[first, last)` to `last - 1` and
/// restore the heap on `[first, last - 1)`.
///
/// # Safety
///
/// `[first, last)` must be a valid heap.
pub unsafe fn pop_heap_by<I, F>(first: I, last: I, mut less: F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    if last.distance(&first) < 2 {
        return;
    }
    let last = last.offset(-1);
    // SAFETY: forwarded to the caller.
    unsafe { pop_heap_into(first, last, last, &mut less) };
}

/// Turn the heap `[first, last)` into an ascending sequence.
///
/// # Safety
///
/// `[first, last)` must be a valid heap.
pub unsafe fn sort_heap_by<I, F>(first: I, last: I, mut less: F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    // SAFETY: forwarded to the caller.
    unsafe { sort_heap(first, last, &mut less) };
}

/// Sort the smallest `middle - first` elements of `[first, last)` into
/// `[first, middle)`. The rest end up in `[middle, last)` in unspecified
/// order.
///
/// # Safety
///
/// `[first, middle)` and `[middle, last)` must be valid ranges.
pub unsafe fn partial_sort<I>(first: I, middle: I, last: I)
where
    I: RandomAccessIterator,
    I::Reference: PartialOrd,
{
    // SAFETY: forwarded to the caller.
    unsafe { partial_sort_by(first, middle, last, |a, b| a < b) };
}

/// [`partial_sort`] with a comparator.
///
/// # Safety
///
/// `[first, middle)` and `[middle, last)` must be valid ranges.
pub unsafe fn partial_sort_by<I, F>(first: I, middle: I, last: I, mut less: F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    // SAFETY: forwarded to the caller.
    unsafe { select_and_sort(first, middle, last, &mut less) };
}

/// Copy the smallest elements of `[first, last)` into `[result_first,
/// result_last)` in ascending order, as many as fit. Returns the end of the
/// written part of the output.
///
/// # Safety
///
/// Both ranges must be valid and must not overlap.
pub unsafe fn partial_sort_copy_by<I, R, F>(
    first: I,
    last: I,
    result_first: R,
    result_last: R,
    mut less: F,
) -> R
where
    I: RandomAccessIterator,
    R: RandomAccessIterator<Value = I::Value, Reference = I::Reference>,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    if result_first == result_last {
        return result_last;
    }
    let mut src = first;
    let mut result_real_last = result_first;
    // SAFETY: every position dereferenced lies inside one of the ranges.
    unsafe {
        while src < last && result_real_last < result_last {
            result_real_last.write(src.read());
            result_real_last.advance(1);
            src.advance(1);
        }
        make_heap(result_first, result_real_last, &mut less);
        let len = result_real_last.distance(&result_first);
        while src < last {
            if less(&src.reference(), &result_first.reference()) {
                adjust_hole(result_first, 0, len, src.read(), &mut less);
            }
            src.advance(1);
        }
        sort_heap(result_first, result_real_last, &mut less);
    }
    return result_real_last;
}

/// Heap select followed by heap sort.
pub(super) unsafe fn select_and_sort<I, F>(first: I, middle: I, last: I, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    // SAFETY: forwarded to the caller.
    unsafe {
        heap_select(first, middle, last, less);
        sort_heap(first, middle, less);
    }
}

/// Leave the smallest `middle - first` elements of `[first, last)` as a heap
/// in `[first, middle)`.
pub(super) unsafe fn heap_select<I, F>(first: I, middle: I, last: I, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    // SAFETY: every position dereferenced lies inside `[first, last)`.
    unsafe {
        make_heap(first, middle, less);
        if !(first < middle) {
            return;
        }
        let mut i = middle;
        while i < last {
            if less_at(&i, &first, less) {
                pop_heap_into(first, middle, i, less);
            }
            i.advance(1);
        }
    }
}

unsafe fn make_heap<I, F>(first: I, last: I, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let len = last.distance(&first);
    if len < 2 {
        return;
    }
    let mut parent = (len - 2) / 2;
    loop {
        // SAFETY: `parent` is inside the range.
        unsafe {
            let value = first.offset(parent).read();
            adjust_hole(first, parent, len, value, less);
        }
        if parent == 0 {
            return;
        }
        parent -= 1;
    }
}

unsafe fn sort_heap<I, F>(first: I, last: I, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let mut last = last;
    while last.distance(&first) > 1 {
        last.advance(-1);
        // SAFETY: `[first, last]` is inside the caller's range.
        unsafe { pop_heap_into(first, last, last, less) };
    }
}

/// Move the top of the heap `[first, last)` to `result`, and put the element
/// that was at `result` into the heap.
unsafe fn pop_heap_into<I, F>(first: I, last: I, result: I, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    // SAFETY: forwarded to the caller.
    unsafe {
        let value = result.read();
        result.relocate(&first);
        adjust_hole(first, 0, last.distance(&first), value, less);
    }
}

/// Sift the hole at `hole` down to a leaf by promoting the larger child, then
/// sift `value` back up from there.
unsafe fn adjust_hole<I, F>(first: I, hole: isize, len: isize, value: I::Value, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let top = hole;
    let mut hole = hole;
    let mut child = hole;
    // SAFETY: every index used is below `len`.
    unsafe {
        while child < (len - 1) / 2 {
            child = 2 * (child + 1);
            if less_at(&first.offset(child), &first.offset(child - 1), less) {
                child -= 1;
            }
            first.offset(hole).relocate(&first.offset(child));
            hole = child;
        }
        if len & 1 == 0 && child == (len - 2) / 2 {
            child = 2 * (child + 1);
            first.offset(hole).relocate(&first.offset(child - 1));
            hole = child - 1;
        }
        push_hole(first, hole, top, value, less);
    }
}

/// Sift `value` up from `hole` towards `top`, then write it.
unsafe fn push_hole<I, F>(first: I, hole: isize, top: isize, value: I::Value, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let mut value = value;
    let mut hole = hole;
    // SAFETY: `hole` and its parents are inside the heap, and the snapshot
    // outlives `key`.
    unsafe {
        let key = I::value_reference(&mut value);
        let mut parent = (hole - 1) / 2;
        while hole > top && less(&first.offset(parent).reference(), &key) {
            first.offset(hole).relocate(&first.offset(parent));
            hole = parent;
            parent = (hole - 1) / 2;
        }
        first.offset(hole).write(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::is_sorted_by;
    use crate::iter::{JointIter, make_joint};
    use crate::position::{SlicePos, slice_bounds};
    use crate::reference::JointRef;

    type Pair<'a> = (SlicePos<'a, i64>, SlicePos<'a, String>);
    type Iter<'a> = JointIter<Pair<'a>>;
    type Ref<'a> = JointRef<Pair<'a>>;

    fn bounds<'a>(keys: &'a mut [i64], names: &'a mut [String]) -> (Iter<'a>, Iter<'a>) {
        let (k, k_end) = slice_bounds(keys);
        let (n, n_end) = slice_bounds(names);
        return (make_joint((k, n)), make_joint((k_end, n_end)));
    }

    fn data(len: i64) -> (Vec<i64>, Vec<String>) {
        let keys: Vec<i64> = (0..len).map(|i| (i * 37) % 101).collect();
        let names = keys.iter().map(|k| k.to_string()).collect();
        return (keys, names);
    }

    fn paired(keys: &[i64], names: &[String]) -> bool {
        return keys.iter().zip(names).all(|(k, n)| k.to_string() == *n);
    }

    fn less(a: &Ref<'_>, b: &Ref<'_>) -> bool {
        return a.get::<0>() < b.get::<0>();
    }

    #[test]
    fn heap_operations() {
        let (mut keys, mut names) = data(50);
        {
            let (first, last) = bounds(&mut keys, &mut names);
            unsafe {
                make_heap_by(first, last - 1, less);
                push_heap_by(first, last, less);
                pop_heap_by(first, last, less);
            }
        }
        assert_eq!(keys[49], 100);
        assert!(paired(&keys, &names));
        {
            let (first, last) = bounds(&mut keys, &mut names);
            unsafe {
                make_heap_by(first, last, less);
                sort_heap_by(first, last, less);
                assert!(is_sorted_by(first, last, less));
            }
        }
        assert!(paired(&keys, &names));
    }

    #[test]
    fn partial_sort_front() {
        let (mut keys, mut names) = data(64);
        let mut expected = keys.clone();
        expected.sort();
        {
            let (first, last) = bounds(&mut keys, &mut names);
            unsafe { partial_sort(first, first + 10, last) };
        }
        assert_eq!(keys[..10], expected[..10]);
        assert!(keys[10..].iter().all(|k| *k >= keys[9]));
        assert!(paired(&keys, &names));
    }

    #[test]
    fn partial_sort_copy_into_shorter_and_longer_outputs() {
        let (mut keys, mut names) = data(30);
        let mut expected = keys.clone();
        expected.sort();

        for out_len in [0, 7, 30, 40] {
            let mut out_keys = vec![0; out_len];
            let mut out_names = vec![String::new(); out_len];
            let written;
            {
                let (first, last) = bounds(&mut keys, &mut names);
                let (out, out_end) = bounds(&mut out_keys, &mut out_names);
                let end = unsafe { partial_sort_copy_by(first, last, out, out_end, less) };
                written = (end - out) as usize;
            }
            assert_eq!(written, out_len.min(30));
            assert_eq!(out_keys[..written], expected[..written]);
            assert!(paired(&out_keys[..written], &out_names[..written]));
        }
    }
}
