use smallvec::SmallVec;

use super::copy::rotate;
use super::depth_limit;
use super::heap::select_and_sort;
use super::less_at;
use crate::cursor::RandomAccessIterator;

/// Ranges at most this long are finished by insertion sort.
const INSERTION_THRESHOLD: isize = 16;

/// Ranges shorter than this are insertion sorted before merging.
const STABLE_CHUNK: isize = 15;

/// Whether `[first, last)` is sorted by `less`.
///
/// # Safety
///
/// `[first, last)` must be a valid range.
pub unsafe fn is_sorted_by<I, F>(first: I, last: I, mut less: F) -> bool
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    if !(first < last) {
        return true;
    }
    let mut prev = first;
    let mut next = first.offset(1);
    while next < last {
        // SAFETY: both positions lie inside the range.
        if unsafe { less_at(&next, &prev, &mut less) } {
            return false;
        }
        prev = next;
        next.advance(1);
    }
    return true;
}

/// Sort `[first, last)` by the references' own ordering.
///
/// # Safety
///
/// `[first, last)` must be a valid range.
pub unsafe fn sort<I>(first: I, last: I)
where
    I: RandomAccessIterator,
    I::Reference: PartialOrd,
{
    // SAFETY: forwarded to the caller.
    unsafe { sort_by(first, last, |a, b| a < b) };
}

/// Sort `[first, last)` by `less`. Not stable.
///
/// Introsort: median-of-three quicksort, switching to heap sort on ranges
/// that exhaust the depth limit, with a final insertion sort pass over the
/// nearly sorted result.
///
/// # Safety
///
/// `[first, last)` must be a valid range.
pub unsafe fn sort_by<I, F>(first: I, last: I, mut less: F)
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
        introsort_loop(first, last, depth_limit(len), &mut less);
        insertion_sort(first, last, &mut less);
    }
}

/// Sort `[first, last)` by the references' own ordering, keeping equal
/// elements in their original order.
///
/// # Safety
///
/// `[first, last)` must be a valid range.
pub unsafe fn stable_sort<I>(first: I, last: I)
where
    I: RandomAccessIterator,
    I::Reference: PartialOrd,
{
    // SAFETY: forwarded to the caller.
    unsafe { stable_sort_by(first, last, |a, b| a < b) };
}

/// Sort `[first, last)` by `less`, keeping equal elements in their original
/// order. Uses no buffer: halves are merged by rotation.
///
/// # Safety
///
/// `[first, last)` must be a valid range.
pub unsafe fn stable_sort_by<I, F>(first: I, last: I, mut less: F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    // SAFETY: forwarded to the caller.
    unsafe { inplace_stable_sort(first, last, &mut less) };
}

/// Partition ranges longer than the insertion threshold until each is either
/// short or heap sorted. Leaves the range so that every element is within
/// one short segment of its final position.
unsafe fn introsort_loop<I, F>(first: I, last: I, depth: u32, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let mut pending: SmallVec<[(I, I, u32); 32]> = SmallVec::new();
    pending.push((first, last, depth));

    while let Some((first, mut last, mut depth)) = pending.pop() {
        while last.distance(&first) > INSERTION_THRESHOLD {
            if depth == 0 {
                // SAFETY: `[first, last)` is a sub-range of the caller's.
                unsafe { select_and_sort(first, last, last, less) };
                break;
            }
            depth -= 1;
            // SAFETY: as above.
            let cut = unsafe { partition_pivot(first, last, less) };
            pending.push((cut, last, depth));
            last = cut;
        }
    }
}

/// Choose a pivot by median of three, move it to `first`, and partition the
/// rest around it. Returns the start of the upper part, which is always
/// after `first`.
///
/// # Safety
///
/// `[first, last)` must be valid and hold at least three elements.
pub(super) unsafe fn partition_pivot<I, F>(first: I, last: I, less: &mut F) -> I
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let mid = first.offset(last.distance(&first) / 2);
    // SAFETY: forwarded to the caller.
    unsafe {
        move_median_to_first(first, first.offset(1), mid, last.offset(-1), less);
        return partition(first.offset(1), last, first, less);
    }
}

/// Swap the median of `a`, `b`, `c` into `result`.
unsafe fn move_median_to_first<I, F>(result: I, a: I, b: I, c: I, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    // SAFETY: every position is dereferenceable per the caller.
    unsafe {
        let median = if less_at(&a, &b, less) {
            if less_at(&b, &c, less) {
                b
            } else if less_at(&a, &c, less) {
                c
            } else {
                a
            }
        } else if less_at(&a, &c, less) {
            a
        } else if less_at(&b, &c, less) {
            c
        } else {
            b
        };
        result.swap(&median);
    }
}

/// Hoare partition of `[lo, hi)` around the element at `pivot`, which sits
/// just before `lo` and never moves. Both scans are bounded by the range.
unsafe fn partition<I, F>(lo: I, hi: I, pivot: I, less: &mut F) -> I
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let mut left = lo;
    let mut right = hi;
    loop {
        // SAFETY: `left` stays in `[lo, hi)` and `right` in `[pivot, hi)`
        // whenever they are dereferenced.
        unsafe {
            while left < hi && less_at(&left, &pivot, less) {
                left.advance(1);
            }
            right.advance(-1);
            while right > pivot && less_at(&pivot, &right, less) {
                right.advance(-1);
            }
            if !(left < right) {
                return left;
            }
            left.swap(&right);
        }
        left.advance(1);
    }
}

/// Stable insertion sort of `[first, last)`.
///
/// # Safety
///
/// `[first, last)` must be a valid range.
pub(super) unsafe fn insertion_sort<I, F>(first: I, last: I, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    if !(first < last) {
        return;
    }
    let mut i = first.offset(1);
    while i < last {
        // SAFETY: `[first, i]` lies inside the range.
        unsafe { linear_insert(first, i, less) };
        i.advance(1);
    }
}

/// Insert the element at `hole` into the sorted run `[first, hole)`.
unsafe fn linear_insert<I, F>(first: I, hole: I, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let mut next = hole.offset(-1);
    // SAFETY: `hole` and `next` are inside `[first, hole]`.
    if !unsafe { less_at(&hole, &next, less) } {
        return;
    }

    // SAFETY: the snapshot lives until the final write, and every position
    // touched is inside `[first, hole]`.
    unsafe {
        let mut value = hole.read();
        let key = I::value_reference(&mut value);
        let mut hole = hole;
        loop {
            hole.relocate(&next);
            hole = next;
            if !(first < hole) {
                break;
            }
            next.advance(-1);
            if !less(&key, &next.reference()) {
                break;
            }
        }
        hole.write(value);
    }
}

unsafe fn inplace_stable_sort<I, F>(first: I, last: I, less: &mut F)
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let len = last.distance(&first);
    // SAFETY: every sub-range below lies inside `[first, last)`.
    unsafe {
        if len < STABLE_CHUNK {
            insertion_sort(first, last, less);
            return;
        }
        let middle = first.offset(len / 2);
        inplace_stable_sort(first, middle, less);
        inplace_stable_sort(middle, last, less);
        merge_without_buffer(
            first,
            middle,
            last,
            middle.distance(&first),
            last.distance(&middle),
            less,
        );
    }
}

/// Merge the sorted runs `[first, middle)` and `[middle, last)` in place.
unsafe fn merge_without_buffer<I, F>(
    first: I,
    middle: I,
    last: I,
    len1: isize,
    len2: isize,
    less: &mut F,
) where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    if len1 == 0 || len2 == 0 {
        return;
    }
    // SAFETY: every position and sub-range lies inside `[first, last)`.
    unsafe {
        if len1 + len2 == 2 {
            if less_at(&middle, &first, less) {
                first.swap(&middle);
            }
            return;
        }

        let (first_cut, second_cut, len11, len22);
        if len1 > len2 {
            len11 = len1 / 2;
            first_cut = first.offset(len11);
            second_cut = lower_bound(middle, last, &first_cut, less);
            len22 = second_cut.distance(&middle);
        } else {
            len22 = len2 / 2;
            second_cut = middle.offset(len22);
            first_cut = upper_bound(first, middle, &second_cut, less);
            len11 = first_cut.distance(&first);
        }

        let new_middle = rotate(first_cut, middle, second_cut);
        merge_without_buffer(first, first_cut, new_middle, len11, len22, less);
        merge_without_buffer(new_middle, second_cut, last, len1 - len11, len2 - len22, less);
    }
}

/// First position in `[first, last)` whose element is not less than the one
/// at `key`. `key` must lie outside the range.
unsafe fn lower_bound<I, F>(first: I, last: I, key: &I, less: &mut F) -> I
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let mut first = first;
    let mut len = last.distance(&first);
    while len > 0 {
        let half = len / 2;
        let mid = first.offset(half);
        // SAFETY: `mid` is inside the range.
        if unsafe { less_at(&mid, key, less) } {
            first = mid.offset(1);
            len = len - half - 1;
        } else {
            len = half;
        }
    }
    return first;
}

/// First position in `[first, last)` whose element is greater than the one
/// at `key`. `key` must lie outside the range.
unsafe fn upper_bound<I, F>(first: I, last: I, key: &I, less: &mut F) -> I
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let mut first = first;
    let mut len = last.distance(&first);
    while len > 0 {
        let half = len / 2;
        let mid = first.offset(half);
        // SAFETY: `mid` is inside the range.
        if unsafe { less_at(key, &mid, less) } {
            len = half;
        } else {
            first = mid.offset(1);
            len = len - half - 1;
        }
    }
    return first;
}
