//! Generic sequence algorithms over [`RandomAccessIterator`]s.
//!
//! Everything here works through the iterator contract alone, so a joint
//! iterator over several sequences is sorted, merged, and copied exactly like
//! a single one. Ranges are half-open `[first, last)`.
//!
//! All functions are `unsafe`: the caller promises the ranges are valid for
//! the iterators involved and that nothing else touches those elements for
//! the duration of the call. Comparators are `less(a, b)` strict weak
//! orderings over references. A comparator that is not one gives an
//! unspecified permutation, never an out-of-range access.
//!
//! Temporaries are owned snapshots and relocation goes through move
//! assignment, so every slot holds a live value at every step. A panicking
//! comparator leaves the range as a permutation of valid values.

mod copy;
mod heap;
mod merge;
mod select;
mod sort;

pub use copy::copy;
pub use copy::copy_backward;
pub use copy::copy_n;
pub use copy::reverse;
pub use copy::rotate;
pub use heap::make_heap_by;
pub use heap::partial_sort;
pub use heap::partial_sort_by;
pub use heap::partial_sort_copy_by;
pub use heap::pop_heap_by;
pub use heap::push_heap_by;
pub use heap::sort_heap_by;
pub use merge::merge;
pub use merge::merge_by;
pub use select::nth_element;
pub use select::nth_element_by;
pub use sort::is_sorted_by;
pub use sort::sort;
pub use sort::sort_by;
pub use sort::stable_sort;
pub use sort::stable_sort_by;

use crate::cursor::RandomAccessIterator;

/// `floor(log2(n))` for `n > 0`, zero otherwise.
fn floor_log2(n: isize) -> u32 {
    if n <= 0 {
        return 0;
    }
    return (n as usize).ilog2();
}

/// Recursion budget for introsort and introselect.
fn depth_limit(len: isize) -> u32 {
    return 2 * floor_log2(len);
}

/// Compare the elements at two positions.
///
/// # Safety
///
/// Both positions must be dereferenceable.
#[inline]
unsafe fn less_at<I, F>(a: &I, b: &I, less: &mut F) -> bool
where
    I: RandomAccessIterator,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    // SAFETY: forwarded to the caller.
    let (a, b) = unsafe { (a.reference(), b.reference()) };
    return less(&a, &b);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logarithms() {
        assert_eq!(floor_log2(0), 0);
        assert_eq!(floor_log2(1), 0);
        assert_eq!(floor_log2(2), 1);
        assert_eq!(floor_log2(15), 3);
        assert_eq!(floor_log2(16), 4);
        assert_eq!(depth_limit(1024), 20);
    }
}
