//! Component positions.
//!
//! A joint iterator is built from one position per component sequence. Every
//! such position must implement [`RandomAccess`]: O(1) advance by a signed
//! offset, O(1) distance, a total order, and a way to reach the element it
//! points at. The trait is the capability check; the joint types only accept
//! positions that implement it, so an unsuitable position type is rejected
//! at compile time and never reaches a runtime check.
//!
//! [`SlicePos`] is the implementation for mutable slices.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// The random-access capability required of every component position.
///
/// # Safety
///
/// Implementors must guarantee that `as_ptr` on a position obtained by
/// advancing a valid position by `n` returns the pointer to the element `n`
/// slots further along the same sequence, and that `distance` agrees with
/// the offsets passed to `advance`. The joint types rely on this to turn
/// positions into element pointers.
pub unsafe trait RandomAccess: Copy + Ord {
    /// The element type of the underlying sequence.
    type Item;

    /// Move by `n` slots; negative moves backwards. No bounds check.
    fn advance(&mut self, n: isize);

    /// Signed number of slots from `origin` to `self`.
    fn distance(&self, origin: &Self) -> isize;

    /// Pointer to the element at this position. Computing it is always
    /// allowed; dereferencing it is only valid when the position is in bounds.
    fn as_ptr(&self) -> *mut Self::Item;
}

/// A position into a mutable slice.
///
/// Positions behave like raw pointers: they are `Copy`, may be advanced
/// anywhere, and only become dangerous when something dereferences them.
pub struct SlicePos<'a, T> {
    /// Start of the slice.
    base: NonNull<T>,
    /// Offset from `base`, in elements.
    index: isize,
    /// Length of the slice, used by debug assertions.
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

/// Begin and one-past-the-end positions of a slice.
///
/// Both positions carry the slice's exclusive borrow, so the slice cannot be
/// touched through any other path while they are in use.
pub fn slice_bounds<'a, T>(slice: &'a mut [T]) -> (SlicePos<'a, T>, SlicePos<'a, T>) {
    let begin = SlicePos::start_of(slice);
    let mut end = begin;
    end.index = begin.len as isize;
    return (begin, end);
}

impl<'a, T> SlicePos<'a, T> {
    /// The position of the first element of `slice`.
    pub fn start_of(slice: &'a mut [T]) -> SlicePos<'a, T> {
        return SlicePos {
            base: NonNull::from(&mut *slice).cast(),
            index: 0,
            len: slice.len(),
            _marker: PhantomData,
        };
    }

    /// Offset from the start of the slice.
    pub fn index(&self) -> isize {
        return self.index;
    }

    /// Length of the slice this position walks over.
    pub fn slice_len(&self) -> usize {
        return self.len;
    }
}

impl<T> Clone for SlicePos<'_, T> {
    fn clone(&self) -> Self {
        return *self;
    }
}

impl<T> Copy for SlicePos<'_, T> {}

impl<T> Default for SlicePos<'_, T> {
    fn default() -> Self {
        return SlicePos {
            base: NonNull::dangling(),
            index: 0,
            len: 0,
            _marker: PhantomData,
        };
    }
}

impl<T> PartialEq for SlicePos<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        return self.index == other.index && self.base == other.base;
    }
}

impl<T> Eq for SlicePos<'_, T> {}

impl<T> PartialOrd for SlicePos<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl<T> Ord for SlicePos<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        return self
            .index
            .cmp(&other.index)
            .then_with(|| self.base.cmp(&other.base));
    }
}

impl<T> fmt::Debug for SlicePos<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("SlicePos")
            .field("base", &self.base)
            .field("index", &self.index)
            .field("len", &self.len)
            .finish();
    }
}

// SAFETY: `as_ptr` offsets from the slice start by exactly the accumulated
// advances, and `distance` is the difference of those offsets.
unsafe impl<T> RandomAccess for SlicePos<'_, T> {
    type Item = T;

    #[inline]
    fn advance(&mut self, n: isize) {
        self.index = self.index.wrapping_add(n);
    }

    #[inline]
    fn distance(&self, origin: &Self) -> isize {
        debug_assert!(self.base == origin.base, "positions from different slices");
        return self.index.wrapping_sub(origin.index);
    }

    #[inline]
    fn as_ptr(&self) -> *mut T {
        debug_assert!(
            self.index >= 0 && self.index as usize <= self.len,
            "position {} outside slice of length {}",
            self.index,
            self.len,
        );
        return self.base.as_ptr().wrapping_offset(self.index);
    }
}
