//! The iterator contract generic algorithms are written against.
//!
//! [`RandomAccessIterator`] names the associated types an algorithm needs
//! (`Value`, `Reference`, and `isize` as the difference type) and the
//! element operations it performs through them. The algorithms in
//! [`crate::algorithm`] only ever use this trait; they have no idea whether
//! an iterator walks one sequence or several.

use std::cmp::Ordering;

use crate::iter::JointIter;
use crate::reference::JointRef;
use crate::reference::swap;
use crate::tuple::CloneItems;
use crate::tuple::Positions;
use crate::value::JointValue;

/// A random-access iterator with proxy references and owned values.
///
/// There is no associated difference type. Every distance and offset is an
/// `isize`, the difference type of [`RandomAccess`](crate::RandomAccess)
/// positions, so an implementation cannot pick a narrower one.
///
/// # Safety
///
/// Algorithms trust the implementation for memory safety: `distance` must
/// agree with `advance`, the order must agree with `distance`, and the
/// element operations must touch only the element at the iterator's
/// position.
pub unsafe trait RandomAccessIterator: Copy + Ord {
    /// An owned element, used for temporaries.
    type Value;
    /// A handle to an element in place. Copying it aliases.
    type Reference: Copy;

    /// Move by `n` elements; negative moves backwards.
    fn advance(&mut self, n: isize);

    /// Signed number of elements from `origin` to `self`.
    fn distance(&self, origin: &Self) -> isize;

    /// A copy of `self` moved by `n`.
    #[inline]
    fn offset(&self, n: isize) -> Self {
        let mut it = *self;
        it.advance(n);
        return it;
    }

    /// A handle to the element at this position.
    ///
    /// # Safety
    ///
    /// The position must be dereferenceable and the handle must not be used
    /// while the element is borrowed through any other path.
    unsafe fn reference(&self) -> Self::Reference;

    /// A handle to an owned temporary, for comparing it with elements.
    ///
    /// # Safety
    ///
    /// The handle must not outlive `value` or be used while `value` is
    /// accessed otherwise.
    unsafe fn value_reference(value: &mut Self::Value) -> Self::Reference;

    /// Clone the element at this position.
    ///
    /// # Safety
    ///
    /// The position must be dereferenceable.
    unsafe fn read(&self) -> Self::Value;

    /// Move `value` into the element at this position.
    ///
    /// # Safety
    ///
    /// The position must be dereferenceable.
    unsafe fn write(&self, value: Self::Value);

    /// Copy the element at `src` into the element at this position.
    ///
    /// # Safety
    ///
    /// Both positions must be dereferenceable.
    unsafe fn assign(&self, src: &Self);

    /// Move the element at `src` into the element at this position. The
    /// source is left valid with unspecified contents.
    ///
    /// # Safety
    ///
    /// Both positions must be dereferenceable.
    unsafe fn relocate(&self, src: &Self);

    /// Exchange the elements at `self` and `other`.
    ///
    /// # Safety
    ///
    /// Both positions must be dereferenceable.
    unsafe fn swap(&self, other: &Self);
}

// SAFETY: every operation goes through the composite position's pointers,
// and ordering and distance both come from the first component.
unsafe impl<P: CloneItems> RandomAccessIterator for JointIter<P> {
    type Value = JointValue<P>;
    type Reference = JointRef<P>;

    #[inline]
    fn advance(&mut self, n: isize) {
        *self += n;
    }

    #[inline]
    fn distance(&self, origin: &Self) -> isize {
        return *self - *origin;
    }

    #[inline]
    unsafe fn reference(&self) -> JointRef<P> {
        return JointRef::from_pointers(self.positions().pointers());
    }

    #[inline]
    unsafe fn value_reference(value: &mut JointValue<P>) -> JointRef<P> {
        // SAFETY: forwarded to the caller.
        return unsafe { value.as_joint_ref() };
    }

    #[inline]
    unsafe fn read(&self) -> JointValue<P> {
        // SAFETY: forwarded to the caller.
        return unsafe { JointValue::from_positions(self.positions()) };
    }

    #[inline]
    unsafe fn write(&self, value: JointValue<P>) {
        // SAFETY: forwarded to the caller.
        unsafe { RandomAccessIterator::reference(self).assign_value_move(value) };
    }

    #[inline]
    unsafe fn assign(&self, src: &Self) {
        // SAFETY: forwarded to the caller.
        unsafe {
            RandomAccessIterator::reference(self).assign(&RandomAccessIterator::reference(src));
        }
    }

    #[inline]
    unsafe fn relocate(&self, src: &Self) {
        // SAFETY: forwarded to the caller.
        unsafe {
            RandomAccessIterator::reference(self)
                .assign_move(&RandomAccessIterator::reference(src));
        }
    }

    #[inline]
    unsafe fn swap(&self, other: &Self) {
        // SAFETY: forwarded to the caller.
        unsafe {
            swap(
                RandomAccessIterator::reference(self),
                RandomAccessIterator::reference(other),
            );
        }
    }
}

/// Walks an iterator range backwards.
///
/// `Rev(base)` refers to the element just before `base`, so
/// `[Rev(last), Rev(first))` covers `[first, last)` in reverse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rev<I>(pub I);

impl<I: RandomAccessIterator> Rev<I> {
    /// The underlying iterator.
    pub fn base(&self) -> I {
        return self.0;
    }

    #[inline]
    fn current(&self) -> I {
        return self.0.offset(-1);
    }
}

impl<I: Ord> PartialOrd for Rev<I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl<I: Ord> Ord for Rev<I> {
    fn cmp(&self, other: &Self) -> Ordering {
        return other.0.cmp(&self.0);
    }
}

// SAFETY: each operation maps onto the base iterator one element back, and
// the reversed order matches the negated distance.
unsafe impl<I: RandomAccessIterator> RandomAccessIterator for Rev<I> {
    type Value = I::Value;
    type Reference = I::Reference;

    #[inline]
    fn advance(&mut self, n: isize) {
        self.0.advance(n.wrapping_neg());
    }

    #[inline]
    fn distance(&self, origin: &Self) -> isize {
        return origin.0.distance(&self.0);
    }

    #[inline]
    unsafe fn reference(&self) -> I::Reference {
        // SAFETY: forwarded to the caller.
        return unsafe { self.current().reference() };
    }

    #[inline]
    unsafe fn value_reference(value: &mut I::Value) -> I::Reference {
        // SAFETY: forwarded to the caller.
        return unsafe { I::value_reference(value) };
    }

    #[inline]
    unsafe fn read(&self) -> I::Value {
        // SAFETY: forwarded to the caller.
        return unsafe { self.current().read() };
    }

    #[inline]
    unsafe fn write(&self, value: I::Value) {
        // SAFETY: forwarded to the caller.
        unsafe { self.current().write(value) };
    }

    #[inline]
    unsafe fn assign(&self, src: &Self) {
        // SAFETY: forwarded to the caller.
        unsafe { self.current().assign(&src.current()) };
    }

    #[inline]
    unsafe fn relocate(&self, src: &Self) {
        // SAFETY: forwarded to the caller.
        unsafe { self.current().relocate(&src.current()) };
    }

    #[inline]
    unsafe fn swap(&self, other: &Self) {
        // SAFETY: forwarded to the caller.
        unsafe { self.current().swap(&other.current()) };
    }
}
