//! The joint iterator.
//!
//! [`JointIter`] wraps one composite position and moves all of its
//! components together. It is a plain value: copying it copies the cursor,
//! dropping it does nothing to the sequences.
//!
//! Equality, ordering, and distance look at the first component only. That
//! is correct as long as every component was advanced in lockstep from
//! matching starting points, which is the only way the iterator itself
//! moves them. Comparing iterators built over sequences of differing length,
//! or from unrelated starting points, gives meaningless answers.

use std::cmp::Ordering;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Sub;
use std::ops::SubAssign;

use crate::position::RandomAccess;
use crate::reference::JointRef;
use crate::tuple::CloneItems;
use crate::tuple::Component;
use crate::tuple::Positions;
use crate::value::JointValue;

/// A random-access cursor over N sequences advanced in lockstep.
#[derive(Clone, Copy, Debug, Default)]
pub struct JointIter<P: Positions> {
    positions: P,
}

/// Build a joint iterator from one position per component.
///
/// ```
/// use joint::{make_joint, slice_bounds};
///
/// let mut numbers = [3, 1, 2];
/// let mut letters = ['c', 'a', 'b'];
/// let (numbers_begin, numbers_end) = slice_bounds(&mut numbers);
/// let (letters_begin, letters_end) = slice_bounds(&mut letters);
///
/// let begin = make_joint((numbers_begin, letters_begin));
/// let end = make_joint((numbers_end, letters_end));
/// assert_eq!(end - begin, 3);
/// ```
pub fn make_joint<P: Positions>(positions: P) -> JointIter<P> {
    return JointIter::new(positions);
}

impl<P: Positions> JointIter<P> {
    /// A joint iterator over the given composite position.
    pub fn new(positions: P) -> JointIter<P> {
        return JointIter { positions };
    }

    /// The composite position.
    pub fn positions(&self) -> &P {
        return &self.positions;
    }

    /// Give up the iterator and return its composite position.
    pub fn into_positions(self) -> P {
        return self.positions;
    }

    /// The raw position of component `I`.
    pub fn get<const I: usize>(&self) -> <P as Component<I>>::Position
    where
        P: Component<I>,
    {
        return <P as Component<I>>::position(&self.positions);
    }

    /// Move every component by `n`; negative moves backwards.
    #[inline]
    pub fn advance(&mut self, n: isize) -> &mut Self {
        self.positions.advance_all(n);
        return self;
    }

    /// Prefix increment.
    #[inline]
    pub fn increment(&mut self) -> &mut Self {
        return self.advance(1);
    }

    /// Prefix decrement.
    #[inline]
    pub fn decrement(&mut self) -> &mut Self {
        return self.advance(-1);
    }

    /// Postfix increment: advance, returning the previous position.
    #[inline]
    pub fn post_increment(&mut self) -> Self {
        let previous = *self;
        self.advance(1);
        return previous;
    }

    /// Postfix decrement: retreat, returning the previous position.
    #[inline]
    pub fn post_decrement(&mut self) -> Self {
        let previous = *self;
        self.advance(-1);
        return previous;
    }

    /// Signed distance from `origin` to `self`, by the first component.
    #[inline]
    pub fn distance(&self, origin: &Self) -> isize {
        return self.positions.head().distance(origin.positions.head());
    }

    /// Arrow-style access. There is no pointer type separate from the
    /// iterator, so this is the iterator itself.
    pub fn pointer(&self) -> Self {
        return *self;
    }

    /// A proxy for the elements at the current position.
    ///
    /// # Safety
    ///
    /// The position must be in bounds for every component, and the proxy
    /// must be used according to the validity rules of [`JointRef`].
    #[inline]
    pub unsafe fn reference(&self) -> JointRef<P> {
        return JointRef::from_pointers(self.positions.pointers());
    }
}

impl<P: CloneItems> JointIter<P> {
    /// Clone the elements at the current position into a snapshot.
    ///
    /// # Safety
    ///
    /// The position must be in bounds for every component, and no element
    /// there may be mutably borrowed elsewhere.
    #[inline]
    pub unsafe fn read(&self) -> JointValue<P> {
        // SAFETY: forwarded to the caller.
        return unsafe { JointValue::from_positions(&self.positions) };
    }
}

impl<P: Positions> AddAssign<isize> for JointIter<P> {
    fn add_assign(&mut self, n: isize) {
        self.positions.advance_all(n);
    }
}

impl<P: Positions> SubAssign<isize> for JointIter<P> {
    fn sub_assign(&mut self, n: isize) {
        self.positions.advance_all(n.wrapping_neg());
    }
}

impl<P: Positions> Add<isize> for JointIter<P> {
    type Output = JointIter<P>;

    fn add(mut self, n: isize) -> JointIter<P> {
        self += n;
        return self;
    }
}

impl<P: Positions> Sub<isize> for JointIter<P> {
    type Output = JointIter<P>;

    fn sub(mut self, n: isize) -> JointIter<P> {
        self -= n;
        return self;
    }
}

impl<P: Positions> Sub<JointIter<P>> for JointIter<P> {
    type Output = isize;

    fn sub(self, origin: JointIter<P>) -> isize {
        return self.distance(&origin);
    }
}

impl<P: Positions> PartialEq for JointIter<P> {
    fn eq(&self, other: &Self) -> bool {
        return self.positions.head() == other.positions.head();
    }
}

impl<P: Positions> Eq for JointIter<P> {}

impl<P: Positions> PartialOrd for JointIter<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl<P: Positions> Ord for JointIter<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        return self.positions.head().cmp(other.positions.head());
    }
}
