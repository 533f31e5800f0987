//! A safe entry point over mutable slices.
//!
//! [`JointRange`] takes exclusive borrows of N equally long slices and runs
//! the algorithms over them in lockstep. It checks the lengths once, up
//! front, which is all the unsafe layer below needs.
//!
//! ```
//! use joint::JointRange;
//!
//! let mut numbers = vec![4, 3, 2, 1, 0];
//! let mut names = vec!["four", "three", "two", "one", "zero"];
//!
//! let mut range = JointRange::new((&mut numbers[..], &mut names[..])).unwrap();
//! range.sort_by(|a, b| a.get::<1>() < b.get::<1>());
//!
//! assert_eq!(numbers, [4, 1, 3, 2, 0]);
//! assert_eq!(names, ["four", "one", "three", "two", "zero"]);
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::algorithm;
use crate::iter::JointIter;
use crate::position::SlicePos;
use crate::reference::JointRef;
use crate::tuple::CloneItems;
use crate::tuple::Component;
use crate::tuple::ComponentItem;
use crate::tuple::HeadItem;
use crate::tuple::Positions;
use crate::value::JointValue;

/// Error building a [`JointRange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Slice number `component` does not have the length of the first one.
    LengthMismatch {
        component: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::LengthMismatch {
                component,
                expected,
                found,
            } => write!(
                f,
                "sequence {component} has length {found}, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for RangeError {}

/// Tuples of mutable slices that can back a [`JointRange`].
pub trait IntoPositions<'a> {
    /// One [`SlicePos`] per slice.
    type Positions: Positions;

    /// Begin and end positions, or the first slice whose length differs.
    fn into_bounds(self) -> Result<(Self::Positions, Self::Positions), RangeError>;
}

macro_rules! into_positions_impls {
    ($( ($($idx:tt $T:ident),+); )+) => {
        $(
            impl<'a, $($T),+> IntoPositions<'a> for ($(&'a mut [$T],)+) {
                type Positions = ($(SlicePos<'a, $T>,)+);

                fn into_bounds(self) -> Result<(Self::Positions, Self::Positions), RangeError> {
                    let expected = self.0.len();
                    $(
                        if self.$idx.len() != expected {
                            return Err(RangeError::LengthMismatch {
                                component: $idx,
                                expected,
                                found: self.$idx.len(),
                            });
                        }
                    )+
                    let begin = ($(SlicePos::start_of(self.$idx),)+);
                    let mut end = begin;
                    end.advance_all(expected as isize);
                    return Ok((begin, end));
                }
            }
        )+
    };
}

into_positions_impls! {
    (0 T0);
    (0 T0, 1 T1);
    (0 T0, 1 T1, 2 T2);
    (0 T0, 1 T1, 2 T2, 3 T3);
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4);
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5);
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6);
    (0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7);
}

/// A read-only view of one row, handed to comparators.
///
/// Unlike a [`JointRef`] it cannot be copied out of the comparator call.
pub struct RowRef<'r, P: Positions> {
    reference: &'r JointRef<P>,
}

impl<'r, P: Positions> RowRef<'r, P> {
    fn new(reference: &'r JointRef<P>) -> RowRef<'r, P> {
        return RowRef { reference };
    }

    /// The element of component `I`.
    pub fn get<const I: usize>(&self) -> &'r ComponentItem<P, I>
    where
        P: Component<I>,
    {
        return self.reference.get::<I>();
    }

    /// The element of the first component.
    pub fn head(&self) -> &'r HeadItem<P> {
        return self.reference.head();
    }
}

impl<P: CloneItems> RowRef<'_, P> {
    /// Clone the row into a snapshot.
    pub fn to_value(&self) -> JointValue<P> {
        return self.reference.to_value();
    }
}

/// N mutable slices of equal length, viewed as one sequence of rows.
pub struct JointRange<'a, P: Positions> {
    begin: JointIter<P>,
    end: JointIter<P>,
    _borrow: PhantomData<&'a mut ()>,
}

impl<'a, P: Positions> JointRange<'a, P> {
    /// Borrow a tuple of slices, which must all have the same length.
    pub fn new<S>(slices: S) -> Result<JointRange<'a, P>, RangeError>
    where
        S: IntoPositions<'a, Positions = P>,
    {
        let (begin, end) = slices.into_bounds()?;
        return Ok(JointRange {
            begin: JointIter::new(begin),
            end: JointIter::new(end),
            _borrow: PhantomData,
        });
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        return (self.end - self.begin) as usize;
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        return self.begin == self.end;
    }

    /// Iterator at the first row.
    pub fn begin(&self) -> JointIter<P> {
        return self.begin;
    }

    /// Iterator one past the last row.
    pub fn end(&self) -> JointIter<P> {
        return self.end;
    }

    fn at(&self, index: usize) -> JointIter<P> {
        assert!(
            index <= self.len(),
            "index {index} out of range for {} rows",
            self.len()
        );
        return self.begin + index as isize;
    }
}

impl<'a, P: CloneItems> JointRange<'a, P> {
    /// A snapshot of row `index`. Panics if out of range.
    pub fn get(&self, index: usize) -> JointValue<P> {
        assert!(
            index < self.len(),
            "index {index} out of range for {} rows",
            self.len()
        );
        // SAFETY: the row is in bounds and the slices are borrowed by `self`.
        return unsafe { (self.begin + index as isize).read() };
    }

    /// Sort rows by the first component.
    pub fn sort(&mut self)
    where
        HeadItem<P>: Ord,
    {
        // SAFETY: `[begin, end)` covers the borrowed slices exactly.
        unsafe { algorithm::sort(self.begin, self.end) };
    }

    /// Sort rows by `less`. Not stable.
    pub fn sort_by<F>(&mut self, mut less: F)
    where
        F: FnMut(RowRef<'_, P>, RowRef<'_, P>) -> bool,
    {
        // SAFETY: as for `sort`; the proxies never leave the closure.
        unsafe {
            algorithm::sort_by(self.begin, self.end, |a, b| {
                less(RowRef::new(a), RowRef::new(b))
            })
        };
    }

    /// Sort rows by the first component, keeping equal rows in order.
    pub fn stable_sort(&mut self)
    where
        HeadItem<P>: Ord,
    {
        // SAFETY: as for `sort`.
        unsafe { algorithm::stable_sort(self.begin, self.end) };
    }

    /// Sort rows by `less`, keeping equal rows in order.
    pub fn stable_sort_by<F>(&mut self, mut less: F)
    where
        F: FnMut(RowRef<'_, P>, RowRef<'_, P>) -> bool,
    {
        // SAFETY: as for `sort_by`.
        unsafe {
            algorithm::stable_sort_by(self.begin, self.end, |a, b| {
                less(RowRef::new(a), RowRef::new(b))
            })
        };
    }

    /// Sort the `middle` smallest rows into place at the front. Panics if
    /// `middle` exceeds the length.
    pub fn partial_sort_by<F>(&mut self, middle: usize, mut less: F)
    where
        F: FnMut(RowRef<'_, P>, RowRef<'_, P>) -> bool,
    {
        let middle = self.at(middle);
        // SAFETY: as for `sort_by`; `middle` is inside the range.
        unsafe {
            algorithm::partial_sort_by(self.begin, middle, self.end, |a, b| {
                less(RowRef::new(a), RowRef::new(b))
            })
        };
    }

    /// Put the row that belongs at `nth` in sorted order there, smaller rows
    /// before it and larger ones after. Panics if `nth` is not a row.
    pub fn nth_element_by<F>(&mut self, nth: usize, mut less: F)
    where
        F: FnMut(RowRef<'_, P>, RowRef<'_, P>) -> bool,
    {
        assert!(
            nth < self.len(),
            "index {nth} out of range for {} rows",
            self.len()
        );
        let nth = self.at(nth);
        // SAFETY: as for `sort_by`; `nth` is a row.
        unsafe {
            algorithm::nth_element_by(self.begin, nth, self.end, |a, b| {
                less(RowRef::new(a), RowRef::new(b))
            })
        };
    }

    /// Whether the rows are sorted by `less`.
    pub fn is_sorted_by<F>(&self, mut less: F) -> bool
    where
        F: FnMut(RowRef<'_, P>, RowRef<'_, P>) -> bool,
    {
        // SAFETY: as for `sort_by`.
        return unsafe {
            algorithm::is_sorted_by(self.begin, self.end, |a, b| {
                less(RowRef::new(a), RowRef::new(b))
            })
        };
    }

    /// Reverse the order of the rows.
    pub fn reverse(&mut self) {
        // SAFETY: as for `sort`.
        unsafe { algorithm::reverse(self.begin, self.end) };
    }
}

impl<P: Positions> fmt::Debug for JointRange<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_struct("JointRange").field("len", &self.len()).finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_lengths() {
        let mut a = [1, 2, 3];
        let mut b = ['a', 'b', 'c'];
        let mut c = [0.5, 1.5];
        let result = JointRange::new((&mut a[..], &mut b[..], &mut c[..]));
        assert_eq!(
            result.err(),
            Some(RangeError::LengthMismatch {
                component: 2,
                expected: 3,
                found: 2
            })
        );
        let message = RangeError::LengthMismatch {
            component: 1,
            expected: 4,
            found: 0,
        }
        .to_string();
        assert_eq!(message, "sequence 1 has length 0, expected 4");
    }

    #[test]
    fn sorts_and_reads_rows() {
        let mut keys = vec![3, 1, 2];
        let mut names = vec![String::from("c"), String::from("a"), String::from("b")];
        {
            let mut range = JointRange::new((&mut keys[..], &mut names[..])).unwrap();
            assert_eq!(range.len(), 3);
            assert!(!range.is_empty());
            range.sort();
            assert!(range.is_sorted_by(|a, b| a.head() < b.head()));
            assert_eq!(range.get(2).get::<1>(), "c");
            assert_eq!(range.end() - range.begin(), 3);
            range.reverse();
        }
        assert_eq!(keys, [3, 2, 1]);
        assert_eq!(names, ["c", "b", "a"]);
    }

    #[test]
    fn empty_range() {
        let mut a: [u8; 0] = [];
        let mut range = JointRange::new((&mut a[..],)).unwrap();
        assert!(range.is_empty());
        range.sort();
        range.stable_sort_by(|a, b| a.head() < b.head());
        assert!(range.is_sorted_by(|a, b| a.head() < b.head()));
    }

    #[test]
    fn partial_and_nth() {
        let mut keys: Vec<u32> = (0..40).map(|i| (i * 13) % 40).collect();
        let mut doubled: Vec<u32> = keys.iter().map(|k| k * 2).collect();
        {
            let mut range = JointRange::new((&mut keys[..], &mut doubled[..])).unwrap();
            range.nth_element_by(20, |a, b| a.head() < b.head());
            assert_eq!(*range.get(20).head(), 20);
            range.partial_sort_by(5, |a, b| a.get::<1>() < b.get::<1>());
            let front: Vec<u32> = (0..5).map(|i| *range.get(i).head()).collect();
            assert_eq!(front, [0, 1, 2, 3, 4]);
        }
        assert!(keys.iter().zip(&doubled).all(|(k, d)| k * 2 == *d));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        let mut a = [1];
        let range = JointRange::new((&mut a[..],)).unwrap();
        range.get(1);
    }
}
