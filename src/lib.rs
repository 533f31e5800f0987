//! Joint - lockstep random-access iteration over parallel sequences.
//!
//! A joint iterator bundles one position per sequence and moves them
//! together, so N equally long sequences read and reorder as one sequence of
//! rows. Generic algorithms (sort, merge, copy, ...) then permute every
//! sequence identically without building an array of records first.
//!
//! # Quick Start
//!
//! ```
//! use joint::JointRange;
//!
//! let mut ids = vec![30, 10, 20];
//! let mut names = vec!["carol", "alice", "bob"];
//!
//! JointRange::new((&mut ids[..], &mut names[..])).unwrap().sort();
//!
//! assert_eq!(ids, [10, 20, 30]);
//! assert_eq!(names, ["alice", "bob", "carol"]);
//! ```
//!
//! # Layers
//!
//! - [`JointIter`]: the composite position, with iterator arithmetic.
//! - [`JointRef`]: a proxy for one row; copying aliases, assigning writes.
//! - [`JointValue`]: an owned snapshot of one row.
//! - [`RandomAccessIterator`] and [`algorithm`]: the contract and the
//!   algorithms written against it.
//! - [`JointRange`]: the safe facade over mutable slices.
//!
//! Everything below the facade is `unsafe` to dereference, in the same way
//! raw pointers are.
//!
//! # Ordering
//!
//! Iterators, proxies, and snapshots compare by their first component only.
//! For iterators this relies on every component having been advanced in
//! lockstep from matching starting points.

pub mod algorithm;
pub mod cursor;
pub mod iter;
pub mod position;
pub mod range;
pub mod reference;
pub mod tuple;
pub mod value;

pub use cursor::RandomAccessIterator;
pub use cursor::Rev;
pub use iter::JointIter;
pub use iter::make_joint;
pub use position::RandomAccess;
pub use position::SlicePos;
pub use position::slice_bounds;
pub use range::IntoPositions;
pub use range::JointRange;
pub use range::RangeError;
pub use range::RowRef;
pub use reference::JointRef;
pub use reference::swap;
pub use tuple::CloneItems;
pub use tuple::Component;
pub use tuple::ComponentItem;
pub use tuple::HeadItem;
pub use tuple::Positions;
pub use value::JointValue;

/// Build a [`JointIter`] from one position per component.
///
/// ```
/// use joint::{joint, slice_bounds};
///
/// let mut a = [1, 2];
/// let mut b = ['x', 'y'];
/// let (a_begin, a_end) = slice_bounds(&mut a);
/// let (b_begin, b_end) = slice_bounds(&mut b);
/// assert_eq!(joint!(a_end, b_end) - joint!(a_begin, b_begin), 2);
/// ```
#[macro_export]
macro_rules! joint {
    ($($position:expr),+ $(,)?) => {
        $crate::JointIter::new(($($position,)+))
    };
}
