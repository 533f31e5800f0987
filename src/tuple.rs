//! Per-component traversal over tuples of positions.
//!
//! A composite position is a plain tuple `(P0, P1, ...)` of [`RandomAccess`]
//! positions. The traits here give such a tuple the operations the joint
//! types need, each applied to every component in order:
//!
//! - [`Positions`]: advance all, collect element pointers, swap and move
//!   through pointers.
//! - [`CloneItems`]: the operations that copy elements, available when every
//!   item type is `Clone`.
//! - [`Component`]: typed access to a single component by index.
//!
//! The impls are generated for arities 1 through 8.

use std::fmt;
use std::ptr;

use crate::position::RandomAccess;

/// A composite position: one [`RandomAccess`] position per component.
pub trait Positions: Copy {
    /// The first component, which alone decides ordering and distance.
    type Head: RandomAccess;
    /// One element pointer per component.
    type Pointers: Copy + PartialEq + fmt::Debug;
    /// One owned element per component.
    type Values;

    /// Number of components.
    const ARITY: usize;

    /// The first component.
    fn head(&self) -> &Self::Head;

    /// The first component of a pointer tuple.
    fn head_pointer(pointers: &Self::Pointers) -> *mut HeadItem<Self>;

    /// The first component of a value tuple.
    fn head_value(values: &Self::Values) -> &HeadItem<Self>;

    /// Advance every component by `n`.
    fn advance_all(&mut self, n: isize);

    /// Pointers to the current element of every component.
    fn pointers(&self) -> Self::Pointers;

    /// Pointers into an owned value tuple.
    fn value_pointers(values: &mut Self::Values) -> Self::Pointers;

    /// Swap the pointees of `a` and `b`, component by component. Overlapping
    /// pairs are fine.
    ///
    /// # Safety
    ///
    /// Every pointer must be valid for reads and writes.
    unsafe fn swap_pointees(a: Self::Pointers, b: Self::Pointers);

    /// Move `values` into the pointees, dropping what was there.
    ///
    /// # Safety
    ///
    /// Every pointer must be valid for reads and writes.
    unsafe fn write_pointees(dst: Self::Pointers, values: Self::Values);
}

/// Element copies for composite positions whose items are all `Clone`.
pub trait CloneItems: Positions {
    /// Clone every pointee into a value tuple.
    ///
    /// # Safety
    ///
    /// Every pointer must be valid for reads.
    unsafe fn read_pointees(src: Self::Pointers) -> Self::Values;

    /// Clone the pointees of `src` into the pointees of `dst`. Each clone is
    /// taken before the matching write, so `dst` may alias `src`.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads and `dst` for reads and writes.
    unsafe fn clone_pointees(dst: Self::Pointers, src: Self::Pointers);

    /// Clone `values` into the pointees.
    ///
    /// # Safety
    ///
    /// Every pointer must be valid for reads and writes and must not point
    /// into `values`.
    unsafe fn clone_into_pointees(dst: Self::Pointers, values: &Self::Values);
}

/// Access to component `I` of a composite position.
pub trait Component<const I: usize>: Positions {
    /// The position type of component `I`.
    type Position: RandomAccess;

    /// Component `I`'s position.
    fn position(&self) -> Self::Position;

    /// Component `I` of a pointer tuple.
    fn pointer(pointers: &Self::Pointers) -> *mut <Self::Position as RandomAccess>::Item;

    /// Component `I` of a value tuple.
    fn value(values: &Self::Values) -> &<Self::Position as RandomAccess>::Item;

    /// Component `I` of a value tuple, mutably.
    fn value_mut(values: &mut Self::Values) -> &mut <Self::Position as RandomAccess>::Item;
}

/// The element type of the first component of `P`.
pub type HeadItem<P> = <<P as Positions>::Head as RandomAccess>::Item;

/// The element type of component `I` of `P`.
pub type ComponentItem<P, const I: usize> =
    <<P as Component<I>>::Position as RandomAccess>::Item;

macro_rules! tuple_impls {
    (@component [$($All:ident),+] $idx:tt $P:ident) => {
        impl<$($All: RandomAccess),+> Component<$idx> for ($($All,)+) {
            type Position = $P;

            #[inline]
            fn position(&self) -> $P {
                return self.$idx;
            }

            #[inline]
            fn pointer(pointers: &Self::Pointers) -> *mut $P::Item {
                return pointers.$idx;
            }

            #[inline]
            fn value(values: &Self::Values) -> &$P::Item {
                return &values.$idx;
            }

            #[inline]
            fn value_mut(values: &mut Self::Values) -> &mut $P::Item {
                return &mut values.$idx;
            }
        }
    };

    (@arity $arity:literal $all:tt $Head:ident; $($idx:tt $P:ident),+) => {
        impl<$($P: RandomAccess),+> Positions for ($($P,)+) {
            type Head = $Head;
            type Pointers = ($(*mut $P::Item,)+);
            type Values = ($($P::Item,)+);

            const ARITY: usize = $arity;

            #[inline]
            fn head(&self) -> &$Head {
                return &self.0;
            }

            #[inline]
            fn head_pointer(pointers: &Self::Pointers) -> *mut $Head::Item {
                return pointers.0;
            }

            #[inline]
            fn head_value(values: &Self::Values) -> &$Head::Item {
                return &values.0;
            }

            #[inline]
            fn advance_all(&mut self, n: isize) {
                $( self.$idx.advance(n); )+
            }

            #[inline]
            fn pointers(&self) -> Self::Pointers {
                return ($(self.$idx.as_ptr(),)+);
            }

            #[inline]
            fn value_pointers(values: &mut Self::Values) -> Self::Pointers {
                return ($(&raw mut values.$idx,)+);
            }

            #[inline]
            unsafe fn swap_pointees(a: Self::Pointers, b: Self::Pointers) {
                // SAFETY: forwarded to the caller; `ptr::swap` allows overlap.
                unsafe {
                    $( ptr::swap(a.$idx, b.$idx); )+
                }
            }

            #[inline]
            unsafe fn write_pointees(dst: Self::Pointers, values: Self::Values) {
                // SAFETY: forwarded to the caller.
                unsafe {
                    $( *dst.$idx = values.$idx; )+
                }
            }
        }

        impl<$($P: RandomAccess),+> CloneItems for ($($P,)+)
        where
            $($P::Item: Clone),+
        {
            #[inline]
            unsafe fn read_pointees(src: Self::Pointers) -> Self::Values {
                // SAFETY: forwarded to the caller.
                unsafe {
                    return ($((*src.$idx).clone(),)+);
                }
            }

            #[inline]
            unsafe fn clone_pointees(dst: Self::Pointers, src: Self::Pointers) {
                // SAFETY: forwarded to the caller. The shared borrow of the
                // source ends before the write.
                unsafe {
                    $(
                        let value = (*src.$idx).clone();
                        *dst.$idx = value;
                    )+
                }
            }

            #[inline]
            unsafe fn clone_into_pointees(dst: Self::Pointers, values: &Self::Values) {
                // SAFETY: forwarded to the caller.
                unsafe {
                    $( *dst.$idx = values.$idx.clone(); )+
                }
            }
        }

        $( tuple_impls!(@component $all $idx $P); )+
    };

    ($( $arity:literal => ($Head:ident $(, $idx:tt $P:ident)*); )+) => {
        $(
            tuple_impls!(
                @arity $arity [$Head $(, $P)*] $Head;
                0 $Head $(, $idx $P)*
            );
        )+
    };
}

tuple_impls! {
    1 => (P0);
    2 => (P0, 1 P1);
    3 => (P0, 1 P1, 2 P2);
    4 => (P0, 1 P1, 2 P2, 3 P3);
    5 => (P0, 1 P1, 2 P2, 3 P3, 4 P4);
    6 => (P0, 1 P1, 2 P2, 3 P3, 4 P4, 5 P5);
    7 => (P0, 1 P1, 2 P2, 3 P3, 4 P4, 5 P5, 6 P6);
    8 => (P0, 1 P1, 2 P2, 3 P3, 4 P4, 5 P5, 6 P6, 7 P7);
}
