//! The reference proxy.
//!
//! [`JointRef`] stands in for "a reference to one element" of a joint
//! sequence. Structurally it is one raw pointer per component; it never owns
//! anything. It keeps the two behaviours generic reordering code expects of a
//! reference:
//!
//! - copying a proxy aliases: the copy points at the same slots,
//! - assigning through a proxy writes: [`JointRef::assign`] and friends
//!   overwrite the referents, not the proxy.
//!
//! In Rust the first is `Copy` and the second is a named method, so the two
//! can never be confused.
//!
//! # Validity
//!
//! Proxies are created by `unsafe` functions
//! ([`JointIter::reference`](crate::JointIter::reference),
//! [`JointValue::as_joint_ref`](crate::JointValue::as_joint_ref),
//! [`JointRef::from_positions`]). Their callers promise that, for as long as
//! the proxy or any copy of it is used, the referents stay valid and no other
//! borrow of them is live across an access. Under that promise every method
//! here is safe to call.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::tuple::CloneItems;
use crate::tuple::Component;
use crate::tuple::ComponentItem;
use crate::tuple::HeadItem;
use crate::tuple::Positions;
use crate::value::JointValue;

/// A non-owning handle to the elements at one composite position.
pub struct JointRef<P: Positions> {
    pointers: P::Pointers,
    _marker: PhantomData<P>,
}

impl<P: Positions> JointRef<P> {
    /// Bind to the elements currently at `positions`.
    ///
    /// # Safety
    ///
    /// Every component position must be in bounds, and the proxy must be
    /// used according to the module-level validity rules.
    #[inline]
    pub unsafe fn from_positions(positions: &P) -> JointRef<P> {
        return JointRef::from_pointers(positions.pointers());
    }

    #[inline]
    pub(crate) fn from_pointers(pointers: P::Pointers) -> JointRef<P> {
        return JointRef {
            pointers,
            _marker: PhantomData,
        };
    }

    /// Another proxy to the same elements. Same as copying.
    #[inline]
    pub fn alias(&self) -> JointRef<P> {
        return *self;
    }

    /// Whether both proxies point at the same elements.
    pub fn aliases(&self, other: &JointRef<P>) -> bool {
        return self.pointers == other.pointers;
    }

    /// The raw element pointers.
    pub fn pointers(&self) -> P::Pointers {
        return self.pointers;
    }

    /// The element of component `I`.
    #[inline]
    pub fn get<const I: usize>(&self) -> &ComponentItem<P, I>
    where
        P: Component<I>,
    {
        // SAFETY: proxy validity.
        return unsafe { &*<P as Component<I>>::pointer(&self.pointers) };
    }

    /// The element of component `I`, mutably.
    #[inline]
    pub fn get_mut<const I: usize>(&mut self) -> &mut ComponentItem<P, I>
    where
        P: Component<I>,
    {
        // SAFETY: proxy validity.
        return unsafe { &mut *<P as Component<I>>::pointer(&self.pointers) };
    }

    /// The element of the first component.
    #[inline]
    pub fn head(&self) -> &HeadItem<P> {
        // SAFETY: proxy validity.
        return unsafe { &*P::head_pointer(&self.pointers) };
    }

    /// Move the elements `src` refers to into the elements `self` refers to.
    ///
    /// The source slots are left holding what `self` referred to before, so
    /// they stay valid but their contents are unspecified to the caller.
    #[inline]
    pub fn assign_move(&self, src: &JointRef<P>) {
        // SAFETY: proxy validity.
        unsafe { P::swap_pointees(self.pointers, src.pointers) };
    }

    /// Move a snapshot's values into the referents.
    #[inline]
    pub fn assign_value_move(&self, value: JointValue<P>) {
        // SAFETY: proxy validity.
        unsafe { P::write_pointees(self.pointers, value.into_values()) };
    }

    /// Exchange the referents of `self` and `other`.
    #[inline]
    pub fn swap_with(&self, other: &JointRef<P>) {
        // SAFETY: proxy validity; swapping a slot with itself is a no-op.
        unsafe { P::swap_pointees(self.pointers, other.pointers) };
    }
}

impl<P: CloneItems> JointRef<P> {
    /// Copy the values `src` refers to into the values `self` refers to.
    ///
    /// Unlike copying the proxy, this writes through it: afterwards `self`
    /// still points at its own slots, which now hold clones of `src`'s.
    #[inline]
    pub fn assign(&self, src: &JointRef<P>) {
        // SAFETY: proxy validity; `clone_pointees` tolerates `src == self`.
        unsafe { P::clone_pointees(self.pointers, src.pointers) };
    }

    /// Copy a snapshot's values into the referents.
    #[inline]
    pub fn assign_value(&self, value: &JointValue<P>) {
        // SAFETY: proxy validity; a snapshot never aliases a live sequence.
        unsafe { P::clone_into_pointees(self.pointers, value.values()) };
    }

    /// Clone the referents into an owned snapshot.
    #[inline]
    pub fn to_value(&self) -> JointValue<P> {
        return JointValue::from_ref(self);
    }
}

/// Exchange the contents of two proxies' referents, component by component.
///
/// The proxies themselves are unchanged: each still points where it did, and
/// re-reading through them shows the exchanged values.
#[inline]
pub fn swap<P: Positions>(a: JointRef<P>, b: JointRef<P>) {
    a.swap_with(&b);
}

impl<P: Positions> Clone for JointRef<P> {
    fn clone(&self) -> Self {
        return *self;
    }
}

impl<P: Positions> Copy for JointRef<P> {}

impl<P: Positions> fmt::Debug for JointRef<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_tuple("JointRef").field(&self.pointers).finish();
    }
}

// Proxies compare the values they refer to, first component only.

impl<P: Positions> PartialEq for JointRef<P>
where
    HeadItem<P>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        return self.head() == other.head();
    }
}

impl<P: Positions> Eq for JointRef<P> where HeadItem<P>: Eq {}

impl<P: Positions> PartialOrd for JointRef<P>
where
    HeadItem<P>: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return self.head().partial_cmp(other.head());
    }
}

impl<P: Positions> Ord for JointRef<P>
where
    HeadItem<P>: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        return self.head().cmp(other.head());
    }
}
