//! The value snapshot.
//!
//! [`JointValue`] owns one value per component, cloned out of the sequences
//! or built directly from a tuple. Algorithms use it for temporaries: a
//! pivot, the element being inserted, the value carried down a heap.

use std::cmp::Ordering;
use std::fmt;

use crate::reference::JointRef;
use crate::tuple::CloneItems;
use crate::tuple::Component;
use crate::tuple::ComponentItem;
use crate::tuple::HeadItem;
use crate::tuple::Positions;

/// An owned tuple of element values, detached from any sequence.
pub struct JointValue<P: Positions> {
    values: P::Values,
}

impl<P: Positions> JointValue<P> {
    /// A snapshot holding `values`.
    pub fn new(values: P::Values) -> JointValue<P> {
        return JointValue { values };
    }

    /// The stored values.
    pub fn values(&self) -> &P::Values {
        return &self.values;
    }

    /// The stored values, mutably.
    pub fn values_mut(&mut self) -> &mut P::Values {
        return &mut self.values;
    }

    /// Replace the stored values.
    pub fn set_values(&mut self, values: P::Values) {
        self.values = values;
    }

    /// Give up the snapshot and return its values.
    pub fn into_values(self) -> P::Values {
        return self.values;
    }

    /// The value of component `I`.
    pub fn get<const I: usize>(&self) -> &ComponentItem<P, I>
    where
        P: Component<I>,
    {
        return <P as Component<I>>::value(&self.values);
    }

    /// The value of component `I`, mutably.
    pub fn get_mut<const I: usize>(&mut self) -> &mut ComponentItem<P, I>
    where
        P: Component<I>,
    {
        return <P as Component<I>>::value_mut(&mut self.values);
    }

    /// The value of the first component.
    pub fn head(&self) -> &HeadItem<P> {
        return P::head_value(&self.values);
    }

    /// A proxy whose referents are this snapshot's own values.
    ///
    /// This lets a held temporary take part in comparisons written against
    /// proxies.
    ///
    /// # Safety
    ///
    /// The proxy and its copies must not be used after the snapshot moves or
    /// drops, nor while the snapshot is accessed through any other path.
    pub unsafe fn as_joint_ref(&mut self) -> JointRef<P> {
        return JointRef::from_pointers(P::value_pointers(&mut self.values));
    }
}

impl<P: CloneItems> JointValue<P> {
    /// Clone the elements currently at `positions`.
    ///
    /// # Safety
    ///
    /// Every component position must be in bounds and its element must not
    /// be mutably borrowed elsewhere.
    pub unsafe fn from_positions(positions: &P) -> JointValue<P> {
        // SAFETY: forwarded to the caller.
        return JointValue::new(unsafe { P::read_pointees(positions.pointers()) });
    }

    /// Clone the referents of a proxy.
    pub fn from_ref(reference: &JointRef<P>) -> JointValue<P> {
        // SAFETY: proxy validity.
        return JointValue::new(unsafe { P::read_pointees(reference.pointers()) });
    }

    /// Replace the stored values with clones of a proxy's referents.
    pub fn assign_ref(&mut self, reference: &JointRef<P>) {
        // SAFETY: proxy validity.
        self.values = unsafe { P::read_pointees(reference.pointers()) };
    }
}

impl<P: CloneItems> From<&JointRef<P>> for JointValue<P> {
    fn from(reference: &JointRef<P>) -> JointValue<P> {
        return JointValue::from_ref(reference);
    }
}

impl<P: Positions> Clone for JointValue<P>
where
    P::Values: Clone,
{
    fn clone(&self) -> Self {
        return JointValue::new(self.values.clone());
    }
}

impl<P: Positions> fmt::Debug for JointValue<P>
where
    P::Values: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_tuple("JointValue").field(&self.values).finish();
    }
}

// Snapshots order by the first component only, like the iterators.

impl<P: Positions> PartialEq for JointValue<P>
where
    HeadItem<P>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        return self.head() == other.head();
    }
}

impl<P: Positions> Eq for JointValue<P> where HeadItem<P>: Eq {}

impl<P: Positions> PartialOrd for JointValue<P>
where
    HeadItem<P>: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return self.head().partial_cmp(other.head());
    }
}

impl<P: Positions> Ord for JointValue<P>
where
    HeadItem<P>: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        return self.head().cmp(other.head());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{SlicePos, slice_bounds};

    type Pos<'a> = (SlicePos<'a, u32>, SlicePos<'a, String>);

    #[test]
    fn snapshot_is_independent_of_storage() {
        let mut ids = vec![1, 2];
        let mut tags = vec![String::from("a"), String::from("b")];
        let (i, _) = slice_bounds(&mut ids);
        let (t, _) = slice_bounds(&mut tags);
        let pos: Pos<'_> = (i, t);

        let mut value = unsafe { JointValue::from_positions(&pos) };
        *value.get_mut::<0>() = 10;
        value.get_mut::<1>().push('x');

        let live = unsafe { JointRef::from_positions(&pos) };
        assert_eq!(*live.get::<0>(), 1);
        assert_eq!(live.get::<1>(), "a");
        assert_eq!(value.into_values(), (10, String::from("ax")));
    }

    #[test]
    fn assigns_back_into_proxy() {
        let mut ids = vec![1, 2];
        let mut tags = vec![String::from("a"), String::from("b")];
        {
            let (i, _) = slice_bounds(&mut ids);
            let (t, _) = slice_bounds(&mut tags);
            let first: Pos<'_> = (i, t);
            let mut second = first;
            second.advance_all(1);

            let r1 = unsafe { JointRef::from_positions(&first) };
            let r2 = unsafe { JointRef::from_positions(&second) };
            let saved = r1.to_value();
            r1.assign(&r2);
            r2.assign_value_move(saved);
        }
        assert_eq!(ids, [2, 1]);
        assert_eq!(tags, ["b", "a"]);
    }

    #[test]
    fn proxy_over_own_storage() {
        let mut value: JointValue<Pos<'static>> = JointValue::new((7, String::from("seven")));
        {
            let mut r = unsafe { value.as_joint_ref() };
            assert_eq!(*r.get::<0>(), 7);
            *r.get_mut::<0>() = 8;
        }
        assert_eq!(*value.get::<0>(), 8);
        assert_eq!(value.get::<1>(), "seven");
    }

    #[test]
    fn set_and_assign_ref() {
        let mut ids = vec![4];
        let mut tags = vec![String::from("four")];
        let (i, _) = slice_bounds(&mut ids);
        let (t, _) = slice_bounds(&mut tags);
        let pos: Pos<'_> = (i, t);

        let mut value: JointValue<Pos<'_>> = JointValue::new((0, String::new()));
        value.set_values((1, String::from("one")));
        assert_eq!(*value.get::<0>(), 1);

        let live = unsafe { JointRef::from_positions(&pos) };
        value.assign_ref(&live);
        assert_eq!(value.values(), &(4, String::from("four")));
    }

    #[test]
    fn orders_by_first_component() {
        let a = JointValue::<Pos<'static>>::new((1, String::from("z")));
        let b = JointValue::<Pos<'static>>::new((1, String::from("a")));
        let c = JointValue::<Pos<'static>>::new((2, String::from("a")));
        assert_eq!(a, b);
        assert!(a < c);
        assert_eq!(b.cmp(&c), Ordering::Less);
    }
}
