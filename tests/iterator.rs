//! Iterator arithmetic, comparison, and proxy semantics over a pair of
//! sequences.

use joint::{
    JointIter, JointRange, JointRef, JointValue, RandomAccess, SlicePos, make_joint, slice_bounds,
    swap,
};

type Pos<'a> = (SlicePos<'a, String>, SlicePos<'a, i32>);

// =============================================================================
// Test helpers
// =============================================================================

fn fixture() -> (Vec<String>, Vec<i32>) {
    let strings = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let numbers = (1..=10).collect();
    return (strings, numbers);
}

fn bounds<'a>(strings: &'a mut [String], numbers: &'a mut [i32]) -> (JointIter<Pos<'a>>, JointIter<Pos<'a>>) {
    let (s, s_end) = slice_bounds(strings);
    let (n, n_end) = slice_bounds(numbers);
    return (make_joint((s, n)), make_joint((s_end, n_end)));
}

fn string_at(it: JointIter<Pos<'_>>) -> String {
    return unsafe { it.reference() }.get::<0>().clone();
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn distance() {
    let (mut strings, mut numbers) = fixture();
    let (begin, end) = bounds(&mut strings, &mut numbers);
    assert_eq!(end.distance(&begin), 10);
    assert_eq!(end - begin, 10);
    assert_eq!(begin - end, -10);
}

#[test]
fn distance_for_any_arity() {
    let mut a = [0u8; 6];
    let mut b = [0i64; 6];
    let mut c = ['x'; 6];
    let mut d = [(); 6];
    let mut e = [0.0f32; 6];
    let mut f = [""; 6];
    let mut g = [false; 6];
    let mut h = [0u128; 6];

    assert_eq!(JointRange::new((&mut a[..],)).map(|r| r.end() - r.begin()), Ok(6));
    assert_eq!(
        JointRange::new((&mut a[..], &mut b[..], &mut c[..])).map(|r| r.end() - r.begin()),
        Ok(6)
    );
    let eight = JointRange::new((
        &mut a[..],
        &mut b[..],
        &mut c[..],
        &mut d[..],
        &mut e[..],
        &mut f[..],
        &mut g[..],
        &mut h[..],
    ));
    assert_eq!(eight.map(|r| r.len()), Ok(6));
}

#[test]
fn operators() {
    let (mut strings, mut numbers) = fixture();
    let (mut begin, mut end) = bounds(&mut strings, &mut numbers);

    assert_eq!(string_at(begin), "one");
    assert_eq!(string_at(begin.post_increment()), "one");
    assert_eq!(string_at(begin), "two");
    assert_eq!(string_at(*end.decrement()), "ten");
    assert_eq!(string_at(end.post_decrement()), "ten");
    assert_eq!(string_at(end), "nine");

    begin += 2;
    assert_eq!(string_at(begin), "four");
    end -= 3;
    assert_eq!(string_at(end), "six");
    assert_eq!(end - begin, 2);
}

#[test]
fn comparison_matches_component_positions() {
    let (mut strings, mut numbers) = fixture();
    let (begin, _) = bounds(&mut strings, &mut numbers);
    let head = begin.get::<0>();

    for k1 in 0..10isize {
        let i1 = begin + k1;
        let mut j1 = head;
        j1.advance(k1);
        for k2 in 0..10isize {
            let i2 = begin + k2;
            let mut j2 = head;
            j2.advance(k2);
            assert_eq!(j1 == j2, i1 == i2);
            assert_eq!(j1 != j2, i1 != i2);
            assert_eq!(j1 < j2, i1 < i2);
            assert_eq!(j1 > j2, i1 > i2);
            assert_eq!(j1 <= j2, i1 <= i2);
            assert_eq!(j1 >= j2, i1 >= i2);
            assert_eq!(j2.index() - j1.index(), i2 - i1);
        }
    }
}

#[test]
fn every_component_moves_in_lockstep() {
    let (mut strings, mut numbers) = fixture();
    let (begin, end) = bounds(&mut strings, &mut numbers);
    let mut it = begin;
    let mut steps = 0;
    while it != end {
        assert_eq!(it.get::<0>().index(), it.get::<1>().index());
        let r = unsafe { it.reference() };
        assert_eq!(*r.get::<1>(), steps + 1);
        it.increment();
        steps += 1;
    }
    assert_eq!(steps, 10);
    it.advance(-7);
    assert_eq!(it.get::<1>().index(), 3);

    let (s, n) = end.into_positions();
    assert_eq!(s.slice_len(), 10);
    assert_eq!(n.slice_len(), 10);
    assert_eq!(s.index(), n.index());
}

// =============================================================================
// Wrappers
// =============================================================================

#[test]
fn wrappers() {
    let (mut strings, mut numbers) = fixture();
    let (begin, _) = bounds(&mut strings, &mut numbers);

    let mut r1: JointRef<Pos<'_>> = unsafe { begin.reference() };
    assert_eq!(*r1.get::<1>(), 1);
    assert_eq!(r1.get::<0>(), "one");
    *r1.get_mut::<1>() = 10;
    assert_eq!(*unsafe { begin.reference() }.get::<1>(), 10);

    // A snapshot is a copy.
    let mut v1: JointValue<Pos<'_>> = unsafe { begin.read() };
    assert_eq!(*v1.get::<1>(), 10);
    let (_, number) = v1.values_mut();
    *number = 1;
    assert_eq!(*v1.get::<1>(), 1);
    assert_eq!(*r1.get::<1>(), 10);

    // A copied proxy is an alias.
    let mut r2 = r1;
    *r2.get_mut::<1>() = 1;
    assert_eq!(*r1.get::<1>(), 1);
    assert!(r1.aliases(&r2));
    let r5 = r2.alias();
    assert!(r5.aliases(&r1));
    assert_eq!(*r5.get::<1>(), 1);

    // Assigning through a proxy writes the referents.
    let r3 = unsafe { (begin + 1).reference() };
    r1.assign(&r3);
    assert_eq!(r1.get::<0>(), "two");
    assert_eq!(*r1.get::<1>(), 2);
    assert!(!r1.aliases(&r3));

    // Swapping exchanges contents, not the proxies.
    let r4 = unsafe { (begin + 9).reference() };
    swap(r1, r4);
    assert_eq!(r1.get::<0>(), "ten");
    assert_eq!(r4.get::<0>(), "two");

    // Snapshots write back by value.
    let saved = r3.to_value();
    r3.assign_value(&v1);
    assert_eq!(r3.get::<0>(), "one");
    r3.assign_value_move(saved);
    assert_eq!(r3.get::<0>(), "two");

    assert_eq!(strings[0], "ten");
    assert_eq!(numbers[0], 10);
    assert_eq!(strings[9], "two");
    assert_eq!(numbers[9], 2);
}

#[test]
fn the_joint_macro_builds_iterators() {
    let (mut strings, mut numbers) = fixture();
    let (s, s_end) = slice_bounds(&mut strings);
    let (n, n_end) = slice_bounds(&mut numbers);
    let begin = joint::joint!(s, n);
    let end = joint::joint!(s_end, n_end,);
    assert_eq!(end - begin, 10);
}
