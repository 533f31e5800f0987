use super::copy::copy;
use super::less_at;
use crate::cursor::RandomAccessIterator;

/// Merge the sorted ranges `[first1, last1)` and `[first2, last2)` into the
/// range starting at `result`, by the references' own ordering.
///
/// # Safety
///
/// Both inputs must be valid ranges, the output must be valid for the
/// combined length, and the output must not overlap either input.
pub unsafe fn merge<I, O>(first1: I, last1: I, first2: I, last2: I, result: O) -> O
where
    I: RandomAccessIterator,
    I::Reference: PartialOrd,
    O: RandomAccessIterator<Value = I::Value>,
{
    // SAFETY: forwarded to the caller.
    return unsafe { merge_by(first1, last1, first2, last2, result, |a, b| a < b) };
}

/// [`merge`] with a comparator. Stable: of two equal elements, the one from
/// the first range is written first.
///
/// # Safety
///
/// As for [`merge`].
pub unsafe fn merge_by<I, O, F>(
    first1: I,
    last1: I,
    first2: I,
    last2: I,
    result: O,
    mut less: F,
) -> O
where
    I: RandomAccessIterator,
    O: RandomAccessIterator<Value = I::Value>,
    F: FnMut(&I::Reference, &I::Reference) -> bool,
{
    let mut first1 = first1;
    let mut first2 = first2;
    let mut result = result;
    // SAFETY: every position dereferenced lies inside its range.
    unsafe {
        while first1 < last1 && first2 < last2 {
            if less_at(&first2, &first1, &mut less) {
                result.write(first2.read());
                first2.advance(1);
            } else {
                result.write(first1.read());
                first1.advance(1);
            }
            result.advance(1);
        }
        let result = copy(first1, last1, result);
        return copy(first2, last2, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iter::{JointIter, make_joint};
    use crate::position::{SlicePos, slice_bounds};
    use crate::reference::JointRef;

    type Pair<'a> = (SlicePos<'a, u8>, SlicePos<'a, char>);
    type Iter<'a> = JointIter<Pair<'a>>;

    fn bounds<'a>(keys: &'a mut [u8], tags: &'a mut [char]) -> (Iter<'a>, Iter<'a>) {
        let (k, k_end) = slice_bounds(keys);
        let (t, t_end) = slice_bounds(tags);
        return (make_joint((k, t)), make_joint((k_end, t_end)));
    }

    #[test]
    fn merges_stably() {
        let mut keys1 = vec![1, 3, 3, 7];
        let mut tags1 = vec!['a', 'b', 'c', 'd'];
        let mut keys2 = vec![0, 3, 8];
        let mut tags2 = vec!['x', 'y', 'z'];
        let mut keys = vec![0; 7];
        let mut tags = vec![' '; 7];
        {
            let (first1, last1) = bounds(&mut keys1, &mut tags1);
            let (first2, last2) = bounds(&mut keys2, &mut tags2);
            let (out, out_end) = bounds(&mut keys, &mut tags);
            let end = unsafe {
                merge_by(first1, last1, first2, last2, out, |a: &JointRef<Pair>, b: &JointRef<Pair>| {
                    a.get::<0>() < b.get::<0>()
                })
            };
            assert_eq!(end, out_end);
        }
        assert_eq!(keys, [0, 1, 3, 3, 3, 7, 8]);
        assert_eq!(tags, ['x', 'a', 'b', 'c', 'y', 'd', 'z']);
    }

    #[test]
    fn merges_with_an_empty_side() {
        let mut keys1 = vec![2, 4];
        let mut tags1 = vec!['a', 'b'];
        let mut keys = vec![0; 2];
        let mut tags = vec![' '; 2];
        {
            let (first1, last1) = bounds(&mut keys1, &mut tags1);
            let (out, _) = bounds(&mut keys, &mut tags);
            unsafe { merge(last1, last1, first1, last1, out) };
        }
        assert_eq!(keys, [2, 4]);
        assert_eq!(tags, ['a', 'b']);
    }
}
