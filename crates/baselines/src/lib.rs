//! Conventional ways of sorting a pair of parallel sequences by the first.
//!
//! These are the approaches a joint iterator replaces, kept here so tests
//! and benchmarks can check it against them:
//!
//! - [`aggregate_sort`]: move every row into a vector of records, sort that,
//!   and move the rows back out.
//! - [`permutation_sort`]: sort a vector of indices by key, then apply the
//!   resulting permutation to both sequences.

/// Sort `keys` and `values` together by key through a vector of records.
///
/// Panics if the two vectors differ in length.
pub fn aggregate_sort<K: Ord, V>(keys: &mut Vec<K>, values: &mut Vec<V>) {
    assert_eq!(keys.len(), values.len(), "sequences differ in length");
    let mut rows: Vec<(K, V)> = keys.drain(..).zip(values.drain(..)).collect();
    rows.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    for (key, value) in rows {
        keys.push(key);
        values.push(value);
    }
}

/// Sort `keys` and `values` together by key through a permutation vector.
///
/// Panics if the two vectors differ in length.
pub fn permutation_sort<K: Ord, V>(keys: &mut [K], values: &mut [V]) {
    assert_eq!(keys.len(), values.len(), "sequences differ in length");
    let mut permutation: Vec<usize> = (0..keys.len()).collect();
    permutation.sort_unstable_by(|&a, &b| keys[a].cmp(&keys[b]));
    apply_permutation(keys, &permutation);
    apply_permutation(values, &permutation);
}

/// Reorder `items` so that position `i` receives the item that was at
/// `permutation[i]`. Follows each cycle once, swapping in place.
pub fn apply_permutation<T>(items: &mut [T], permutation: &[usize]) {
    let mut done = vec![false; items.len()];
    for start in 0..items.len() {
        if done[start] {
            continue;
        }
        let mut current = start;
        loop {
            done[current] = true;
            let next = permutation[current];
            if next == start {
                break;
            }
            items.swap(current, next);
            current = next;
        }
    }
}
