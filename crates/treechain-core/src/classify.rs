//! Container classification: plain vs associative mappings, key unions and
//! numeric key bookkeeping.
//!
//! Every predicate here is pure and recomputed on demand. Nothing caches a
//! classification on the tree, since any `set` or `unset` can flip it.

use crate::node::{Key, Mapping};

/// Whether the mapping's keys, sorted, are exactly `0..n-1`.
///
/// Iteration order does not matter: `{2: c, 0: a, 1: b}` is plain.
/// The empty mapping is plain.
///
/// ```
/// use serde_json::json;
/// use treechain_core::{classify, Node};
///
/// let node = Node::from(json!({"1": "b", "0": "a"}));
/// assert!(classify::is_plain(node.as_mapping().unwrap()));
///
/// let node = Node::from(json!({"0": "a", "x": "b"}));
/// assert!(!classify::is_plain(node.as_mapping().unwrap()));
/// ```
pub fn is_plain(map: &Mapping) -> bool {
    let len = map.len();
    // Keys are unique, so n distinct indexes inside 0..n cover the range.
    map.keys().all(|key| {
        key.as_index()
            .and_then(|index| usize::try_from(index).ok())
            .is_some_and(|index| index < len)
    })
}

/// Plain, and the keys also appear as `0, 1, 2, ...` in iteration order.
pub fn is_sequential(map: &Mapping) -> bool {
    map.keys()
        .enumerate()
        .all(|(position, key)| key.as_index() == i64::try_from(position).ok())
}

/// Keys of `a` followed by the keys of `b` that `a` lacks.
pub fn unique_keys_union(a: &Mapping, b: &Mapping) -> Vec<Key> {
    a.keys()
        .chain(b.keys().filter(|key| !a.contains_key(key)))
        .cloned()
        .collect()
}

/// The largest numeric key, truncated to an integer. Non-numeric keys and
/// negative keys are ignored; a mapping with no qualifying key yields `0`.
pub fn highest_numeric_key(map: &Mapping) -> i64 {
    map.keys()
        .filter_map(Key::numeric)
        .map(|number| number.truncate())
        .fold(0, i64::max)
}

/// One past [`highest_numeric_key`].
pub fn next_free_numeric_key(map: &Mapping) -> i64 {
    highest_numeric_key(map).saturating_add(1)
}

/// The first integer, counting up from `1`, that is not used as a key.
///
/// Walks the numeric keys in ascending order and stops at the first gap:
/// `{1, 2, 4}` yields `3`, `{1, 2, 3}` yields `4`, `{2, 3}` yields `1`.
/// Keys below `1` are not part of the sequence.
pub fn first_free_numeric_key(map: &Mapping) -> i64 {
    let mut taken: Vec<i64> = map
        .keys()
        .filter_map(Key::numeric)
        .map(|number| number.truncate())
        .filter(|&n| n >= 1)
        .collect();
    taken.sort_unstable();
    taken.dedup();

    let mut expected = 1;
    for n in taken {
        if n != expected {
            break;
        }
        expected += 1;
    }
    expected
}
