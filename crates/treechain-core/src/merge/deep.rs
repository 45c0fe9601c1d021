//! Override-by-chain deep merge.

use super::concat;
use crate::access;
use crate::chain::Chain;
use crate::classify::is_plain;
use crate::node::{Key, Mapping, Node};
use tracing::trace;

/// Merge two trees recursively, `right` winning on conflicts.
///
/// 1. Identical inputs return `right` unchanged.
/// 2. Two plain containers concatenate (`left`'s values, then `right`'s).
/// 3. Otherwise the result is built key by key. Keys only `right` has are
///    placed first, then `left`'s keys in order: a key `right` lacks or
///    holds identically keeps `left`'s value, two plain containers
///    concatenate, two other containers recurse, and anything else takes
///    `right`'s value.
///
/// Every value is written into a single result tree at the full chain from
/// the root, so a result assembled across several levels is reachable by
/// that chain.
///
/// A scalar on either side at the top resolves to `right`.
///
/// ```
/// use serde_json::json;
/// use treechain_core::{merge_deep, Node};
///
/// let left = Node::from(json!({"tags": ["a"], "name": "old"}));
/// let right = Node::from(json!({"tags": ["b"], "name": "new"}));
/// assert_eq!(
///     merge_deep(&left, &right),
///     Node::from(json!({"tags": ["a", "b"], "name": "new"}))
/// );
/// ```
pub fn merge_deep(left: &Node, right: &Node) -> Node {
    let (Some(left_map), Some(right_map)) = (left.as_mapping_view(), right.as_mapping_view()) else {
        return right.clone();
    };
    if left == right {
        return right.clone();
    }
    if is_plain(&left_map) && is_plain(&right_map) {
        return concat(&left_map, &right_map);
    }

    let mut result = Node::empty_mapping();
    let mut chain = Chain::new();
    merge_level(&mut result, &left_map, &right_map, &mut chain);
    result
}

fn merge_level(result: &mut Node, left: &Mapping, right: &Mapping, chain: &mut Chain) {
    trace!(chain = %chain, "deep merge level");

    for (key, value) in right.iter().filter(|(key, _)| !left.contains_key(key)) {
        place(result, chain, key, value.clone());
    }

    for (key, ours) in left.iter() {
        let merged = match right.get(key) {
            None => ours.clone(),
            Some(theirs) if theirs == ours => ours.clone(),
            Some(theirs) => match (ours.as_mapping_view(), theirs.as_mapping_view()) {
                (Some(a), Some(b)) if is_plain(&a) && is_plain(&b) => concat(&a, &b),
                (Some(a), Some(b)) => {
                    chain.push(key.to_string());
                    merge_level(result, &a, &b, chain);
                    chain.pop();
                    continue;
                }
                _ => theirs.clone(),
            },
        };
        place(result, chain, key, merged);
    }
}

fn place(result: &mut Node, chain: &Chain, key: &Key, value: Node) {
    access::place(result, &chain.child(key.to_string()), value);
}
