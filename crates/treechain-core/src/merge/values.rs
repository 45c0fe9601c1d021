//! Whole-tree merges that combine values instead of overriding them.

use crate::classify::unique_keys_union;
use crate::node::{Key, Mapping, Node, Numeric, Scalar, NULL};
use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Key-wise merge that ignores nulls on the right.
///
/// Over the union of keys: two containers recurse, otherwise `right`'s value
/// wins unless it is null or absent, in which case `left`'s value is kept.
/// Plainness plays no part; lists merge position by position.
///
/// ```
/// use serde_json::json;
/// use treechain_core::{merge_assoc, Node};
///
/// let left = Node::from(json!({"a": 1, "b": {"c": 2, "d": 3}}));
/// let right = Node::from(json!({"a": null, "b": {"c": 9}}));
/// assert_eq!(
///     merge_assoc(&left, &right),
///     Node::from(json!({"a": 1, "b": {"c": 9, "d": 3}}))
/// );
/// ```
pub fn merge_assoc(left: &Node, right: &Node) -> Node {
    match (left.as_mapping_view(), right.as_mapping_view()) {
        (Some(l), Some(r)) => Node::Mapping(assoc_level(&l, &r)),
        _ if right.is_null() => left.clone(),
        _ => right.clone(),
    }
}

fn assoc_level(left: &Mapping, right: &Mapping) -> Mapping {
    unique_keys_union(left, right)
        .into_iter()
        .map(|key| {
            let ours = left.get(&key).unwrap_or(&NULL);
            let theirs = right.get(&key).unwrap_or(&NULL);
            let merged = if ours.is_container() && theirs.is_container() {
                merge_assoc(ours, theirs)
            } else if theirs.is_null() {
                ours.clone()
            } else {
                theirs.clone()
            };
            (key, merged)
        })
        .collect()
}

/// Structural sum.
///
/// The two top-level mappings are first combined the way a recursive array
/// merge does it: indexed entries are appended and renumbered, named entries
/// that collide are collected into a list (recursively, when both are
/// containers). Every top-level value that is a container after that step is
/// then replaced by the sum of its numeric elements.
///
/// Colliding scalars therefore add up, and keys only one side has pass
/// through unchanged unless they already held a list.
///
/// ```
/// use serde_json::json;
/// use treechain_core::{merge_sum, Node};
///
/// let left = Node::from(json!({"a": 1, "b": 2.5, "only_left": "x"}));
/// let right = Node::from(json!({"a": 4, "b": 1}));
/// assert_eq!(
///     merge_sum(&left, &right),
///     Node::from(json!({"a": 5, "b": 3.5, "only_left": "x"}))
/// );
/// ```
pub fn merge_sum(left: &Node, right: &Node) -> Node {
    let (Some(l), Some(r)) = (left.as_mapping_view(), right.as_mapping_view()) else {
        return right.clone();
    };
    merge_recursive(&l, &r)
        .into_iter()
        .map(|(key, value)| {
            let value = match value.as_mapping_view() {
                Some(collected) => Node::Scalar(sum_elements(collected.values()).into()),
                None => value,
            };
            (key, value)
        })
        .collect::<Mapping>()
        .into()
}

fn merge_recursive(left: &Mapping, right: &Mapping) -> Mapping {
    let mut merged = Mapping::new();
    let mut next_index = 0i64;
    for (key, value) in left.iter().chain(right.iter()) {
        if let Key::Index(_) = key {
            merged.insert(Key::Index(next_index), value.clone());
            next_index += 1;
            continue;
        }
        let combined = match merged.get(key) {
            Some(existing) => Node::Mapping(merge_recursive(&as_list(existing), &as_list(value))),
            None => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    merged
}

/// A container as a mapping, or a scalar wrapped as a one-element list.
fn as_list(node: &Node) -> Cow<'_, Mapping> {
    node.as_mapping_view()
        .unwrap_or_else(|| Cow::Owned(Mapping::from(vec![node.clone()])))
}

/// Add up the numeric elements. Booleans count as `0`/`1`, nested containers
/// and non-numeric strings are skipped.
fn sum_elements<'a>(values: impl Iterator<Item = &'a Node>) -> Numeric {
    values.fold(Numeric::Int(0), |total, value| match value {
        Node::Scalar(Scalar::Bool(b)) => total.add(Numeric::Int(i64::from(*b))),
        Node::Scalar(scalar) => match scalar.numeric() {
            Some(number) => total.add(number),
            None => {
                trace!(kind = value.kind(), "sum skips non-numeric element");
                total
            }
        },
        _ => total,
    })
}

/// Typed combine with a separator.
///
/// Over the union of keys: two containers recurse. Nested levels join with
/// the same `glue` as the top level, never with an empty separator.
/// Otherwise a container on one side is flattened to compact JSON, then two
/// numeric values are added and anything else is joined as
/// `left + glue + right`. A key only one side has counts the other side as
/// `0`, so a numeric value is normalised (`"2"` becomes `2`) and a
/// non-numeric one is kept as it is.
///
/// ```
/// use serde_json::json;
/// use treechain_core::{merge_sum_values, Node};
///
/// let left = Node::from(json!({"a": 2, "b": "abc", "c": "x"}));
/// let right = Node::from(json!({"a": "1", "b": "def"}));
/// assert_eq!(
///     merge_sum_values(&left, &right, ""),
///     Node::from(json!({"a": 3, "b": "abcdef", "c": "x"}))
/// );
/// ```
pub fn merge_sum_values(left: &Node, right: &Node, glue: &str) -> Node {
    match (left.as_mapping_view(), right.as_mapping_view()) {
        (Some(l), Some(r)) => Node::Mapping(sum_values_level(&l, &r, glue)),
        _ => combine(Some(left), Some(right), glue),
    }
}

fn sum_values_level(left: &Mapping, right: &Mapping, glue: &str) -> Mapping {
    unique_keys_union(left, right)
        .into_iter()
        .map(|key| {
            let ours = left.get(&key);
            let theirs = right.get(&key);
            let merged = match (ours, theirs) {
                (Some(a), Some(b)) if a.is_container() && b.is_container() => {
                    merge_sum_values(a, b, glue)
                }
                _ => combine(ours, theirs, glue),
            };
            (key, merged)
        })
        .collect()
}

fn combine(ours: Option<&Node>, theirs: Option<&Node>, glue: &str) -> Node {
    let a = ours.map(flatten);
    let b = theirs.map(flatten);

    let zero = Some(Numeric::Int(0));
    let na = a.as_ref().map_or(zero, Scalar::numeric);
    let nb = b.as_ref().map_or(zero, Scalar::numeric);
    if let (Some(x), Some(y)) = (na, nb) {
        return Node::Scalar(x.add(y).into());
    }

    match (a, b) {
        (Some(a), Some(b)) => {
            debug!(left = %a.flat_string(), right = %b.flat_string(), "joining non-numeric pair as text");
            Node::Scalar(Scalar::Str(format!(
                "{}{glue}{}",
                a.flat_string(),
                b.flat_string()
            )))
        }
        _ => ours.or(theirs).cloned().unwrap_or_else(Node::null),
    }
}

/// A scalar as is, a container as compact JSON text.
fn flatten(node: &Node) -> Scalar {
    match node {
        Node::Scalar(scalar) => scalar.clone(),
        container => Scalar::Str(Value::from(container).to_string()),
    }
}
