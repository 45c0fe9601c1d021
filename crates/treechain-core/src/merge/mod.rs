//! Recursive two-tree merges.
//!
//! Four policies share the same shape (`left`, `right` in, new tree out) and
//! differ in how they settle a key present on both sides:
//!
//! | Policy | Colliding scalars | Colliding containers |
//! |---|---|---|
//! | [`merge_deep`] | right wins | plain pairs concatenate, others recurse |
//! | [`merge_assoc`] | right wins unless null | always recurse by key |
//! | [`merge_sum`] | numeric sum | values collected, then summed |
//! | [`merge_sum_values`] | sum, or joined as text | recurse |
//!
//! None of them fail. A type mismatch is resolved by the policy itself.
//! Inputs are never modified.
//!
//! Recursion is bounded only by the depth of the inputs. Feeding a cyclic
//! structure is not possible with owned `Node` trees, and feeding a
//! pathologically deep one is the caller's responsibility.

mod deep;
mod values;

pub use deep::merge_deep;
pub use values::{merge_assoc, merge_sum, merge_sum_values};

use crate::node::{Mapping, Node};

/// A merge policy chosen at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// [`merge_deep`]
    #[default]
    Deep,
    /// [`merge_assoc`]
    Assoc,
    /// [`merge_sum`]
    Sum,
    /// [`merge_sum_values`] joining non-numeric pairs with `glue`.
    SumValues { glue: String },
}

impl MergePolicy {
    /// Merge `right` into `left` under this policy.
    ///
    /// ```
    /// use serde_json::json;
    /// use treechain_core::{MergePolicy, Node};
    ///
    /// let left = Node::from(json!({"a": 1, "b": "x"}));
    /// let right = Node::from(json!({"a": 2, "b": "y"}));
    ///
    /// let deep = MergePolicy::Deep.apply(&left, &right);
    /// assert_eq!(deep, Node::from(json!({"a": 2, "b": "y"})));
    ///
    /// let summed = MergePolicy::SumValues { glue: "-".into() }.apply(&left, &right);
    /// assert_eq!(summed, Node::from(json!({"a": 3, "b": "x-y"})));
    /// ```
    pub fn apply(&self, left: &Node, right: &Node) -> Node {
        match self {
            MergePolicy::Deep => merge_deep(left, right),
            MergePolicy::Assoc => merge_assoc(left, right),
            MergePolicy::Sum => merge_sum(left, right),
            MergePolicy::SumValues { glue } => merge_sum_values(left, right, glue),
        }
    }

    /// The policy's command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            MergePolicy::Deep => "deep",
            MergePolicy::Assoc => "assoc",
            MergePolicy::Sum => "sum",
            MergePolicy::SumValues { .. } => "sum-values",
        }
    }
}

/// Values of `left` then values of `right`, renumbered `0..n-1`.
pub(crate) fn concat(left: &Mapping, right: &Mapping) -> Node {
    Node::Sequence(left.values().chain(right.values()).cloned().collect())
}
