//! JSON text in and out of `Node` trees.
//!
//! `serde_json` (with `preserve_order`) does the parsing and printing; this
//! module only moves between its `Value` and [`Node`].

use crate::error::Result;
use crate::merge::MergePolicy;
use crate::node::Node;
use serde_json::Value;

/// Parse a JSON document into a tree.
pub fn decode(json: &str) -> Result<Node> {
    let value: Value = serde_json::from_str(json)?;
    Ok(Node::from(value))
}

/// Compact JSON for a tree.
pub fn encode(node: &Node) -> Result<String> {
    Ok(serde_json::to_string(node)?)
}

/// Indented JSON for a tree.
pub fn encode_pretty(node: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(node)?)
}

/// Decode two documents, merge them under `policy`, and encode the result.
///
/// # Errors
///
/// Returns an error if either input is not valid JSON.
///
/// ```
/// use treechain_core::{json, MergePolicy};
///
/// let merged = json::merge_json(r#"{"a":1}"#, r#"{"b":2}"#, &MergePolicy::Deep).unwrap();
/// assert_eq!(merged, r#"{"b":2,"a":1}"#);
/// ```
pub fn merge_json(left: &str, right: &str, policy: &MergePolicy) -> Result<String> {
    let left = decode(left)?;
    let right = decode(right)?;
    encode(&policy.apply(&left, &right))
}
