//! Key selection, renaming, occurrence counting and required-key checks.

use crate::error::{ChainError, Result};
use crate::node::{Key, Mapping, Node, Scalar};

/// What [`count_occurrences`] compares against the needle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Keys,
    Values,
}

/// Top-level entries whose key is in `allowed`, in their original order.
pub fn include_keys(map: &Mapping, allowed: &[&str]) -> Mapping {
    let allowed: Vec<Key> = allowed.iter().map(|k| Key::parse(k)).collect();
    map.iter()
        .filter(|(key, _)| allowed.contains(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Top-level entries whose key is not in `excluded`, in their original order.
pub fn exclude_keys(map: &Mapping, excluded: &[&str]) -> Mapping {
    let excluded: Vec<Key> = excluded.iter().map(|k| Key::parse(k)).collect();
    map.iter()
        .filter(|(key, _)| !excluded.contains(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Move the value under `old` to `new`.
///
/// The moved entry goes to the end unless `new` already exists, in which
/// case it is overwritten in place. An absent `old` (or one holding null)
/// returns the mapping unchanged.
pub fn rename_key(map: &Mapping, old: &str, new: &str) -> Mapping {
    let old = Key::parse(old);
    let mut renamed = map.clone();
    match renamed.remove(&old) {
        Some(value) if !value.is_null() => {
            renamed.insert(Key::parse(new), value);
            renamed
        }
        _ => map.clone(),
    }
}

/// Count leaf positions whose key or value loosely equals `needle`.
///
/// Containers are descended into rather than compared, so with
/// [`Target::Keys`] the key that leads to a nested list is not counted.
/// Comparison follows [`Scalar::loosely_equals`].
///
/// ```
/// use serde_json::json;
/// use treechain_core::select::{count_occurrences, Target};
/// use treechain_core::{Node, Scalar};
///
/// let tree = Node::from(json!([0, 0, [0, 1]]));
/// assert_eq!(count_occurrences(&tree, &Scalar::Int(0), Target::Values), 3);
/// assert_eq!(count_occurrences(&tree, &Scalar::Int(0), Target::Keys), 2);
/// ```
pub fn count_occurrences(tree: &Node, needle: &Scalar, target: Target) -> usize {
    tree.entries()
        .map(|(key, value)| match value {
            Node::Scalar(scalar) => {
                let matched = match target {
                    Target::Keys => key.to_scalar().loosely_equals(needle),
                    Target::Values => scalar.loosely_equals(needle),
                };
                usize::from(matched)
            }
            container => count_occurrences(container, needle, target),
        })
        .sum()
}

/// Fail with [`ChainError::MissingRequiredKeys`] naming every key of
/// `required` that `tree` lacks at the top level.
///
/// ```
/// use serde_json::json;
/// use treechain_core::select::check_required_keys;
/// use treechain_core::Node;
///
/// let tree = Node::from(json!({"user": "u", "pass": "p"}));
/// assert!(check_required_keys(&["user", "pass"], &tree).is_ok());
///
/// let err = check_required_keys(&["user", "token", "scope"], &tree).unwrap_err();
/// assert_eq!(err.to_string(), "missing keys: token, scope");
/// ```
pub fn check_required_keys(required: &[&str], tree: &Node) -> Result<()> {
    if !tree.is_container() {
        return Err(ChainError::InvalidRootKind { found: tree.kind() });
    }
    let missing: Vec<String> = required
        .iter()
        .filter(|key| tree.child(&Key::parse(key)).is_none())
        .map(|key| key.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ChainError::MissingRequiredKeys { missing })
    }
}
