//! Read, write and remove values at a chain inside a mapping root.
//!
//! Missing paths are ordinary results: `get` returns `None` and `unset` does
//! nothing. Only a non-mapping root, an empty chain, or a `set` that would
//! have to descend through a non-null scalar is an error.
//!
//! Below the root, sequences are addressable too: a segment that parses as an
//! in-range index selects an element.

use crate::chain::Chain;
use crate::error::{ChainError, Result};
use crate::node::{Key, Node};

/// Look up the value at `chain`.
///
/// ```
/// use serde_json::json;
/// use treechain_core::{access, Chain, Node};
///
/// let root = Node::from(json!({"lvl_1": {"lvl_2": {"lvl_3": "val"}}}));
/// let found = access::get(&root, &"lvl_1:lvl_2:lvl_3".parse::<Chain>().unwrap()).unwrap();
/// assert_eq!(found, Some(&Node::from(json!("val"))));
///
/// let missing = access::get(&root, &Chain::parse("lvl_1:lvl_2:lvl_4", ':')).unwrap();
/// assert_eq!(missing, None);
/// ```
pub fn get<'a>(root: &'a Node, chain: &Chain) -> Result<Option<&'a Node>> {
    require_mapping(root)?;
    let (last, parents) = split(chain)?;

    let mut current = root;
    for segment in parents {
        match current.child(&Key::parse(segment)) {
            Some(next) if next.is_container() => current = next,
            _ => return Ok(None),
        }
    }
    Ok(current.child(&Key::parse(last)))
}

/// Write `value` at `chain`, creating intermediate mappings as needed.
///
/// An intermediate segment that is missing or `null` becomes an empty
/// mapping. One holding any other scalar is left alone and the call fails
/// with [`ChainError::NotAddressable`]. The final segment is always
/// overwritten.
pub fn set(root: &mut Node, chain: &Chain, value: Node) -> Result<()> {
    require_mapping(root)?;
    let (last, parents) = split(chain)?;
    set_under(root, parents, 0, Key::parse(last), value)
}

/// Remove the value at `chain`. A path that does not exist is a no-op.
pub fn unset(root: &mut Node, chain: &Chain) -> Result<()> {
    require_mapping(root)?;
    let (last, parents) = split(chain)?;

    let mut current = root;
    for segment in parents {
        match current.child_mut(&Key::parse(segment)) {
            Some(next) if next.is_container() => current = next,
            _ => return Ok(()),
        }
    }
    current.remove_child(&Key::parse(last));
    Ok(())
}

/// [`get`] with a serialized chain.
pub fn get_by_chain<'a>(root: &'a Node, chain: &str, separator: char) -> Result<Option<&'a Node>> {
    get(root, &Chain::parse(chain, separator))
}

/// [`set`] with a serialized chain.
pub fn set_by_chain(root: &mut Node, chain: &str, value: Node, separator: char) -> Result<()> {
    set(root, &Chain::parse(chain, separator), value)
}

/// [`unset`] with a serialized chain.
pub fn unset_by_chain(root: &mut Node, chain: &str, separator: char) -> Result<()> {
    unset(root, &Chain::parse(chain, separator))
}

/// Write used by the merge engine while it builds a result tree.
///
/// Any non-container intermediate is replaced, and an empty chain replaces
/// the root itself, so this never fails.
pub(crate) fn place(root: &mut Node, chain: &Chain, value: Node) {
    match chain.segments().split_last() {
        None => *root = value,
        Some((last, parents)) => place_under(root, parents, Key::parse(last), value),
    }
}

fn set_under(node: &mut Node, parents: &[String], depth: usize, last: Key, value: Node) -> Result<()> {
    let Some(segment) = parents.get(depth) else {
        node.insert_child(last, value);
        return Ok(());
    };
    let key = Key::parse(segment);
    match node.child_mut(&key) {
        Some(child) if child.is_container() => {
            return set_under(child, parents, depth + 1, last, value);
        }
        Some(child) if !child.is_null() => {
            return Err(ChainError::NotAddressable {
                chain: parents[..=depth].iter().collect::<Chain>().to_string(),
                found: child.kind(),
            });
        }
        _ => {}
    }
    // Below a fresh mapping every segment is missing, so this cannot fail.
    let mut child = Node::empty_mapping();
    set_under(&mut child, parents, depth + 1, last, value)?;
    node.insert_child(key, child);
    Ok(())
}

fn place_under(node: &mut Node, parents: &[String], last: Key, value: Node) {
    let Some((segment, rest)) = parents.split_first() else {
        node.insert_child(last, value);
        return;
    };
    let key = Key::parse(segment);
    if let Some(child) = node.child_mut(&key).filter(|child| child.is_container()) {
        place_under(child, rest, last, value);
        return;
    }
    let mut child = Node::empty_mapping();
    place_under(&mut child, rest, last, value);
    node.insert_child(key, child);
}

fn require_mapping(root: &Node) -> Result<()> {
    match root {
        Node::Mapping(_) => Ok(()),
        other => Err(ChainError::InvalidRootKind { found: other.kind() }),
    }
}

fn split(chain: &Chain) -> Result<(&String, &[String])> {
    chain.segments().split_last().ok_or(ChainError::EmptyChain)
}
