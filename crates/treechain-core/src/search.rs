//! Depth-bounded search for a key anywhere in a tree.

use crate::chain::Chain;
use crate::error::{ChainError, Result};
use crate::node::Node;
use tracing::{debug, trace};

/// Depth ceiling used when the caller has no better bound.
pub const DEFAULT_MAX_DEPTH: usize = 255;

/// A successful search: where the key was found and what it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Found<'a> {
    /// Chain from the root to the matching key, including the key itself.
    pub chain: Chain,
    pub value: &'a Node,
}

impl Found<'_> {
    /// The chain joined with `separator`.
    pub fn chain_string(&self, separator: char) -> String {
        self.chain.serialize(separator)
    }
}

/// Find the first key equal to `needle`, depth first, in iteration order.
///
/// Keys are compared by their string form, so `"0"` matches a sequence
/// index. A miss is `Ok(None)`. Descending past `max_depth` levels fails with
/// [`ChainError::DepthExceeded`] instead, since it signals input far deeper
/// than any real document.
///
/// ```
/// use serde_json::json;
/// use treechain_core::{search_key_deep, Node, DEFAULT_MAX_DEPTH};
///
/// let tree = Node::from(json!({"a": {"b": 1}, "c": {"d": {"e": 2}}}));
/// let found = search_key_deep(&tree, "e", DEFAULT_MAX_DEPTH).unwrap().unwrap();
/// assert_eq!(found.chain_string(':'), "c:d:e");
/// assert_eq!(found.value, &Node::from(json!(2)));
/// ```
pub fn search_key_deep<'a>(tree: &'a Node, needle: &str, max_depth: usize) -> Result<Option<Found<'a>>> {
    let mut chain = Chain::new();
    search_level(tree, needle, &mut chain, max_depth)
}

fn search_level<'a>(
    node: &'a Node,
    needle: &str,
    chain: &mut Chain,
    max_depth: usize,
) -> Result<Option<Found<'a>>> {
    if chain.len() >= max_depth {
        debug!(max_depth, chain = %chain, "key search hit its depth ceiling");
        return Err(ChainError::DepthExceeded {
            max_depth,
            chain: chain.to_string(),
        });
    }

    for (key, value) in node.entries() {
        let segment = key.to_string();
        if segment == needle {
            chain.push(segment);
            return Ok(Some(Found {
                chain: chain.clone(),
                value,
            }));
        }
        if value.is_container() {
            chain.push(segment);
            trace!(chain = %chain, "key search descending");
            if let Some(found) = search_level(value, needle, chain, max_depth)? {
                return Ok(Some(found));
            }
            // Siblings must not see the failed branch's segment.
            chain.pop();
        }
    }
    Ok(None)
}
