//! Chains: ordered key segments addressing a value inside a tree.
//!
//! The textual form joins segments with a single separator character
//! (default `:`). There is no escaping: `"a::b"` is the three segments
//! `a`, `""`, `b`, and a segment can never contain the separator.
//!
//! Internally the engine carries [`Chain`] values and only joins them at the
//! API boundary, so keys that happen to contain the separator survive a
//! recursive merge untouched.

use crate::node::Key;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separator used when none is given.
pub const DEFAULT_SEPARATOR: char = ':';

/// An ordered list of key segments.
///
/// [`Chain::parse`] always yields at least one segment. An empty chain only
/// exists as the starting prefix of a recursive walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Chain {
    segments: Vec<String>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split on `separator`, keeping empty segments.
    ///
    /// ```
    /// use treechain_core::Chain;
    ///
    /// let chain = Chain::parse("a::b", ':');
    /// assert_eq!(chain.segments(), ["a", "", "b"]);
    /// ```
    pub fn parse(chain: &str, separator: char) -> Self {
        Self {
            segments: chain.split(separator).map(str::to_string).collect(),
        }
    }

    /// Join segments with `separator`.
    pub fn serialize(&self, separator: char) -> String {
        let mut buf = [0u8; 4];
        self.segments.join(separator.encode_utf8(&mut buf))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments parsed as mapping keys.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.segments.iter().map(|segment| Key::parse(segment))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    /// A new chain with one more segment.
    pub fn child(&self, segment: impl Into<String>) -> Chain {
        let mut chain = self.clone();
        chain.push(segment);
        chain
    }

    /// A new chain without the final segment.
    pub fn parent(&self) -> Chain {
        let mut chain = self.clone();
        chain.pop();
        chain
    }
}

impl fmt::Display for Chain {
    /// Joins with [`DEFAULT_SEPARATOR`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(DEFAULT_SEPARATOR))
    }
}

impl FromStr for Chain {
    type Err = Infallible;

    /// Parses with [`DEFAULT_SEPARATOR`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Chain::parse(s, DEFAULT_SEPARATOR))
    }
}

impl<S: Into<String>> FromIterator<S> for Chain {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Free-function form of [`Chain::parse`].
pub fn parse(chain: &str, separator: char) -> Chain {
    Chain::parse(chain, separator)
}

/// Free-function form of [`Chain::serialize`].
pub fn serialize(chain: &Chain, separator: char) -> String {
    chain.serialize(separator)
}

/// Remove the final segment of a serialized chain.
///
/// `"a:b:c"` becomes `"a:b"`; a single-segment chain becomes `""`.
pub fn drop_last_segment(chain: &str, separator: char) -> String {
    Chain::parse(chain, separator).parent().serialize(separator)
}
