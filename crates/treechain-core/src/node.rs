//! The `Node` value model: scalars, sequences and insertion-ordered mappings.
//!
//! A decoded JSON document becomes a `Node` tree. Object keys that spell a
//! canonical integer (`"0"`, `"17"`, `"-3"`) become [`Key::Index`], so a JSON
//! object `{"0": "a", "1": "b"}` and the array `["a", "b"]` describe the same
//! list. Equality follows that rule: a `Sequence` equals a `Mapping` whose
//! entries are `0..n-1` in order.
//!
//! Plainness is never stored on a node. It is recomputed by
//! [`crate::classify`] whenever a merge needs it, because any mutation can
//! change it.

use crate::classify;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::fmt;

/// A mapping key: either an integer index or a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    /// Parse a chain segment or JSON object key.
    ///
    /// Canonical decimal integers become `Index`; everything else (including
    /// `"007"`, `"-0"`, `"+1"` and `"1.0"`) stays a `Name`, so
    /// `Key::parse(s).to_string() == s` for every input.
    pub fn parse(segment: &str) -> Self {
        if is_canonical_integer(segment) {
            if let Ok(index) = segment.parse::<i64>() {
                return Key::Index(index);
            }
        }
        Key::Name(segment.to_string())
    }

    /// The integer value of an `Index` key.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    /// The key read as a number: indexes always, names when they are numeric
    /// strings such as `"2.5"` or `"1e3"`.
    pub fn numeric(&self) -> Option<Numeric> {
        match self {
            Key::Index(index) => Some(Numeric::Int(*index)),
            Key::Name(name) => parse_numeric(name),
        }
    }

    /// The key as a scalar, for comparisons against values.
    pub fn to_scalar(&self) -> Scalar {
        match self {
            Key::Index(index) => Scalar::Int(*index),
            Key::Name(name) => Scalar::Str(name.clone()),
        }
    }

    /// The same key in canonical form: a `Name` spelling a canonical
    /// integer becomes the `Index` it spells.
    pub fn canonical(self) -> Key {
        match self {
            Key::Name(name) if is_canonical_integer(&name) => Key::parse(&name),
            key => key,
        }
    }

    fn position(&self) -> Option<usize> {
        match self {
            Key::Index(index) => usize::try_from(*index).ok(),
            Key::Name(name) if is_canonical_integer(name) => name.parse().ok(),
            Key::Name(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Key {
    fn from(segment: &str) -> Self {
        Key::parse(segment)
    }
}

impl From<String> for Key {
    fn from(segment: String) -> Self {
        Key::parse(&segment)
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<usize> for Key {
    fn from(position: usize) -> Self {
        Key::Index(i64::try_from(position).unwrap_or(i64::MAX))
    }
}

/// `0`, `42`, `-7` qualify; `007`, `-0`, `+1`, `""` do not.
fn is_canonical_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits == "0" {
        return digits.len() == s.len();
    }
    !digits.starts_with('0')
}

/// A number read out of a scalar or key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    /// Sum two numbers. Integer overflow falls back to float arithmetic.
    pub fn add(self, other: Numeric) -> Numeric {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a
                .checked_add(b)
                .map(Numeric::Int)
                .unwrap_or(Numeric::Float(a as f64 + b as f64)),
            (a, b) => Numeric::Float(a.as_f64() + b.as_f64()),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(n) => n as f64,
            Numeric::Float(f) => f,
        }
    }

    /// Truncate towards zero, saturating at the `i64` bounds.
    pub fn truncate(self) -> i64 {
        match self {
            Numeric::Int(n) => n,
            Numeric::Float(f) => f as i64,
        }
    }
}

impl From<Numeric> for Scalar {
    fn from(number: Numeric) -> Self {
        match number {
            Numeric::Int(n) => Scalar::Int(n),
            Numeric::Float(f) => Scalar::Float(f),
        }
    }
}

/// Read a numeric string: optional sign, digits with at most one `.`, and an
/// optional exponent. Surrounding whitespace is ignored.
pub(crate) fn parse_numeric(s: &str) -> Option<Numeric> {
    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    let mut digits = 0;
    let mut dots = 0;
    for b in mantissa.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }
    if let Some(exponent) = exponent {
        let exponent_digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if exponent_digits.is_empty() || !exponent_digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }

    if dots == 0 && exponent.is_none() {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(Numeric::Int(n));
        }
    }
    trimmed.parse::<f64>().ok().map(Numeric::Float)
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// The scalar read as a number. Booleans and null are not numeric.
    pub fn numeric(&self) -> Option<Numeric> {
        match self {
            Scalar::Int(n) => Some(Numeric::Int(*n)),
            Scalar::Float(f) => Some(Numeric::Float(*f)),
            Scalar::Str(s) => parse_numeric(s),
            Scalar::Null | Scalar::Bool(_) => None,
        }
    }

    /// Render the scalar the way string concatenation sees it:
    /// null and `false` are empty, `true` is `"1"`.
    pub fn flat_string(&self) -> String {
        match self {
            Scalar::Null | Scalar::Bool(false) => String::new(),
            Scalar::Bool(true) => "1".to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Str(s) => s.clone(),
        }
    }

    fn truthy(&self) -> bool {
        match self {
            Scalar::Null => false,
            Scalar::Bool(b) => *b,
            Scalar::Int(n) => *n != 0,
            Scalar::Float(f) => *f != 0.0,
            Scalar::Str(s) => !s.is_empty() && s != "0",
        }
    }

    /// Loose comparison used by occurrence counting.
    ///
    /// Two numeric scalars compare by value (`"1" ~ 1`), a boolean or null on
    /// either side compares by truthiness, anything else compares as text.
    pub fn loosely_equals(&self, other: &Scalar) -> bool {
        if let (Some(a), Some(b)) = (self.numeric(), other.numeric()) {
            return a.as_f64() == b.as_f64();
        }
        match (self, other) {
            (Scalar::Null | Scalar::Bool(_), _) | (_, Scalar::Null | Scalar::Bool(_)) => {
                self.truthy() == other.truthy()
            }
            _ => self.flat_string() == other.flat_string(),
        }
    }
}

impl From<Number> for Scalar {
    fn from(number: Number) -> Self {
        match number.as_i64() {
            Some(n) => Scalar::Int(n),
            None => Scalar::Float(number.as_f64().unwrap_or(f64::NAN)),
        }
    }
}

/// An insertion-ordered map from [`Key`] to [`Node`].
///
/// Entries are kept as `(Key, Node)` pairs in a `Vec`, so iteration order is
/// always insertion order. Lookups are linear.
///
/// Keys are stored in [`Key::canonical`] form and lookups canonicalise their
/// argument, so `Key::Name("1")` and `Key::Index(1)` address the same entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(Key, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position_of(&self, key: &Key) -> Option<usize> {
        let canonical;
        let key = match key {
            Key::Name(name) if is_canonical_integer(name) => {
                canonical = Key::parse(name);
                &canonical
            }
            key => key,
        };
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &Key) -> Option<&Node> {
        self.position_of(key).map(|at| &self.entries[at].1)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Node> {
        let at = self.position_of(key)?;
        Some(&mut self.entries[at].1)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.position_of(key).is_some()
    }

    /// Insert or overwrite. An existing key keeps its position; a new key is
    /// appended. Returns the previous value.
    pub fn insert(&mut self, key: Key, value: Node) -> Option<Node> {
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key.canonical(), value));
                None
            }
        }
    }

    /// Remove a key, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, key: &Key) -> Option<Node> {
        let at = self.position_of(key)?;
        Some(self.entries.remove(at).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn into_values(self) -> impl Iterator<Item = Node> {
        self.entries.into_iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Node)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// See [`classify::is_plain`].
    pub fn is_plain(&self) -> bool {
        classify::is_plain(self)
    }
}

impl FromIterator<(Key, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Key, Node)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for Mapping {
    type Item = (Key, Node);
    type IntoIter = std::vec::IntoIter<(Key, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<Vec<Node>> for Mapping {
    /// Key the items `0..n-1`.
    fn from(items: Vec<Node>) -> Self {
        Mapping {
            entries: items
                .into_iter()
                .enumerate()
                .map(|(position, item)| (Key::from(position), item))
                .collect(),
        }
    }
}

/// A value in a nested tree.
#[derive(Debug, Clone)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

pub(crate) static NULL: Node = Node::Scalar(Scalar::Null);

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn empty_mapping() -> Self {
        Node::Mapping(Mapping::new())
    }

    /// Short name of the node's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(Scalar::Null) => "null",
            Node::Scalar(Scalar::Bool(_)) => "boolean",
            Node::Scalar(Scalar::Int(_)) => "integer",
            Node::Scalar(Scalar::Float(_)) => "float",
            Node::Scalar(Scalar::Str(_)) => "string",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Sequence(_) | Node::Mapping(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Sequences are always plain; scalars never are.
    pub fn is_plain(&self) -> bool {
        match self {
            Node::Sequence(_) => true,
            Node::Mapping(map) => classify::is_plain(map),
            Node::Scalar(_) => false,
        }
    }

    /// View a container as a mapping. Sequences are keyed `0..n-1`.
    pub fn as_mapping_view(&self) -> Option<Cow<'_, Mapping>> {
        match self {
            Node::Mapping(map) => Some(Cow::Borrowed(map)),
            Node::Sequence(items) => Some(Cow::Owned(Mapping::from(items.clone()))),
            Node::Scalar(_) => None,
        }
    }

    /// Iterate `(key, child)` pairs of a container in order. Scalars yield
    /// nothing.
    pub fn entries(&self) -> Entries<'_> {
        match self {
            Node::Sequence(items) => Entries::Sequence(items.iter().enumerate()),
            Node::Mapping(map) => Entries::Mapping(map.entries.iter()),
            Node::Scalar(_) => Entries::Empty,
        }
    }

    pub fn child(&self, key: &Key) -> Option<&Node> {
        match self {
            Node::Mapping(map) => map.get(key),
            Node::Sequence(items) => key.position().and_then(|at| items.get(at)),
            Node::Scalar(_) => None,
        }
    }

    pub fn child_mut(&mut self, key: &Key) -> Option<&mut Node> {
        match self {
            Node::Mapping(map) => map.get_mut(key),
            Node::Sequence(items) => key.position().and_then(|at| items.get_mut(at)),
            Node::Scalar(_) => None,
        }
    }

    /// Insert or overwrite a child.
    ///
    /// A sequence accepts an in-range index (replace) or index `len`
    /// (append); any other key promotes it to a mapping keyed `0..n-1`
    /// first. A scalar is replaced by a new mapping holding only the child.
    pub fn insert_child(&mut self, key: Key, value: Node) {
        match self {
            Node::Mapping(map) => {
                map.insert(key, value);
            }
            Node::Sequence(items) => match key.position() {
                Some(at) if at < items.len() => items[at] = value,
                Some(at) if at == items.len() => items.push(value),
                _ => {
                    let mut map = Mapping::from(std::mem::take(items));
                    map.insert(key, value);
                    *self = Node::Mapping(map);
                }
            },
            Node::Scalar(_) => {
                let mut map = Mapping::new();
                map.insert(key, value);
                *self = Node::Mapping(map);
            }
        }
    }

    /// Remove a child. Removing anything but the last element of a sequence
    /// promotes it to a mapping so the remaining elements keep their keys.
    pub fn remove_child(&mut self, key: &Key) -> Option<Node> {
        match self {
            Node::Mapping(map) => map.remove(key),
            Node::Sequence(items) => {
                let at = key.position().filter(|at| *at < items.len())?;
                if at + 1 == items.len() {
                    return items.pop();
                }
                let mut map = Mapping::from(std::mem::take(items));
                let removed = map.remove(key);
                *self = Node::Mapping(map);
                removed
            }
            Node::Scalar(_) => None,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Scalar(a), Node::Scalar(b)) => a == b,
            (Node::Sequence(a), Node::Sequence(b)) => a == b,
            (Node::Mapping(a), Node::Mapping(b)) => a == b,
            (Node::Sequence(items), Node::Mapping(map))
            | (Node::Mapping(map), Node::Sequence(items)) => {
                map.len() == items.len()
                    && map
                        .iter()
                        .zip(items)
                        .enumerate()
                        .all(|(at, ((key, value), item))| key.position() == Some(at) && value == item)
            }
            _ => false,
        }
    }
}

/// Iterator returned by [`Node::entries`].
pub enum Entries<'a> {
    Sequence(std::iter::Enumerate<std::slice::Iter<'a, Node>>),
    Mapping(std::slice::Iter<'a, (Key, Node)>),
    Empty,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (Key, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Sequence(items) => items.next().map(|(at, item)| (Key::from(at), item)),
            Entries::Mapping(entries) => entries.next().map(|(key, value)| (key.clone(), value)),
            Entries::Empty => None,
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Mapping(map)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Sequence(items)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(Scalar::from(n)),
            Value::String(s) => Node::Scalar(Scalar::Str(s)),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Mapping(
                map.into_iter()
                    .map(|(key, value)| (Key::parse(&key), Node::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Empty mappings stay objects so `{}` survives a round-trip.
fn is_list_shaped(map: &Mapping) -> bool {
    !map.is_empty() && classify::is_sequential(map)
}

impl From<&Scalar> for Value {
    fn from(scalar: &Scalar) -> Self {
        match scalar {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(n) => Value::Number(Number::from(*n)),
            Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Scalar::Str(s) => Value::String(s.clone()),
        }
    }
}

impl From<&Node> for Value {
    /// A non-empty mapping keyed `0..n-1` in order becomes a JSON array.
    fn from(node: &Node) -> Self {
        match node {
            Node::Scalar(scalar) => Value::from(scalar),
            Node::Sequence(items) => Value::Array(items.iter().map(Value::from).collect()),
            Node::Mapping(map) if is_list_shaped(map) => {
                Value::Array(map.values().map(Value::from).collect())
            }
            Node::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.to_string(), Value::from(value)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::from(&node)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(n) => serializer.serialize_i64(*n),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(scalar) => scalar.serialize(serializer),
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Mapping(map) if is_list_shaped(map) => {
                let mut seq = serializer.serialize_seq(Some(map.len()))?;
                for item in map.values() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(&key.to_string(), value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}
