//! # treechain-core
//!
//! Chain-addressed access and policy-driven merging for nested trees of
//! scalars, sequences and mappings.
//!
//! A tree is usually a decoded JSON document. A **chain** such as
//! `"server:tls:cert"` names a path into it, one key per segment. Mappings
//! whose keys are exactly `0..n-1` are **plain** (list-like) and merge by
//! concatenation; every other mapping merges key by key.
//!
//! ## Quick start
//!
//! ```rust
//! use treechain_core::{access, json, merge_deep, search_key_deep, Chain, Node};
//!
//! let defaults = json::decode(r#"{"server":{"port":80,"hosts":["a"]}}"#).unwrap();
//! let overrides = json::decode(r#"{"server":{"port":8080,"hosts":["b"]}}"#).unwrap();
//!
//! let mut merged = merge_deep(&defaults, &overrides);
//! assert_eq!(json::encode(&merged).unwrap(), r#"{"server":{"port":8080,"hosts":["a","b"]}}"#);
//!
//! let port: Chain = "server:port".parse().unwrap();
//! access::set(&mut merged, &port, Node::from(serde_json::json!(9000))).unwrap();
//! assert_eq!(access::get(&merged, &port).unwrap(), Some(&Node::from(serde_json::json!(9000))));
//!
//! let found = search_key_deep(&merged, "hosts", 8).unwrap().unwrap();
//! assert_eq!(found.chain.to_string(), "server:hosts");
//! ```
//!
//! ## Modules
//!
//! - [`node`]: `Node`, `Mapping`, `Key`, `Scalar` value model and JSON conversions
//! - [`classify`]: plain/sequential detection, key unions, numeric key helpers
//! - [`chain`]: parse and serialize chains
//! - [`access`]: get / set / unset by chain
//! - [`merge`]: deep merge and the assoc / sum / sum-values policies
//! - [`search`]: depth-bounded key search
//! - [`select`]: key filters, renaming, occurrence counts, required keys
//! - [`json`]: decode / encode at the JSON boundary
//! - [`error`]: error types

pub mod access;
pub mod chain;
pub mod classify;
pub mod error;
pub mod json;
pub mod merge;
pub mod node;
pub mod search;
pub mod select;

pub use chain::{Chain, DEFAULT_SEPARATOR};
pub use error::ChainError;
pub use merge::{merge_assoc, merge_deep, merge_sum, merge_sum_values, MergePolicy};
pub use node::{Key, Mapping, Node, Numeric, Scalar};
pub use search::{search_key_deep, Found, DEFAULT_MAX_DEPTH};
