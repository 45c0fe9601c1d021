//! Error types for chain addressing, key search and validation.
//!
//! Merge policies never produce these: a type mismatch during a merge is
//! resolved by overriding, summing or stringifying, not by failing.

use thiserror::Error;

/// Errors raised by treechain operations.
#[derive(Error, Debug)]
pub enum ChainError {
    /// A chain operation was invoked on a root that is not a mapping.
    #[error("chain operations need a mapping root, found {found}")]
    InvalidRootKind { found: &'static str },

    /// A `set` walked into an intermediate segment holding a non-null scalar.
    #[error("cannot descend through {found} at chain '{chain}'")]
    NotAddressable { chain: String, found: &'static str },

    /// A chain with no segments was passed to an accessor.
    #[error("chain has no segments")]
    EmptyChain,

    /// Key search descended past its depth ceiling.
    /// Carries the chain that was being extended when the ceiling was hit.
    #[error("max depth {max_depth} reached at chain '{chain}'")]
    DepthExceeded { max_depth: usize, chain: String },

    /// One or more required keys are absent from a mapping.
    #[error("missing keys: {}", missing.join(", "))]
    MissingRequiredKeys { missing: Vec<String> },

    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Convenience alias used throughout treechain-core.
pub type Result<T> = std::result::Result<T, ChainError>;
