//! Error types for tree operations.
//!
//! Only programmer errors are reported. Lookup misses resolve to a default
//! and delete misses are absorbed, so neither appears here.

use serde_json::Value;
use thiserror::Error;

use crate::key::Key;
use crate::shape::Shape;

/// Result type alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors returned by writes and merges that cannot be carried out.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    /// A flat key/value argument list had an odd number of entries.
    #[error("key/value arguments must come in pairs, got {len}")]
    OddArity { len: usize },

    /// A path write was given an empty path.
    #[error("path must not be empty")]
    EmptyPath,

    /// Tried to assign a child into a scalar.
    #[error("cannot assign {key} into a {found}")]
    NotAContainer { key: Key, found: Shape },

    /// Assignment to a sequence position outside its bounds.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// A name that is not a position was used on a sequence.
    #[error("{key} is not a sequence index")]
    InvalidIndex { key: Key },

    /// A value that is neither a string nor an integer was used as a key.
    #[error("{found} cannot be used as a key")]
    InvalidKey { found: Value },

    /// A merge argument was neither a mapping nor null.
    #[error("cannot merge a {found}")]
    NotAMapping { found: Shape },
}
