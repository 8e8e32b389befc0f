//! Copy-on-write path operations over nested JSON trees.
//!
//! A tree is a [`serde_json::Value`] whose mappings (`Value::Object`, kept in
//! insertion order) and sequences (`Value::Array`) may nest to any depth.
//! Everything else, `null` included, is a scalar.
//!
//! The crate groups four kinds of operations:
//!
//! - reads with a default fallback: [`get`], [`get_or_else`], [`get_in`]
//! - copy-on-write updates: [`assoc`], [`assoc_many`], [`dissoc`],
//!   [`assoc_in`], [`update_in`], [`dissoc_in`]
//! - merging: [`merge_with`], [`deep_merge_with`]
//! - rewriting: [`transform_tree`]
//!
//! Every operation borrows its input and returns a new value. Reads never
//! fail and deletions never fail; only writes that cannot be carried out
//! (for example placing a child inside a number) return a [`TreeError`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use treepath::{assoc_in, deep_merge_with, get_in, path};
//!
//! let config = json!({"server": {"port": 80}});
//! let updated = assoc_in(&config, &path!("server", "tls", "enabled"), json!(true)).unwrap();
//! assert_eq!(get_in(&updated, &path!("server", "tls", "enabled"), json!(false)), json!(true));
//! assert_eq!(config, json!({"server": {"port": 80}}));
//!
//! let layered = deep_merge_with(
//!     |mut values| values.pop().unwrap_or_default(),
//!     [&config, &json!({"server": {"host": "localhost"}})],
//! );
//! assert_eq!(layered, json!({"server": {"port": 80, "host": "localhost"}}));
//! ```

pub mod access;
pub mod error;
pub mod key;
pub mod merge;
pub mod pointer;
pub mod shape;
pub mod transform;
pub mod update;

pub use access::{
    first, get, get_in, get_or_else, last, lookup, lookup_in, nth, second, select_keys,
    select_keys_flat,
};
pub use error::{TreeError, TreeResult};
pub use key::{Key, Path};
pub use merge::{deep_merge_with, merge, merge_with};
pub use pointer::{
    assoc_in_pointer, dissoc_in_pointer, format_pointer, get_in_pointer, parse_pointer,
};
pub use shape::{is_map, is_seq, shape_of, Shape};
pub use transform::{transform_keys, transform_tree, transform_values};
pub use update::{assoc, assoc_in, assoc_many, dissoc, dissoc_in, update_in};
