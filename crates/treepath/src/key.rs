//! Path steps and paths.
//!
//! A [`Key`] is one step of a walk into a tree: either a mapping key or a
//! sequence position. A [`Path`] is an ordered list of steps; the empty path
//! addresses the root.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::error::TreeError;

/// A single step in a path.
///
/// Steps are interpreted by the container they are applied to:
///
/// - On a mapping, `Name(s)` looks up `s` and `Index(i)` looks up the decimal
///   text of `i`.
/// - On a sequence, `Index(i)` is a position (negative counts from the end)
///   and `Name(s)` is a position only when `s` is a canonical non-negative
///   integer such as `"0"` or `"12"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Mapping key.
    Name(String),
    /// Sequence position.
    Index(i64),
}

/// A path into a tree.
pub type Path = Vec<Key>;

impl Key {
    /// Create a name step.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Key::Name(name.into())
    }

    /// Create an index step.
    #[inline]
    pub fn index(index: i64) -> Self {
        Key::Index(index)
    }

    /// The text used when this step addresses a mapping.
    pub fn as_map_key(&self) -> Cow<'_, str> {
        match self {
            Key::Name(name) => Cow::Borrowed(name),
            Key::Index(index) => Cow::Owned(index.to_string()),
        }
    }

    /// The signed position this step names when applied to a sequence.
    ///
    /// Returns `None` for names that are not canonical integers.
    pub fn position(&self) -> Option<i64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(name) if is_valid_index(name) => name.parse().ok(),
            Key::Name(_) => None,
        }
    }

    /// Resolve this step against a sequence of length `len`.
    ///
    /// Negative positions count from the end. Returns `None` when the step is
    /// not a position or falls outside `0..len`.
    pub fn resolve(&self, len: usize) -> Option<usize> {
        resolve_position(self.position()?, len)
    }
}

pub(crate) fn resolve_position(position: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if position < 0 { len + position } else { position };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

/// Whether `index` names a sequence position: decimal digits with no
/// leading zero.
///
/// # Example
///
/// ```
/// use treepath::key::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    match index.as_bytes() {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, ".{}", name),
            Key::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Name(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Name(s.to_owned())
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Name(s.clone())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Index(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Index(i64::from(i))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl TryFrom<&Value> for Key {
    type Error = TreeError;

    /// Strings become names and integers become indices; anything else
    /// cannot address a container.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Key::Name(s.clone())),
            Value::Number(n) => n.as_i64().map(Key::Index).ok_or_else(|| TreeError::InvalidKey {
                found: value.clone(),
            }),
            _ => Err(TreeError::InvalidKey {
                found: value.clone(),
            }),
        }
    }
}

/// Build a [`Path`] from a list of names and indices.
///
/// # Examples
///
/// ```
/// use treepath::{path, Key};
///
/// let p = path!("users", 0, "name");
/// assert_eq!(p, vec![Key::name("users"), Key::index(0), Key::name("name")]);
///
/// let root = path!();
/// assert!(root.is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::Key>::new()
    };
    ($($step:expr),+ $(,)?) => {
        ::std::vec![$($crate::Key::from($step)),+]
    };
}
