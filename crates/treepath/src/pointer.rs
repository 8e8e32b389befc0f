//! Slash-separated pointer strings for paths.
//!
//! Pointers follow the JSON Pointer (RFC 6901) escaping rules: `~1` stands
//! for `/` and `~0` stands for `~`. Every component parses to
//! [`Key::Name`]; numeric names still address sequences.

use serde_json::Value;

use crate::access::get_in;
use crate::error::TreeResult;
use crate::key::{Key, Path};
use crate::update::{assoc_in, dissoc_in};

/// Decode `~0` and `~1` in one pointer component.
///
/// A `~` followed by anything else is kept as is.
///
/// # Example
///
/// ```
/// use treepath::pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("~01"), "~1");
/// ```
pub fn unescape_component(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    let mut chars = component.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('0') => {
                chars.next();
                out.push('~');
            }
            Some('1') => {
                chars.next();
                out.push('/');
            }
            _ => out.push('~'),
        }
    }
    out
}

/// Encode `~` and `/` so the component survives a round trip through a
/// pointer string.
pub fn escape_component(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for c in component.chars() {
        match c {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            other => out.push(other),
        }
    }
    out
}

/// Parse a pointer into a path.
///
/// The empty string is the root. A missing leading `/` is tolerated.
///
/// # Example
///
/// ```
/// use treepath::pointer::parse_pointer;
/// use treepath::Key;
///
/// assert!(parse_pointer("").is_empty());
/// assert_eq!(parse_pointer("/a/0"), vec![Key::name("a"), Key::name("0")]);
/// assert_eq!(parse_pointer("a/b~1c"), vec![Key::name("a"), Key::name("b/c")]);
/// ```
pub fn parse_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/')
        .map(|component| Key::Name(unescape_component(component)))
        .collect()
}

/// Format a path as a pointer. Index steps are written as their decimal text.
pub fn format_pointer(path: &[Key]) -> String {
    let mut out = String::new();
    for key in path {
        out.push('/');
        out.push_str(&escape_component(&key.as_map_key()));
    }
    out
}

/// [`get_in`] addressed by a pointer string.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::pointer::get_in_pointer;
///
/// let doc = json!({"users": [{"name": "ada"}]});
/// assert_eq!(get_in_pointer(&doc, "/users/0/name", json!(null)), json!("ada"));
/// assert_eq!(get_in_pointer(&doc, "/users/1/name", json!("?")), json!("?"));
/// ```
pub fn get_in_pointer(obj: &Value, pointer: &str, default: Value) -> Value {
    get_in(obj, &parse_pointer(pointer), default)
}

/// [`assoc_in`] addressed by a pointer string. The empty pointer is rejected
/// with [`TreeError::EmptyPath`](crate::TreeError::EmptyPath).
pub fn assoc_in_pointer(obj: &Value, pointer: &str, value: Value) -> TreeResult<Value> {
    assoc_in(obj, &parse_pointer(pointer), value)
}

/// [`dissoc_in`] addressed by a pointer string.
pub fn dissoc_in_pointer(obj: &Value, pointer: &str) -> TreeResult<Value> {
    dissoc_in(obj, &parse_pointer(pointer))
}
