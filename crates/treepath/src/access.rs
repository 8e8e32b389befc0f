//! Indexed reads with default fallback.
//!
//! Every read here resolves a miss (absent key, out-of-range position, or a
//! scalar in the way) to a default instead of failing.

use serde_json::{Map, Value};

use crate::key::Key;

/// Attempt an indexed lookup.
///
/// Returns `None` when `key` is absent, out of range, or `obj` is a scalar.
pub fn lookup<'a>(obj: &'a Value, key: &Key) -> Option<&'a Value> {
    match obj {
        Value::Object(map) => map.get(&*key.as_map_key()),
        Value::Array(items) => items.get(key.resolve(items.len())?),
        _ => None,
    }
}

pub(crate) fn lookup_mut<'a>(obj: &'a mut Value, key: &Key) -> Option<&'a mut Value> {
    match obj {
        Value::Object(map) => map.get_mut(&*key.as_map_key()),
        Value::Array(items) => {
            let index = key.resolve(items.len())?;
            items.get_mut(index)
        }
        _ => None,
    }
}

/// Walk `path` from `obj`, borrowing the node it addresses.
///
/// The empty path addresses `obj` itself.
pub fn lookup_in<'a>(obj: &'a Value, path: &[Key]) -> Option<&'a Value> {
    path.iter().try_fold(obj, |node, key| lookup(node, key))
}

/// Return `obj[key]`, or `default` on a miss.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::{get, Key};
///
/// let doc = json!({"a": 1, "list": [10, 20]});
/// assert_eq!(get(&doc, &Key::name("a"), json!(0)), json!(1));
/// assert_eq!(get(&doc, &Key::name("b"), json!(0)), json!(0));
/// assert_eq!(get(&doc["list"], &Key::index(-1), json!(null)), json!(20));
/// ```
pub fn get(obj: &Value, key: &Key, default: Value) -> Value {
    lookup(obj, key).cloned().unwrap_or(default)
}

/// Return `obj[key]`, or `default(obj, key)` on a miss.
///
/// `default` only runs on a miss, so it can build the fallback lazily.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::{get_or_else, Key};
///
/// let doc = json!({"a": 1});
/// let fallback = get_or_else(&doc, &Key::name("b"), |_, key| json!(key.as_map_key()));
/// assert_eq!(fallback, json!("b"));
/// ```
pub fn get_or_else<F>(obj: &Value, key: &Key, default: F) -> Value
where
    F: FnOnce(&Value, &Key) -> Value,
{
    match lookup(obj, key) {
        Some(found) => found.clone(),
        None => default(obj, key),
    }
}

/// Walk `path` from `obj` and return the value found, or `default` on the
/// first miss along the way.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::{get_in, path};
///
/// let doc = json!({"a": {"b": [1, 2, 3]}});
/// assert_eq!(get_in(&doc, &path!("a", "b", 1), json!(null)), json!(2));
/// assert_eq!(get_in(&doc, &path!("a", "x", 1), json!("none")), json!("none"));
/// assert_eq!(get_in(&doc, &path!(), json!(null)), doc);
/// ```
pub fn get_in(obj: &Value, path: &[Key], default: Value) -> Value {
    lookup_in(obj, path).cloned().unwrap_or(default)
}

/// Element at `index` (negative counts from the end), or `null`.
///
/// Positions past the second have no named accessor; `nth(obj, 2)` reads
/// the third element.
pub fn nth(obj: &Value, index: i64) -> Value {
    get(obj, &Key::Index(index), Value::Null)
}

/// First element, or `null`.
pub fn first(obj: &Value) -> Value {
    nth(obj, 0)
}

/// Second element, or `null`.
pub fn second(obj: &Value) -> Value {
    nth(obj, 1)
}

/// Last element, or `null` for an empty or non-sequence value.
pub fn last(obj: &Value) -> Value {
    nth(obj, -1)
}

/// Build a mapping holding only `keys`, each read from `obj` with `default`
/// standing in for misses.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::{path, select_keys};
///
/// let doc = json!({"a": 1, "b": 2, "c": 3});
/// assert_eq!(select_keys(&path!("a", "z"), &doc, &json!(0)), json!({"a": 1, "z": 0}));
/// ```
pub fn select_keys(keys: &[Key], obj: &Value, default: &Value) -> Value {
    let mut selected = Map::new();
    for key in keys {
        selected.insert(key.as_map_key().into_owned(), get(obj, key, default.clone()));
    }
    Value::Object(selected)
}

/// Like [`select_keys`], but returns the values in `keys` order.
pub fn select_keys_flat(keys: &[Key], obj: &Value, default: &Value) -> Vec<Value> {
    keys.iter()
        .map(|key| get(obj, key, default.clone()))
        .collect()
}
