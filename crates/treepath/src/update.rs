//! Copy-on-write updates.
//!
//! Every function here clones its input once, edits the clone, and returns
//! it. The caller's tree is never touched, even when the update fails.
//!
//! Writes that walk through a missing or `null` branch create an empty
//! mapping there, never a sequence. Writes that would need to place a child
//! inside a scalar, or at a sequence position outside its bounds, are
//! programmer errors and come back as [`TreeError`]. Deletions never fail.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::access::lookup_mut;
use crate::error::{TreeError, TreeResult};
use crate::key::{resolve_position, Key};
use crate::shape::shape_of;

/// Return a copy of `obj` with `key` set to `value`.
///
/// A `null` `obj` starts from an empty mapping.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::{assoc, Key};
///
/// let doc = json!({"a": 1});
/// let next = assoc(&doc, &Key::name("b"), json!(2)).unwrap();
/// assert_eq!(next, json!({"a": 1, "b": 2}));
/// assert_eq!(doc, json!({"a": 1}));
///
/// assert_eq!(assoc(&json!(null), &Key::name("k"), json!(true)).unwrap(), json!({"k": true}));
/// ```
pub fn assoc(obj: &Value, key: &Key, value: Value) -> TreeResult<Value> {
    let mut copy = writable_copy(obj);
    store(&mut copy, key, value)?;
    Ok(copy)
}

/// Return a copy of `obj` with each key/value pair of the flat list `args`
/// assigned in order. Later pairs overwrite earlier ones.
///
/// # Errors
///
/// - [`TreeError::OddArity`] if `args` has odd length; checked before any
///   other work.
/// - [`TreeError::InvalidKey`] if a key argument is not a string or integer.
/// - Any assignment error from [`assoc`].
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::{assoc_many, TreeError};
///
/// let doc = json!([0, 0, 0]);
/// assert_eq!(assoc_many(&doc, &[json!(0), json!("a"), json!(-1), json!("z")]).unwrap(), json!(["a", 0, "z"]));
/// assert_eq!(assoc_many(&doc, &[json!(0)]), Err(TreeError::OddArity { len: 1 }));
/// ```
pub fn assoc_many(obj: &Value, args: &[Value]) -> TreeResult<Value> {
    if args.len() % 2 != 0 {
        return Err(TreeError::OddArity { len: args.len() });
    }
    let mut copy = writable_copy(obj);
    for pair in args.chunks_exact(2) {
        let key = Key::try_from(&pair[0])?;
        store(&mut copy, &key, pair[1].clone())?;
    }
    Ok(copy)
}

/// Return a copy of `obj` without `key`.
///
/// Missing keys, out-of-range positions, and scalar inputs all yield an
/// unchanged copy.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::{dissoc, Key};
///
/// assert_eq!(dissoc(&json!({"a": 1, "b": 2}), &Key::name("a")), json!({"b": 2}));
/// assert_eq!(dissoc(&json!([1, 2, 3]), &Key::index(-1)), json!([1, 2]));
/// assert_eq!(dissoc(&json!({"a": 1}), &Key::name("zz")), json!({"a": 1}));
/// ```
pub fn dissoc(obj: &Value, key: &Key) -> Value {
    let mut copy = obj.clone();
    remove(&mut copy, key);
    copy
}

/// Return a copy of `obj` with `value` placed at `path`.
///
/// Missing or `null` intermediate nodes become empty mappings.
///
/// # Errors
///
/// [`TreeError::EmptyPath`] for an empty path, plus any assignment error
/// from [`assoc`] at any depth.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::{assoc_in, path};
///
/// assert_eq!(assoc_in(&json!(null), &path!("a", "b"), json!(5)).unwrap(), json!({"a": {"b": 5}}));
/// ```
pub fn assoc_in(obj: &Value, path: &[Key], value: Value) -> TreeResult<Value> {
    let (leaf, branch) = path.split_last().ok_or(TreeError::EmptyPath)?;
    let mut root = obj.clone();
    let parent = descend_all(&mut root, branch)?;
    store(parent, leaf, value)?;
    Ok(root)
}

/// Return a copy of `obj` where the value at `path` is replaced by
/// `f(current)`. `current` is `null` when nothing is stored there.
///
/// Extra arguments for the update are captured by the closure.
///
/// # Errors
///
/// Same as [`assoc_in`].
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::{path, update_in};
///
/// let doc = json!({"count": 1});
/// let bumped = update_in(&doc, &path!("count"), |v| json!(v.as_i64().unwrap_or(0) + 1)).unwrap();
/// assert_eq!(bumped, json!({"count": 2}));
/// ```
pub fn update_in<F>(obj: &Value, path: &[Key], f: F) -> TreeResult<Value>
where
    F: FnOnce(Value) -> Value,
{
    let (leaf, branch) = path.split_last().ok_or(TreeError::EmptyPath)?;
    let mut root = obj.clone();
    let parent = descend_all(&mut root, branch)?;
    let current = lookup_mut(parent, leaf)
        .map(std::mem::take)
        .unwrap_or(Value::Null);
    store(parent, leaf, f(current))?;
    Ok(root)
}

/// Return a copy of `obj` without the value at `path`.
///
/// If any intermediate step is missing or `null`, the copy is returned
/// unchanged.
///
/// # Errors
///
/// [`TreeError::EmptyPath`] for an empty path.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::{dissoc_in, path};
///
/// let doc = json!({"a": {"b": 1, "c": 2}});
/// assert_eq!(dissoc_in(&doc, &path!("a", "b")).unwrap(), json!({"a": {"c": 2}}));
/// assert_eq!(dissoc_in(&doc, &path!("x", "b")).unwrap(), doc);
/// ```
pub fn dissoc_in(obj: &Value, path: &[Key]) -> TreeResult<Value> {
    let (leaf, branch) = path.split_last().ok_or(TreeError::EmptyPath)?;
    let mut root = obj.clone();
    let mut node = &mut root;
    // A non-null child can only be found inside a container, so every node
    // reached here can take the edited child back.
    for key in branch {
        match lookup_mut(node, key) {
            Some(child) if !child.is_null() => node = child,
            _ => {
                trace!(%key, "dissoc_in: branch missing, nothing to delete");
                return Ok(root);
            }
        }
    }
    remove(node, leaf);
    Ok(root)
}

fn writable_copy(obj: &Value) -> Value {
    match obj {
        Value::Null => Value::Object(Map::new()),
        other => other.clone(),
    }
}

fn vivify(node: &mut Value) {
    if node.is_null() {
        debug!("creating empty mapping in place of null");
        *node = Value::Object(Map::new());
    }
}

/// Sequence slot for an assignment to `key`.
fn sequence_slot(len: usize, key: &Key) -> TreeResult<usize> {
    let position = key
        .position()
        .ok_or_else(|| TreeError::InvalidIndex { key: key.clone() })?;
    resolve_position(position, len).ok_or(TreeError::IndexOutOfRange {
        index: position,
        len,
    })
}

fn store(node: &mut Value, key: &Key, value: Value) -> TreeResult<()> {
    vivify(node);
    match node {
        Value::Object(map) => {
            map.insert(key.as_map_key().into_owned(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = sequence_slot(items.len(), key)?;
            items[index] = value;
            Ok(())
        }
        other => Err(TreeError::NotAContainer {
            key: key.clone(),
            found: shape_of(other),
        }),
    }
}

/// Step into the child at `key`, creating a `null` placeholder in mappings.
fn descend<'a>(node: &'a mut Value, key: &Key) -> TreeResult<&'a mut Value> {
    vivify(node);
    match node {
        Value::Object(map) => Ok(map
            .entry(key.as_map_key().into_owned())
            .or_insert(Value::Null)),
        Value::Array(items) => {
            let index = sequence_slot(items.len(), key)?;
            Ok(&mut items[index])
        }
        other => Err(TreeError::NotAContainer {
            key: key.clone(),
            found: shape_of(other),
        }),
    }
}

fn descend_all<'a>(root: &'a mut Value, branch: &[Key]) -> TreeResult<&'a mut Value> {
    let mut node = root;
    for key in branch {
        node = descend(node, key)?;
    }
    Ok(node)
}

fn remove(node: &mut Value, key: &Key) {
    let removed = match node {
        Value::Object(map) => map.shift_remove(&*key.as_map_key()).is_some(),
        Value::Array(items) => match key.resolve(items.len()) {
            Some(index) => {
                items.remove(index);
                true
            }
            None => false,
        },
        _ => false,
    };
    if !removed {
        trace!(%key, "delete missed; returning unchanged copy");
    }
}
