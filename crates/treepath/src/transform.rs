//! Depth-first key/value rewriting of mapping trees.

use serde_json::{map, Map, Value};

/// A mapping being rebuilt from its source entries.
struct Frame<'a> {
    entries: map::Iter<'a>,
    rebuilt: Map<String, Value>,
}

impl<'a> Frame<'a> {
    fn new(source: &'a Map<String, Value>) -> Self {
        Self {
            entries: source.iter(),
            rebuilt: Map::new(),
        }
    }
}

/// Rebuild a mapping tree bottom-up through `f`.
///
/// Each value is transformed first, then `f(key, transformed_value)` gives
/// the key and value stored in the new mapping. Entries are visited in
/// insertion order; if `f` maps two keys to the same new key, the later
/// value wins. Non-mappings, including sequences, are returned unchanged and
/// not descended into.
///
/// The walk keeps its own stack and only clones leaves, so deep chains of
/// mappings do not exhaust the call stack.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::transform_tree;
///
/// let upper = transform_tree(|k, v| (k.to_uppercase(), v), &json!({"a": {"b": 1}}));
/// assert_eq!(upper, json!({"A": {"B": 1}}));
///
/// assert_eq!(transform_tree(|k, v| (k, v), &json!(3)), json!(3));
/// ```
pub fn transform_tree<F>(mut f: F, tree: &Value) -> Value
where
    F: FnMut(String, Value) -> (String, Value),
{
    let root = match tree {
        Value::Object(map) => map,
        other => return other.clone(),
    };

    // Each suspended parent is kept with the key its unfinished child
    // will be stored under.
    let mut current = Frame::new(root);
    let mut parents: Vec<(Frame<'_>, &String)> = Vec::new();
    loop {
        match current.entries.next() {
            Some((key, Value::Object(child))) => {
                let parent = std::mem::replace(&mut current, Frame::new(child));
                parents.push((parent, key));
            }
            Some((key, leaf)) => {
                let (key, value) = f(key.clone(), leaf.clone());
                current.rebuilt.insert(key, value);
            }
            None => {
                let done = Value::Object(std::mem::take(&mut current.rebuilt));
                match parents.pop() {
                    Some((parent, key)) => {
                        current = parent;
                        let (key, value) = f(key.clone(), done);
                        current.rebuilt.insert(key, value);
                    }
                    None => return done,
                }
            }
        }
    }
}

/// Rename every mapping key in the tree.
pub fn transform_keys<F>(mut f: F, tree: &Value) -> Value
where
    F: FnMut(&str) -> String,
{
    transform_tree(|key, value| (f(&key), value), tree)
}

/// Rewrite every value in the tree, children before their parents.
pub fn transform_values<F>(mut f: F, tree: &Value) -> Value
where
    F: FnMut(&str, Value) -> Value,
{
    transform_tree(
        |key, value| {
            let value = f(&key, value);
            (key, value)
        },
        tree,
    )
}
