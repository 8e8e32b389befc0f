//! Conflict-resolved merging of mappings.

use serde_json::map::Entry;
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{TreeError, TreeResult};
use crate::shape::{is_map, shape_of};

/// Merge `maps` left to right into a new mapping.
///
/// A key seen for the first time is inserted as is. A key already present
/// (even with a `null` value) is replaced by `f(existing, incoming)`.
/// `null` arguments are skipped.
///
/// # Errors
///
/// [`TreeError::NotAMapping`] if an argument is neither a mapping nor `null`.
/// Other empty or falsy values such as `[]`, `0`, `false` and `""` are
/// rejected too, not skipped.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::merge_with;
///
/// let sum = |a: serde_json::Value, b: serde_json::Value| {
///     json!(a.as_i64().unwrap_or(0) + b.as_i64().unwrap_or(0))
/// };
/// let merged = merge_with(sum, [&json!({"x": 1}), &json!(null), &json!({"x": 2, "y": 3})]).unwrap();
/// assert_eq!(merged, json!({"x": 3, "y": 3}));
/// ```
pub fn merge_with<'a, I, F>(mut f: F, maps: I) -> TreeResult<Value>
where
    I: IntoIterator<Item = &'a Value>,
    F: FnMut(Value, Value) -> Value,
{
    let mut merged = Map::new();
    for value in maps {
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, incoming) in map {
                    absorb(&mut merged, key.clone(), incoming.clone(), &mut f);
                }
            }
            other => {
                return Err(TreeError::NotAMapping {
                    found: shape_of(other),
                })
            }
        }
    }
    Ok(Value::Object(merged))
}

/// Merge `maps` left to right, letting later values win.
pub fn merge<'a, I>(maps: I) -> TreeResult<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    merge_with(|_, incoming| incoming, maps)
}

/// Merge `values` recursively.
///
/// When every value is a mapping they are merged key by key, and values
/// colliding at a key are merged the same way. As soon as a set of values
/// is not made only of mappings, `f` receives all of them in argument order
/// and its result is used. This happens with one value when `values` holds a
/// single non-mapping, and with two values at an inner collision. A single
/// mapping never reaches `f`: it is copied key by key.
///
/// Recursion goes one call deeper per level of nested mappings that collide,
/// so the usable depth is bounded by the thread's stack.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use treepath::deep_merge_with;
///
/// let newest = |mut values: Vec<serde_json::Value>| values.pop().unwrap_or_default();
/// let merged = deep_merge_with(newest, [&json!({"a": {"b": 1, "x": 1}}), &json!({"a": {"c": 2, "x": 2}})]);
/// assert_eq!(merged, json!({"a": {"b": 1, "x": 2, "c": 2}}));
/// ```
pub fn deep_merge_with<'a, I, F>(mut f: F, values: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
    F: FnMut(Vec<Value>) -> Value,
{
    let values: Vec<Value> = values.into_iter().cloned().collect();
    resolve(&mut f, values)
}

fn resolve<F>(f: &mut F, values: Vec<Value>) -> Value
where
    F: FnMut(Vec<Value>) -> Value,
{
    if !values.iter().all(is_map) {
        return f(values);
    }
    let mut merged = Map::new();
    for value in values {
        if let Value::Object(map) = value {
            for (key, incoming) in map {
                absorb(&mut merged, key, incoming, &mut |existing, incoming| {
                    resolve(&mut *f, vec![existing, incoming])
                });
            }
        }
    }
    Value::Object(merged)
}

fn absorb<F>(merged: &mut Map<String, Value>, key: String, incoming: Value, f: &mut F)
where
    F: FnMut(Value, Value) -> Value,
{
    match merged.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(incoming);
        }
        Entry::Occupied(mut slot) => {
            trace!(key = %slot.key(), "merge conflict");
            let existing = std::mem::take(slot.get_mut());
            *slot.get_mut() = f(existing, incoming);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sum(a: Value, b: Value) -> Value {
        json!(a.as_i64().unwrap_or(0) + b.as_i64().unwrap_or(0))
    }

    #[test]
    fn test_merge_with_conflict() {
        let merged = merge_with(sum, [&json!({"x": 1}), &json!({"x": 2})]).unwrap();
        assert_eq!(merged, json!({"x": 3}));
    }

    #[test]
    fn test_merge_with_present_null_is_a_conflict() {
        let mut calls = Vec::new();
        let merged = merge_with(
            |a, b| {
                calls.push((a.clone(), b.clone()));
                b
            },
            [&json!({"k": null}), &json!({"k": 1})],
        )
        .unwrap();
        assert_eq!(merged, json!({"k": 1}));
        assert_eq!(calls, vec![(json!(null), json!(1))]);
    }

    #[test]
    fn test_merge_with_folds_left_to_right() {
        let concat = |a: Value, b: Value| json!(format!("{}{}", a.as_str().unwrap(), b.as_str().unwrap()));
        let merged = merge_with(
            concat,
            [&json!({"s": "a"}), &json!({"s": "b"}), &json!({"s": "c"})],
        )
        .unwrap();
        assert_eq!(merged, json!({"s": "abc"}));
    }

    #[test]
    fn test_merge_with_skips_null_and_rejects_scalars() {
        assert_eq!(merge_with(sum, [&json!(null)]).unwrap(), json!({}));
        assert_eq!(merge_with(sum, []).unwrap(), json!({}));
        assert_eq!(
            merge_with(sum, [&json!({"a": 1}), &json!([1])]),
            Err(TreeError::NotAMapping {
                found: crate::shape::Shape::Sequence
            })
        );
    }

    #[test]
    fn test_merge_does_not_touch_inputs() {
        let left = json!({"a": 1});
        let right = json!({"a": 2, "b": 3});
        assert_eq!(merge([&left, &right]).unwrap(), json!({"a": 2, "b": 3}));
        assert_eq!(left, json!({"a": 1}));
    }

    #[test]
    fn test_deep_merge_structural() {
        let merged = deep_merge_with(
            |_| panic!("no scalar conflicts here"),
            [&json!({"a": {"b": 1}}), &json!({"a": {"c": 2}})],
        );
        assert_eq!(merged, json!({"a": {"b": 1, "c": 2}}));
    }

    #[test]
    fn test_deep_merge_scalar_conflict_gets_both_values() {
        let mut seen = Vec::new();
        let merged = deep_merge_with(
            |values| {
                seen.push(values.clone());
                json!(values.len())
            },
            [&json!({"a": {"b": 1}}), &json!({"a": {"b": 2}})],
        );
        assert_eq!(merged, json!({"a": {"b": 2}}));
        assert_eq!(seen, vec![vec![json!(1), json!(2)]]);
    }

    #[test]
    fn test_deep_merge_shape_mismatch_goes_to_conflict_fn() {
        let merged = deep_merge_with(
            |mut values| values.remove(0),
            [&json!({"a": {"b": 1}}), &json!({"a": 5})],
        );
        assert_eq!(merged, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_deep_merge_single_scalar_calls_with_one_value() {
        let merged = deep_merge_with(
            |values| {
                assert_eq!(values.len(), 1);
                json!({"wrapped": values[0].clone()})
            },
            [&json!(7)],
        );
        assert_eq!(merged, json!({"wrapped": 7}));
    }

    #[test]
    fn test_deep_merge_single_mapping_returns_copy() {
        let mut calls = 0;
        let source = json!({"a": {"b": 1}});
        let merged = deep_merge_with(
            |values| {
                calls += 1;
                json!(values.len())
            },
            [&source],
        );
        assert_eq!(merged, json!({"a": {"b": 1}}));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_merge_with_rejects_falsy_non_null() {
        for falsy in [json!([]), json!(0), json!(false), json!("")] {
            assert_eq!(
                merge_with(sum, [&json!({"a": 1}), &falsy]),
                Err(TreeError::NotAMapping {
                    found: shape_of(&falsy)
                })
            );
        }
    }

    #[test]
    fn test_deep_merge_null_argument_is_not_a_mapping() {
        let merged = deep_merge_with(|values| json!(values.len()), [&json!({"a": 1}), &json!(null)]);
        assert_eq!(merged, json!(2));
    }

    #[test]
    fn test_deep_merge_three_levels() {
        let merged = deep_merge_with(
            |mut values| values.pop().unwrap_or_default(),
            [
                &json!({"a": {"b": {"c": 1, "d": 1}}}),
                &json!({"a": {"b": {"d": 2}}}),
                &json!({"a": {"b": {"e": 3}}}),
            ],
        );
        assert_eq!(merged, json!({"a": {"b": {"c": 1, "d": 2, "e": 3}}}));
    }

    #[test]
    fn test_deep_merge_no_values() {
        assert_eq!(deep_merge_with(|_| json!("unused"), []), json!({}));
    }
}
