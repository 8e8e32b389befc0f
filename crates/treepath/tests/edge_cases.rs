use serde_json::{json, Value};
use treepath::pointer::parse_pointer;
use treepath::{
    assoc, assoc_in, dissoc, dissoc_in, get_in, get_or_else, lookup_in, path, update_in, Key,
    Shape, TreeError,
};

#[test]
fn test_get_in_through_scalar_returns_default() {
    let doc = json!({"a": "string"});
    assert_eq!(get_in(&doc, &path!("a", 0), json!("d")), json!("d"));
    assert_eq!(get_in(&doc, &path!("a", "len"), json!("d")), json!("d"));
}

#[test]
fn test_get_in_default_is_not_derived() {
    let doc = json!({"a": {}});
    // get_in hands back the default value itself
    let fallback = json!({"fresh": true});
    assert_eq!(get_in(&doc, &path!("a", "b", "c"), fallback.clone()), fallback);
}

#[test]
fn test_get_or_else_builds_empty_mapping() {
    let doc = json!({"a": 1});
    let built = get_or_else(&doc, &Key::name("missing"), |_, _| Value::Object(Default::default()));
    assert_eq!(built, json!({}));
}

#[test]
fn test_get_in_with_pointer_path() {
    let doc = json!({"users": [{"name": "ada"}, {"name": "bob"}], "a/b": {"~": 1}});
    assert_eq!(get_in(&doc, &parse_pointer("/users/1/name"), Value::Null), json!("bob"));
    assert_eq!(get_in(&doc, &parse_pointer("/a~1b/~0"), Value::Null), json!(1));
    assert_eq!(get_in(&doc, &parse_pointer("/users/01/name"), json!("x")), json!("x"));
    assert_eq!(get_in(&doc, &parse_pointer(""), Value::Null), doc);
}

#[test]
fn test_assoc_in_does_not_create_sequences() {
    let next = assoc_in(&json!({}), &path!("list", 0, 1), json!("v")).unwrap();
    assert_eq!(next, json!({"list": {"0": {"1": "v"}}}));
}

#[test]
fn test_assoc_in_failure_leaves_input() {
    let doc = json!({"a": {"b": 1}});
    let result = assoc_in(&doc, &path!("a", "b", "c"), json!(2));
    assert_eq!(
        result,
        Err(TreeError::NotAContainer {
            key: Key::name("c"),
            found: Shape::Scalar
        })
    );
    assert_eq!(doc, json!({"a": {"b": 1}}));
}

#[test]
fn test_assoc_in_sequence_bad_name() {
    assert_eq!(
        assoc_in(&json!({"a": [1]}), &path!("a", "x"), json!(2)),
        Err(TreeError::InvalidIndex { key: Key::name("x") })
    );
}

#[test]
fn test_assoc_negative_index() {
    assert_eq!(
        assoc(&json!([1, 2, 3]), &Key::index(-1), json!(0)).unwrap(),
        json!([1, 2, 0])
    );
    assert_eq!(
        assoc(&json!([1, 2, 3]), &Key::index(-4), json!(0)),
        Err(TreeError::IndexOutOfRange { index: -4, len: 3 })
    );
}

#[test]
fn test_assoc_false_is_not_nil() {
    assert_eq!(
        assoc(&json!(false), &Key::name("a"), json!(1)),
        Err(TreeError::NotAContainer {
            key: Key::name("a"),
            found: Shape::Scalar
        })
    );
}

#[test]
fn test_update_in_function_failure_is_callers_choice() {
    // f decides what to do with an unexpected current value
    let doc = json!({"n": "not a number"});
    let next = update_in(&doc, &path!("n"), |v| match v.as_i64() {
        Some(n) => json!(n + 1),
        None => v,
    })
    .unwrap();
    assert_eq!(next, doc);
}

#[test]
fn test_update_in_inside_sequence() {
    let doc = json!({"rows": [{"hits": 1}, {"hits": 5}]});
    let next = update_in(&doc, &path!("rows", 1, "hits"), |v| json!(v.as_i64().unwrap_or(0) * 2)).unwrap();
    assert_eq!(next, json!({"rows": [{"hits": 1}, {"hits": 10}]}));
}

#[test]
fn test_dissoc_in_sequence_element() {
    let doc = json!({"rows": [{"a": 1, "b": 2}]});
    assert_eq!(
        dissoc_in(&doc, &path!("rows", 0, "a")).unwrap(),
        json!({"rows": [{"b": 2}]})
    );
    assert_eq!(dissoc_in(&doc, &path!("rows", 3, "a")).unwrap(), doc);
}

#[test]
fn test_dissoc_sequence_shifts() {
    assert_eq!(dissoc(&json!(["a", "b", "c"]), &Key::index(0)), json!(["b", "c"]));
}

#[test]
fn test_dissoc_index_key_on_mapping() {
    assert_eq!(dissoc(&json!({"1": "x", "2": "y"}), &Key::index(1)), json!({"2": "y"}));
}

#[test]
fn test_lookup_in_root() {
    let doc = json!(3);
    assert_eq!(lookup_in(&doc, &[]), Some(&doc));
}
