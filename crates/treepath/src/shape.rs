//! Classification of tree nodes.

use std::fmt;

use serde_json::Value;

/// The structural role a node plays in a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Keyed container (`Value::Object`).
    Mapping,
    /// Positional container (`Value::Array`).
    Sequence,
    /// Anything else, including `null` and strings.
    Scalar,
}

impl Shape {
    /// Whether nodes of this shape hold children.
    #[inline]
    pub fn is_container(self) -> bool {
        !matches!(self, Shape::Scalar)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Mapping => "mapping",
            Shape::Sequence => "sequence",
            Shape::Scalar => "scalar",
        })
    }
}

/// Classify a node.
pub fn shape_of(value: &Value) -> Shape {
    match value {
        Value::Object(_) => Shape::Mapping,
        Value::Array(_) => Shape::Sequence,
        _ => Shape::Scalar,
    }
}

/// True if `value` is mapping-shaped.
#[inline]
pub fn is_map(value: &Value) -> bool {
    shape_of(value) == Shape::Mapping
}

/// True if `value` is sequence-shaped.
#[inline]
pub fn is_seq(value: &Value) -> bool {
    shape_of(value) == Shape::Sequence
}
