//! Rendering of a tree for display and export.
//!
//! [`render`] turns a [`Node`] into a [`Rendered`] tree where every tag is
//! shown by its name rather than its number. `Rendered` implements
//! `serde::Serialize`, so it can be handed to any serde format:
//!
//! ```
//! use nbtree::{pretty, Node};
//!
//! let node = Node::compound("", vec![Node::new("seed", -4_611_686_018_427_387_904i64)]);
//! let json = serde_json::to_string(&pretty::render(&node)).unwrap();
//!
//! assert_eq!(
//!     json,
//!     r#"{"type":"Compound","name":"","value":[{"type":"Long","name":"seed","value":"-4611686018427387904"}]}"#
//! );
//! ```
//!
//! Longs are rendered as decimal strings. Many JSON readers hold numbers as
//! doubles and would silently round values beyond 2^53.
//!
//! Rendering is one way, there is no conversion back into a [`Node`].
use serde::Serialize;

use crate::{Node, Value};

/// A rendered tag. List elements have no name.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Rendered {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Element tag of a list, kept so empty lists still show it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<&'static str>,
    pub value: RenderedValue,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RenderedValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(String),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongArray(Vec<String>),
    /// Children of a compound, or elements of a list.
    Tags(Vec<Rendered>),
}

/// Render a tree. Never fails.
pub fn render(node: &Node) -> Rendered {
    render_tag(Some(node.name().to_owned()), node.value())
}

fn render_tag(name: Option<String>, value: &Value) -> Rendered {
    Rendered {
        kind: value.tag().name(),
        name,
        element: value.as_list().map(|list| list.element().name()),
        value: render_value(value),
    }
}

fn render_value(value: &Value) -> RenderedValue {
    match value {
        Value::Byte(v) => RenderedValue::Byte(*v),
        Value::Short(v) => RenderedValue::Short(*v),
        Value::Int(v) => RenderedValue::Int(*v),
        Value::Long(v) => RenderedValue::Long(v.to_string()),
        Value::Float(v) => RenderedValue::Float(*v),
        Value::Double(v) => RenderedValue::Double(*v),
        Value::String(v) => RenderedValue::String(v.clone()),
        Value::ByteArray(v) => RenderedValue::ByteArray(v.clone()),
        Value::IntArray(v) => RenderedValue::IntArray(v.clone()),
        Value::LongArray(v) => RenderedValue::LongArray(v.iter().map(i64::to_string).collect()),
        Value::Compound(children) => RenderedValue::Tags(children.iter().map(render).collect()),
        Value::List(list) => {
            RenderedValue::Tags(list.iter().map(|item| render_tag(None, item)).collect())
        }
    }
}
