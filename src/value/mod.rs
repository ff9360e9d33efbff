mod display;

use crate::{
    error::{Error, Result},
    Tag,
};

/// A named tag: one node of an NBT tree. The root of a document and every
/// child of a compound is a `Node`. List elements are plain [`Value`]s since
/// they never carry a name.
///
/// The tag of a node is always the tag of its value, so the two can never
/// disagree.
///
/// ```
/// # use nbtree::{Node, Tag, Value};
/// let node = Node::compound("", vec![Node::new("Count", 3i8), Node::new("id", "stone")]);
///
/// assert_eq!(node.kind(), Tag::Compound);
/// assert_eq!(node.get("Count").map(Node::value), Some(&Value::Byte(3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    value: Value,
}

/// The payload of a node. Compounds and lists are owned recursively.
///
/// There is no variant for the End tag, it only ever terminates a compound in
/// the binary format and is never part of a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    /// Children in the order they appear in the data. Names are not required
    /// to be unique.
    Compound(Vec<Node>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// An NBT list: unnamed values that should all have the declared element tag.
///
/// The element tag is kept even for empty lists, since it is written out again
/// when encoding. [`List::new`] does not check the items, the encoder does.
/// Use [`List::try_new`] to check up front.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element: Tag,
    items: Vec<Value>,
}

impl Node {
    /// Create a node from anything convertible to a [`Value`], eg
    /// `Node::new("Health", 20.0f32)`.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a compound node. Children keep the given order, duplicate names
    /// included.
    pub fn compound(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(name, Value::Compound(children))
    }

    /// The name, empty for an unnamed root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The payload.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The tag this node is written with, taken from its value.
    pub fn kind(&self) -> Tag {
        self.value.tag()
    }

    /// Split into name and value without cloning.
    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }

    /// Children of a compound node. Empty for any other kind of node.
    pub fn children(&self) -> &[Node] {
        match &self.value {
            Value::Compound(children) => children,
            _ => &[],
        }
    }

    /// First child of this compound with the given name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|child| child.name == name)
    }

    /// Every child of this compound with the given name, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children().iter().filter(move |child| child.name == name)
    }
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
        }
    }

    /// The value as an i64 if it is one of the integral types.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v as i64),
            Value::Short(v) => Some(v as i64),
            Value::Int(v) => Some(v as i64),
            Value::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Byte(v) => Some(v as f64),
            Value::Short(v) => Some(v as f64),
            Value::Int(v) => Some(v as f64),
            Value::Long(v) => Some(v as f64),
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&[Node]> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }
}

impl List {
    /// Create a list without checking the items. A list whose items do not
    /// all match `element` fails to encode, use [`List::try_new`] to catch
    /// that up front.
    pub fn new(element: Tag, items: Vec<Value>) -> Self {
        Self { element, items }
    }

    /// Create a list, failing if any item's tag is not `element`.
    pub fn try_new(element: Tag, items: Vec<Value>) -> Result<Self> {
        let list = Self::new(element, items);
        match list.first_mismatch() {
            Some((i, found)) => Err(Error::heterogeneous_list(element, found).within_index(i)),
            None => Ok(list),
        }
    }

    /// An empty list. The element tag is still written, so it matters for
    /// byte-exact output.
    pub fn empty(element: Tag) -> Self {
        Self::new(element, Vec::new())
    }

    /// The declared element tag, which may be `End` for an empty list.
    pub fn element(&self) -> Tag {
        self.element
    }

    /// The elements, in order.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }

    /// Index and tag of the first item that does not match the element tag.
    pub(crate) fn first_mismatch(&self) -> Option<(usize, Tag)> {
        self.items
            .iter()
            .map(Value::tag)
            .enumerate()
            .find(|(_, tag)| *tag != self.element)
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "arbitrary1")]
fn hom_list<'a, T, F>(u: &mut arbitrary::Unstructured<'a>, f: F) -> arbitrary::Result<Vec<Value>>
where
    F: FnMut(T) -> Value,
    T: arbitrary::Arbitrary<'a>,
{
    Ok(u.arbitrary_iter::<T>()?
        .collect::<arbitrary::Result<Vec<_>>>()?
        .into_iter()
        .map(f)
        .collect())
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for List {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        use Value::*;

        let element = u.arbitrary::<Tag>()?;
        let items = match element {
            // The only valid list of End is an empty one.
            Tag::End => vec![],
            Tag::Byte => hom_list(u, Byte)?,
            Tag::Short => hom_list(u, Short)?,
            Tag::Int => hom_list(u, Int)?,
            Tag::Long => hom_list(u, Long)?,
            Tag::Float => hom_list(u, Float)?,
            Tag::Double => hom_list(u, Double)?,
            Tag::ByteArray => hom_list(u, ByteArray)?,
            Tag::String => hom_list(u, String)?,
            Tag::List => hom_list(u, List)?,
            Tag::Compound => hom_list(u, Compound)?,
            Tag::IntArray => hom_list(u, IntArray)?,
            Tag::LongArray => hom_list(u, LongArray)?,
        };

        Ok(Self::new(element, items))
    }
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Value {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        use Value::*;

        Ok(match u.arbitrary::<Tag>()? {
            Tag::End => return Err(arbitrary::Error::IncorrectFormat),
            Tag::Byte => Byte(u.arbitrary()?),
            Tag::Short => Short(u.arbitrary()?),
            Tag::Int => Int(u.arbitrary()?),
            Tag::Long => Long(u.arbitrary()?),
            Tag::Float => Float(u.arbitrary()?),
            Tag::Double => Double(u.arbitrary()?),
            Tag::ByteArray => ByteArray(u.arbitrary()?),
            Tag::String => String(u.arbitrary()?),
            Tag::List => List(u.arbitrary()?),
            Tag::Compound => Compound(u.arbitrary()?),
            Tag::IntArray => IntArray(u.arbitrary()?),
            Tag::LongArray => LongArray(u.arbitrary()?),
        })
    }
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Node {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::new(u.arbitrary::<std::string::String>()?, u.arbitrary::<Value>()?))
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Value {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(i16, Short);
from!(i32, Int);
from!(i64, Long);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(Vec<i8>, ByteArray);
from!(Vec<i32>, IntArray);
from!(Vec<i64>, LongArray);
from!(List, List);
from!(Vec<Node>, Compound);

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}
