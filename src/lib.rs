//! nbtree decodes NBT, the tag-based binary format used for hierarchical save
//! data such as `level.dat` and player files, into an owned tree of named,
//! typed nodes, and encodes such a tree back to the exact same bytes.
//!
//! * For decoding see [`de`], mainly [`from_bytes`] and [`decode`].
//! * For encoding see [`ser`], mainly [`to_bytes`] and [`to_writer`].
//! * For the tree itself see [`Node`], [`Value`] and [`List`].
//! * For a JSON-friendly rendering of a tree see [`pretty`].
//!
//! The codec works on already decompressed bytes. Files on disk are usually
//! GZip compressed, decompress them first (the `tools` crate in this
//! repository shows how).
//!
//! # Quick example
//!
//! ```
//! use nbtree::{List, Node, Tag, Value};
//!
//! # fn main() -> nbtree::error::Result<()> {
//! let root = Node::compound(
//!     "Data",
//!     vec![
//!         Node::new("LevelName", "world"),
//!         Node::new("RandomSeed", i64::MAX),
//!         Node::new("Players", List::empty(Tag::Compound)),
//!     ],
//! );
//!
//! let bytes = nbtree::to_bytes(&root)?;
//! let decoded = nbtree::from_bytes(&bytes)?;
//!
//! assert_eq!(decoded, root);
//! assert_eq!(decoded.get("RandomSeed").map(Node::value).and_then(Value::as_i64), Some(i64::MAX));
//! # Ok(())
//! # }
//! ```
//!
//! # Strings
//!
//! Strings are UTF-8. By default a string that is not valid UTF-8 fails the
//! decode. [`DeOpts::text`] can switch to lossy decoding, which keeps going
//! but can no longer reproduce the original bytes for that string.

pub mod de;
pub mod error;
pub mod pretty;
pub mod ser;

mod input;
mod value;

pub use de::{decode, decode_with_opts, from_bytes, from_bytes_with_opts, Decoded};
pub use ser::{to_bytes, to_writer};
pub use value::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a UTF-8 string.
    String = 8,
    /// Represents a list of unnamed values that all share one tag.
    List = 9,
    /// Represents a struct-like structure of named values.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl Tag {
    /// Symbolic name of the tag, eg `"Compound"`.
    pub fn name(self) -> &'static str {
        match self {
            Tag::End => "End",
            Tag::Byte => "Byte",
            Tag::Short => "Short",
            Tag::Int => "Int",
            Tag::Long => "Long",
            Tag::Float => "Float",
            Tag::Double => "Double",
            Tag::ByteArray => "ByteArray",
            Tag::String => "String",
            Tag::List => "List",
            Tag::Compound => "Compound",
            Tag::IntArray => "IntArray",
            Tag::LongArray => "LongArray",
        }
    }

    /// Fewest bytes a payload of this tag can occupy.
    pub(crate) fn min_width(self) -> usize {
        match self {
            Tag::End => 0,
            Tag::Byte | Tag::Compound => 1,
            Tag::Short | Tag::String => 2,
            Tag::Int | Tag::Float | Tag::ByteArray | Tag::IntArray | Tag::LongArray => 4,
            Tag::List => 5,
            Tag::Long | Tag::Double => 8,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// Written out by hand rather than derived. A new tag means touching both of
// these matches, and the compiler will point at them.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
            Tag::LongArray => 12,
        }
    }
}

/// How string payloads that are not valid UTF-8 are handled while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPolicy {
    /// Fail the decode with [`ErrorKind::MalformedText`][crate::error::ErrorKind::MalformedText].
    Strict,
    /// Replace invalid sequences with U+FFFD and carry on. Re-encoding such a
    /// tree will not give back the original bytes.
    Lossy,
}

/// Options for customizing decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeOpts {
    pub(crate) max_depth: usize,
    pub(crate) max_seq_len: usize,
    pub(crate) text: TextPolicy,
}

impl DeOpts {
    /// Create a new `DeOpts` with the defaults: nesting up to 128 containers
    /// deep, no limit on list or array length, strict UTF-8.
    pub fn new() -> Self {
        Default::default()
    }

    /// Maximum number of nested compounds and lists. Input nested deeper than
    /// this fails rather than growing the stack. The default of 128 fits a
    /// 2 MiB thread stack in unoptimized builds, raise it with care.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Maximum number of elements any single list or array may declare.
    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }

    /// How to handle strings that are not valid UTF-8.
    pub fn text(mut self, policy: TextPolicy) -> Self {
        self.text = policy;
        self
    }
}

impl Default for DeOpts {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_seq_len: usize::MAX,
            text: TextPolicy::Strict,
        }
    }
}
