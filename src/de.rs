//! This module contains the decoder, turning NBT bytes into a [`Node`] tree.
//!
//! The input must already be decompressed. Decoding reads exactly one named
//! tag, normally a compound, and fails rather than returning part of a tree
//! if the input is malformed. Every error carries the byte offset the failing
//! read started at.
//!
//! ```
//! # use nbtree::error::Result;
//! # fn main() -> Result<()> {
//! // A compound named "hello" with a single string, followed by the End tag.
//! let input = [
//!     10, 0, 5, b'h', b'e', b'l', b'l', b'o',
//!     8, 0, 4, b'n', b'a', b'm', b'e', 0, 2, b'h', b'i',
//!     0,
//! ];
//!
//! let decoded = nbtree::decode(&input)?;
//! assert_eq!(decoded.consumed, input.len());
//! assert_eq!(decoded.node.name(), "hello");
//! assert_eq!(decoded.node.get("name").unwrap().value().as_str(), Some("hi"));
//! # Ok(())
//! # }
//! ```
//!
//! # Lengths
//!
//! Lists and arrays carry a signed 32-bit length. A length of zero or less is
//! an empty collection. Lengths are checked against what is left of the input
//! before anything is allocated, so a small input cannot claim a huge list.
//!
//! # Nesting
//!
//! Each nested compound or list uses some stack. [`DeOpts::max_depth`] bounds
//! this, input nested deeper fails with
//! [`ErrorKind::DepthLimit`][crate::error::ErrorKind::DepthLimit]. Long runs
//! of siblings are read in a loop and cost no stack.
use log::{debug, trace};

use crate::{
    error::{Error, Result},
    input::Slice,
    DeOpts, List, Node, TextPolicy, Tag, Value,
};

/// The result of decoding: the root node and how much input it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub node: Node,
    /// Bytes of input making up the root tag.
    pub consumed: usize,
    /// Bytes left over after the root tag. Zero for well-formed input.
    pub trailing: usize,
}

/// Decode the root tag of `input`, reporting how many bytes it took.
pub fn decode(input: &[u8]) -> Result<Decoded> {
    decode_with_opts(input, DeOpts::default())
}

/// Decode the root tag of `input` with the given options.
pub fn decode_with_opts(input: &[u8], opts: DeOpts) -> Result<Decoded> {
    let mut de = Decoder::new(input, opts);
    let node = de.root()?;

    let consumed = de.input.offset();
    let trailing = de.input.remaining();
    if trailing > 0 {
        debug!("{} trailing bytes after root tag {:?}", trailing, node.name());
    }

    Ok(Decoded {
        node,
        consumed,
        trailing,
    })
}

/// Decode the root tag of `input`. Trailing bytes are ignored.
pub fn from_bytes(input: &[u8]) -> Result<Node> {
    decode(input).map(|d| d.node)
}

/// Decode the root tag of `input` with the given options. Trailing bytes are
/// ignored.
pub fn from_bytes_with_opts(input: &[u8], opts: DeOpts) -> Result<Node> {
    decode_with_opts(input, opts).map(|d| d.node)
}

/// Recursive descent over the input. One call per nested container, a loop
/// per run of siblings.
struct Decoder<'de> {
    input: Slice<'de>,
    opts: DeOpts,
    depth: usize,
}

impl<'de> Decoder<'de> {
    fn new(input: &'de [u8], opts: DeOpts) -> Self {
        Self {
            input: Slice::new(input),
            opts,
            depth: 0,
        }
    }

    fn root(&mut self) -> Result<Node> {
        self.named_tag()?
            .ok_or_else(|| Error::no_root().at_offset(0))
    }

    /// Read a tag, its name and its payload. Returns `None` for an End tag,
    /// which is just the single tag byte.
    fn named_tag(&mut self) -> Result<Option<Node>> {
        let tag = self.input.consume_tag()?;
        if tag == Tag::End {
            return Ok(None);
        }

        let name = self.string()?;
        let value = self.payload(tag)?;
        Ok(Some(Node::new(name, value)))
    }

    fn string(&mut self) -> Result<String> {
        let start = self.input.offset();
        let bytes = self.input.consume_str_bytes()?;

        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_owned()),
            Err(_) => match self.opts.text {
                TextPolicy::Strict => Err(Error::malformed_text(bytes).at_offset(start)),
                TextPolicy::Lossy => {
                    debug!("replaced invalid utf-8 in string at byte {}", start);
                    Ok(String::from_utf8_lossy(bytes).into_owned())
                }
            },
        }
    }

    fn payload(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            Tag::Byte => Value::Byte(self.input.consume_i8()?),
            Tag::Short => Value::Short(self.input.consume_i16()?),
            Tag::Int => Value::Int(self.input.consume_i32()?),
            Tag::Long => Value::Long(self.input.consume_i64()?),
            Tag::Float => Value::Float(self.input.consume_f32()?),
            Tag::Double => Value::Double(self.input.consume_f64()?),
            Tag::String => Value::String(self.string()?),
            Tag::ByteArray => {
                let len = self.len(Tag::Byte)?;
                let bytes = self.input.consume(len)?;
                Value::ByteArray(bytes.iter().map(|b| *b as i8).collect())
            }
            Tag::IntArray => Value::IntArray(self.array(Tag::Int, Slice::consume_i32)?),
            Tag::LongArray => Value::LongArray(self.array(Tag::Long, Slice::consume_i64)?),
            Tag::List => Value::List(self.list()?),
            Tag::Compound => Value::Compound(self.compound()?),
            // Named tags return before reading a payload for End, and lists
            // of End are only accepted when empty.
            Tag::End => unreachable!("End tag has no payload"),
        })
    }

    /// Read a collection length. Negative lengths mean empty. The length is
    /// checked against the remaining input assuming every element is as small
    /// as `element` allows.
    fn len(&mut self, element: Tag) -> Result<usize> {
        let start = self.input.offset();
        let size = self.input.consume_i32()?;
        let len = usize::try_from(size).unwrap_or(0);

        if len > self.opts.max_seq_len {
            return Err(Error::seq_too_long(len).at_offset(start));
        }

        self.input.ensure(len.saturating_mul(element.min_width()))?;
        Ok(len)
    }

    fn array<T>(&mut self, element: Tag, read: fn(&mut Slice<'de>) -> Result<T>) -> Result<Vec<T>> {
        let len = self.len(element)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(read(&mut self.input)?);
        }
        Ok(items)
    }

    // Containers are kept out of line so `payload`, which sits on the
    // recursive path, stays a small frame.
    #[inline(never)]
    fn list(&mut self) -> Result<List> {
        let element = self.input.consume_tag()?;
        let start = self.input.offset();
        let len = self.len(element)?;

        // A list of End has no payloads to read. Older data writes empty lists
        // this way, anything longer is rejected.
        if element == Tag::End && len > 0 {
            return Err(Error::end_in_list(len).at_offset(start));
        }

        trace!("list of {} x {} at byte {}", len, element, start);

        self.enter()?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.payload(element)?);
        }
        self.depth -= 1;

        Ok(List::new(element, items))
    }

    #[inline(never)]
    fn compound(&mut self) -> Result<Vec<Node>> {
        self.enter()?;
        let mut children = Vec::new();
        while let Some(child) = self.named_tag()? {
            children.push(child);
        }
        self.depth -= 1;

        Ok(children)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.opts.max_depth {
            return Err(Error::depth_limit(self.opts.max_depth).at_offset(self.input.offset()));
        }
        self.depth += 1;
        Ok(())
    }
}
