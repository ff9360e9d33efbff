//! Contains the Error and Result types used by the decoder and encoder.
use std::fmt::Display;

use crate::Tag;

/// Where an error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Byte offset into the input being decoded.
    Offset(usize),
    /// Path of the node being encoded, eg `Data/Players[2]/Name`.
    Path(String),
    /// No location was recorded.
    Unknown,
}

/// Various errors that can occur during decoding or encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
    location: Location,
    // Encode path, innermost segment first.
    path: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Name(String),
    Index(usize),
}

/// What went wrong. New variants may be added, so match with a wildcard arm.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other errors. Users should not match on this variant and should
    /// instead use a wildcard `_`. Errors in this category may be moved to new
    /// variants.
    Other,

    /// A read needed more bytes than were left in the input.
    BufferUnderrun { needed: usize, remaining: usize },

    /// A tag byte outside of 0 to 12.
    UnknownTag(u8),

    /// The root of the input was an End tag, so there is no tree.
    NoRoot,

    /// A list declared elements of type End but a non-zero length.
    EndInList,

    /// A string payload was not valid UTF-8. Contains the offending bytes.
    MalformedText(Vec<u8>),

    /// Containers were nested deeper than allowed by
    /// [`DeOpts::max_depth`][crate::DeOpts::max_depth].
    DepthLimit(usize),

    /// A list or array declared more elements than allowed by
    /// [`DeOpts::max_seq_len`][crate::DeOpts::max_seq_len].
    SeqTooLong(usize),

    /// A string needed more than 65535 bytes when encoded.
    StringTooLong(usize),

    /// A list contained a value whose tag differed from the list's element tag.
    ListHeterogeneity { expected: Tag, found: Tag },

    /// A list or array had more elements than fit in the i32 length field.
    LengthOverflow(usize),

    /// The writer failed while encoding.
    Io(std::io::ErrorKind),
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Location::Offset(offset) => write!(f, "{} (at byte {})", self.msg, offset),
            Location::Path(path) => write!(f, "{} (at {})", self.msg, path),
            Location::Unknown => f.write_str(&self.msg),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self {
            msg: format!("io error: {}", e),
            kind: ErrorKind::Io(e.kind()),
            location: Location::Unknown,
            path: Vec::new(),
        }
    }
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Get where the error occurred.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Byte offset into the input, for decode errors.
    pub fn offset(&self) -> Option<usize> {
        match self.location {
            Location::Offset(o) => Some(o),
            _ => None,
        }
    }

    /// Node path, for encode errors.
    pub fn path(&self) -> Option<&str> {
        match &self.location {
            Location::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Whether the input ended before the tree was complete.
    pub fn is_underrun(&self) -> bool {
        matches!(self.kind, ErrorKind::BufferUnderrun { .. })
    }

    fn new(kind: ErrorKind, msg: String) -> Self {
        Self {
            msg,
            kind,
            location: Location::Unknown,
            path: Vec::new(),
        }
    }

    /// Attach a location if the error does not already have one. Errors are
    /// located where they are first noticed, the innermost site wins.
    pub(crate) fn at(mut self, location: Location) -> Self {
        if self.location == Location::Unknown {
            self.location = location;
        }
        self
    }

    pub(crate) fn at_offset(self, offset: usize) -> Self {
        self.at(Location::Offset(offset))
    }

    /// Prefix the error's node path with the name of the containing node.
    pub(crate) fn within(self, name: &str) -> Self {
        self.push_segment(Segment::Name(name.to_owned()))
    }

    /// Prefix the error's node path with a list index, eg `[2]/id`.
    pub(crate) fn within_index(self, index: usize) -> Self {
        self.push_segment(Segment::Index(index))
    }

    fn push_segment(mut self, segment: Segment) -> Self {
        self.path.push(segment);

        let mut path = String::new();
        for (i, segment) in self.path.iter().rev().enumerate() {
            match segment {
                Segment::Name(name) => {
                    if i > 0 {
                        path.push('/');
                    }
                    path.push_str(name);
                }
                Segment::Index(index) => path.push_str(&format!("[{}]", index)),
            }
        }

        self.location = Location::Path(path);
        self
    }

    pub(crate) fn underrun(needed: usize, remaining: usize) -> Self {
        Self::new(
            ErrorKind::BufferUnderrun { needed, remaining },
            format!(
                "eof: needed {} bytes but only {} remain",
                needed, remaining
            ),
        )
    }

    pub(crate) fn unknown_tag(tag: u8) -> Self {
        Self::new(
            ErrorKind::UnknownTag(tag),
            format!("invalid nbt tag value: {}", tag),
        )
    }

    pub(crate) fn no_root() -> Self {
        Self::new(
            ErrorKind::NoRoot,
            "invalid nbt: root tag is End".to_owned(),
        )
    }

    pub(crate) fn end_in_list(size: usize) -> Self {
        Self::new(
            ErrorKind::EndInList,
            format!("unexpected list of type 'end' with {} elements", size),
        )
    }

    pub(crate) fn malformed_text(data: &[u8]) -> Self {
        Self::new(
            ErrorKind::MalformedText(data.to_vec()),
            format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
        )
    }

    pub(crate) fn depth_limit(limit: usize) -> Self {
        Self::new(
            ErrorKind::DepthLimit(limit),
            format!("nbt nested deeper than {} containers", limit),
        )
    }

    pub(crate) fn seq_too_long(len: usize) -> Self {
        Self::new(
            ErrorKind::SeqTooLong(len),
            format!("exceeded max sequence length: {}", len),
        )
    }

    pub(crate) fn string_too_long(len: usize) -> Self {
        Self::new(
            ErrorKind::StringTooLong(len),
            format!("string of {} bytes does not fit a u16 length", len),
        )
    }

    pub(crate) fn heterogeneous_list(expected: Tag, found: Tag) -> Self {
        Self::new(
            ErrorKind::ListHeterogeneity { expected, found },
            format!("list of {} contains a {}", expected, found),
        )
    }

    pub(crate) fn length_overflow(len: usize) -> Self {
        Self::new(
            ErrorKind::LengthOverflow(len),
            format!("len too large: {}", len),
        )
    }
}
