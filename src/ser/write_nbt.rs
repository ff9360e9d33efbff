use std::convert::TryInto;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::Tag;

/// Primitive NBT writes on top of any `Write`.
pub(crate) trait WriteNbt: Write {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_u8(tag.into())?;
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, s: &str) -> Result<()> {
        let len = str_len(s)?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Tag and name of a named tag. Nothing is written if the name is too
    /// long.
    fn write_header(&mut self, tag: Tag, name: &str) -> Result<()> {
        let len = str_len(name)?;
        self.write_tag(tag)?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(name.as_bytes())?;
        Ok(())
    }

    /// Lengths of lists and arrays are signed on the wire.
    fn write_len(&mut self, len: usize) -> Result<()> {
        let len: i32 = len
            .try_into()
            .map_err(|_| Error::length_overflow(len))?;
        self.write_i32::<BigEndian>(len)?;
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

fn str_len(s: &str) -> Result<u16> {
    s.len()
        .try_into()
        .map_err(|_| Error::string_too_long(s.len()))
}
