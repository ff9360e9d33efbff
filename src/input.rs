use byteorder::{BigEndian, ReadBytesExt};

use crate::{
    error::{Error, Result},
    Tag,
};

/// Read cursor over the input. Each consume shrinks `data` from the front, so
/// the input itself is never touched and `offset` always says how far in we
/// are.
pub(crate) struct Slice<'de> {
    data: &'de [u8],
    offset: usize,
}

impl<'de> Slice<'de> {
    pub(crate) fn new(data: &'de [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len()
    }

    /// Fail unless at least `n` bytes remain. Nothing is consumed.
    pub(crate) fn ensure(&self, n: usize) -> Result<()> {
        if n <= self.data.len() {
            Ok(())
        } else {
            Err(Error::underrun(n, self.data.len()).at_offset(self.offset))
        }
    }

    pub(crate) fn consume(&mut self, n: usize) -> Result<&'de [u8]> {
        self.ensure(n)?;
        let (taken, rest) = self.data.split_at(n);
        self.data = rest;
        self.offset += n;
        Ok(taken)
    }

    pub(crate) fn consume_byte(&mut self) -> Result<u8> {
        Ok(self.consume(1)?[0])
    }

    pub(crate) fn consume_tag(&mut self) -> Result<Tag> {
        let start = self.offset;
        let tag = self.consume_byte()?;
        Tag::try_from(tag).map_err(|_| Error::unknown_tag(tag).at_offset(start))
    }

    /// Consume a u16 length prefixed string, returning the raw bytes.
    pub(crate) fn consume_str_bytes(&mut self) -> Result<&'de [u8]> {
        let len = self.consume(2)?.read_u16::<BigEndian>()? as usize;
        self.consume(len)
    }

    pub(crate) fn consume_i8(&mut self) -> Result<i8> {
        Ok(self.consume(1)?.read_i8()?)
    }

    pub(crate) fn consume_i16(&mut self) -> Result<i16> {
        let mut bs = self.consume(std::mem::size_of::<i16>())?;
        Ok(bs.read_i16::<BigEndian>()?)
    }

    pub(crate) fn consume_i32(&mut self) -> Result<i32> {
        let mut bs = self.consume(std::mem::size_of::<i32>())?;
        Ok(bs.read_i32::<BigEndian>()?)
    }

    pub(crate) fn consume_i64(&mut self) -> Result<i64> {
        let mut bs = self.consume(std::mem::size_of::<i64>())?;
        Ok(bs.read_i64::<BigEndian>()?)
    }

    pub(crate) fn consume_f32(&mut self) -> Result<f32> {
        let mut bs = self.consume(std::mem::size_of::<f32>())?;
        Ok(bs.read_f32::<BigEndian>()?)
    }

    pub(crate) fn consume_f64(&mut self) -> Result<f64> {
        let mut bs = self.consume(std::mem::size_of::<f64>())?;
        Ok(bs.read_f64::<BigEndian>()?)
    }
}
