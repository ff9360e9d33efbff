//! This module contains the encoder, turning a [`Node`] tree into NBT bytes.
//! Use [`to_bytes`] or [`to_writer`].
//!
//! The output is exactly what the decoder reads back into an equal tree, and
//! for data written by other NBT implementations, decoding then encoding gives
//! back the original bytes.
//!
//! Some trees cannot be written. These cases result in an error (not a panic)
//! carrying the path of the offending node, eg `Data/Players[1]/Name`:
//!
//! * a name or string longer than 65535 bytes,
//! * a [`List`] holding a value whose tag is not the list's element tag,
//! * a list or array with more than `i32::MAX` elements.
//!
//! A name that is too long or a mixed list is caught before its tag or list
//! header is written, but anything written before that stays written. Use [`to_bytes`] if you never want to
//! see partial output.
mod write_nbt;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::{
    error::{Error, Result},
    List, Node, Value,
};

use self::write_nbt::WriteNbt;

/// Encode a tree into a new `Vec<u8>`.
pub fn to_bytes(node: &Node) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    to_writer(&mut out, node)?;
    Ok(out)
}

/// Encode a tree into the given writer. The root is written as a named tag.
pub fn to_writer<W: Write>(mut writer: W, node: &Node) -> Result<()> {
    write_named(&mut writer, node)
}

fn write_named<W: Write>(writer: &mut W, node: &Node) -> Result<()> {
    write_named_inner(writer, node).map_err(|e| e.within(node.name()))
}

fn write_named_inner<W: Write>(writer: &mut W, node: &Node) -> Result<()> {
    writer.write_header(node.kind(), node.name())?;
    write_payload(writer, node.value())
}

fn write_payload<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    match value {
        Value::Byte(v) => writer.write_i8(*v)?,
        Value::Short(v) => writer.write_i16::<BigEndian>(*v)?,
        Value::Int(v) => writer.write_i32::<BigEndian>(*v)?,
        Value::Long(v) => writer.write_i64::<BigEndian>(*v)?,
        Value::Float(v) => writer.write_f32::<BigEndian>(*v)?,
        Value::Double(v) => writer.write_f64::<BigEndian>(*v)?,
        Value::String(v) => writer.write_size_prefixed_str(v)?,
        Value::ByteArray(v) => {
            writer.write_len(v.len())?;
            let bytes: Vec<u8> = v.iter().map(|b| *b as u8).collect();
            writer.write_all(&bytes)?;
        }
        Value::IntArray(v) => {
            writer.write_len(v.len())?;
            for i in v {
                writer.write_i32::<BigEndian>(*i)?;
            }
        }
        Value::LongArray(v) => {
            writer.write_len(v.len())?;
            for l in v {
                writer.write_i64::<BigEndian>(*l)?;
            }
        }
        Value::List(list) => write_list(writer, list)?,
        Value::Compound(children) => {
            for child in children {
                write_named(writer, child)?;
            }
            writer.write_tag(crate::Tag::End)?;
        }
    }

    Ok(())
}

fn write_list<W: Write>(writer: &mut W, list: &List) -> Result<()> {
    if let Some((i, found)) = list.first_mismatch() {
        return Err(Error::heterogeneous_list(list.element(), found).within_index(i));
    }

    writer.write_tag(list.element())?;
    writer.write_len(list.len())?;
    for (i, item) in list.iter().enumerate() {
        write_payload(writer, item).map_err(|e| e.within_index(i))?;
    }

    Ok(())
}
