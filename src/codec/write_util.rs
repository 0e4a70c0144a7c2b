//! Primitive writing helpers, mirroring [`super::read_util`].

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use super::format::CAST_MAGIC;
use super::read_util::{FileHeader, NodeHeader, PropertyHeader};

/// Write the file header, magic first.
pub fn write_file_header<W: Write>(w: &mut W, header: &FileHeader) -> io::Result<()> {
    w.write_u32::<LittleEndian>(CAST_MAGIC)?;
    w.write_u32::<LittleEndian>(header.version)?;
    w.write_u32::<LittleEndian>(header.root_count)?;
    w.write_u32::<LittleEndian>(header.flags)
}

/// Write a node header.
pub fn write_node_header<W: Write>(w: &mut W, header: &NodeHeader) -> io::Result<()> {
    w.write_u32::<LittleEndian>(header.kind)?;
    w.write_u32::<LittleEndian>(header.self_size)?;
    w.write_u64::<LittleEndian>(header.hash)?;
    w.write_u32::<LittleEndian>(header.property_count)?;
    w.write_u32::<LittleEndian>(header.child_count)
}

/// Write a property header.
pub fn write_property_header<W: Write>(w: &mut W, header: &PropertyHeader) -> io::Result<()> {
    w.write_u16::<LittleEndian>(header.kind_tag)?;
    w.write_u16::<LittleEndian>(header.name_len)?;
    w.write_u32::<LittleEndian>(header.array_len)
}

/// Write string bytes followed by exactly one zero byte.
pub fn write_cstring<W: Write>(w: &mut W, s: &[u8]) -> io::Result<()> {
    w.write_all(s)?;
    w.write_u8(0)
}

/// Write a run of f32 components (the payload of every vector kind).
pub fn write_f32s<W: Write>(w: &mut W, values: &[f32]) -> io::Result<()> {
    for &v in values {
        w.write_f32::<LittleEndian>(v)?;
    }
    Ok(())
}
