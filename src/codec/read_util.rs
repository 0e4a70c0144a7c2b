//! Primitive reading helpers.
//!
//! Fixed-width values go through `byteorder`; this module adds the pieces the
//! Cast layout needs on top: headers, null-terminated strings and bulk element
//! arrays.

use std::io::{self, ErrorKind, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use bytemuck::Pod;

use super::format::CAST_MAGIC;
use crate::util::{Error, Result};

/// Elements read per chunk when filling an array, so a corrupt length can't
/// force one huge allocation before the stream runs dry.
const READ_CHUNK: usize = 64 * 1024;

/// File header as stored on disk (magic already validated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub version: u32,
    pub root_count: u32,
    pub flags: u32,
}

/// Node header as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHeader {
    pub kind: u32,
    pub self_size: u32,
    pub hash: u64,
    pub property_count: u32,
    pub child_count: u32,
}

/// Property header as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyHeader {
    pub kind_tag: u16,
    pub name_len: u16,
    pub array_len: u32,
}

/// Read and validate the file header.
pub fn read_file_header<R: Read>(r: &mut R) -> Result<FileHeader> {
    let magic = r.read_u32::<LittleEndian>()?;
    if magic != CAST_MAGIC {
        return Err(Error::InvalidMagic(magic));
    }
    Ok(FileHeader {
        version: r.read_u32::<LittleEndian>()?,
        root_count: r.read_u32::<LittleEndian>()?,
        flags: r.read_u32::<LittleEndian>()?,
    })
}

/// Read a node header.
pub fn read_node_header<R: Read>(r: &mut R) -> io::Result<NodeHeader> {
    Ok(NodeHeader {
        kind: r.read_u32::<LittleEndian>()?,
        self_size: r.read_u32::<LittleEndian>()?,
        hash: r.read_u64::<LittleEndian>()?,
        property_count: r.read_u32::<LittleEndian>()?,
        child_count: r.read_u32::<LittleEndian>()?,
    })
}

/// Read a property header.
pub fn read_property_header<R: Read>(r: &mut R) -> io::Result<PropertyHeader> {
    Ok(PropertyHeader {
        kind_tag: r.read_u16::<LittleEndian>()?,
        name_len: r.read_u16::<LittleEndian>()?,
        array_len: r.read_u32::<LittleEndian>()?,
    })
}

/// Read exactly `len` raw bytes.
pub fn read_fixed_bytes<R: Read>(r: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read a null-terminated string as raw bytes.
///
/// Stops at the first zero byte (consumed, not returned). Running out of
/// input before a terminator is not an error: whatever was read is returned.
/// No encoding is assumed.
pub fn read_cstring<R: Read>(r: &mut R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    loop {
        match r.read_u8() {
            Ok(0) => break,
            Ok(b) => buf.push(b),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
    }
    Ok(buf)
}

/// Read `count` elements in bulk using `fill`, which decodes one slice at a time.
pub fn read_array<R, T, F>(r: &mut R, count: usize, mut fill: F) -> io::Result<Vec<T>>
where
    R: Read,
    T: Pod,
    F: FnMut(&mut R, &mut [T]) -> io::Result<()>,
{
    let mut out: Vec<T> = Vec::with_capacity(count.min(READ_CHUNK));
    let mut remaining = count;
    while remaining > 0 {
        let n = remaining.min(READ_CHUNK);
        let start = out.len();
        out.resize(start + n, T::zeroed());
        fill(r, &mut out[start..])?;
        remaining -= n;
    }
    Ok(out)
}

/// Read `count` float vectors, each made of `T`-sized groups of f32.
pub fn read_vectors<R: Read, T: Pod>(r: &mut R, count: usize) -> io::Result<Vec<T>> {
    read_array(r, count, |r, dst: &mut [T]| {
        r.read_f32_into::<LittleEndian>(bytemuck::cast_slice_mut(dst))
    })
}
