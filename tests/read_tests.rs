//! Integration tests decoding hand-assembled Cast bytes.

use byteorder::{LittleEndian, WriteBytesExt};
use cast::prelude::*;
use cast::codec::{kinds, tags, CAST_MAGIC};

fn file_header(buf: &mut Vec<u8>, roots: u32) {
    buf.write_u32::<LittleEndian>(CAST_MAGIC).unwrap();
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u32::<LittleEndian>(roots).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap();
}

fn node_header(buf: &mut Vec<u8>, kind: u32, size: u32, hash: u64, props: u32, children: u32) {
    buf.write_u32::<LittleEndian>(kind).unwrap();
    buf.write_u32::<LittleEndian>(size).unwrap();
    buf.write_u64::<LittleEndian>(hash).unwrap();
    buf.write_u32::<LittleEndian>(props).unwrap();
    buf.write_u32::<LittleEndian>(children).unwrap();
}

fn property_header(buf: &mut Vec<u8>, tag: u16, name: &str, array_len: u32) {
    buf.write_u16::<LittleEndian>(tag).unwrap();
    buf.write_u16::<LittleEndian>(name.len() as u16).unwrap();
    buf.write_u32::<LittleEndian>(array_len).unwrap();
    buf.extend_from_slice(name.as_bytes());
}

/// One mesh root named "Cube" with two vertex positions.
fn cube_bytes() -> Vec<u8> {
    let mut buf = Vec::new();
    file_header(&mut buf, 1);
    // 24 header + (8 + 1 + 5) name + (8 + 2 + 24) positions
    node_header(&mut buf, kinds::MESH, 72, 0x10, 2, 0);

    property_header(&mut buf, tags::STRING, "n", 5);
    buf.extend_from_slice(b"Cube\0");

    property_header(&mut buf, tags::VECTOR3, "vp", 2);
    for v in [0.0f32, 0.0, 0.0, 1.0, 1.0, 1.0] {
        buf.write_f32::<LittleEndian>(v).unwrap();
    }
    buf
}

#[test]
fn test_decode_cube() {
    let bytes = cube_bytes();
    let file = CastFile::from_bytes(&bytes).expect("Failed to decode");

    assert_eq!(file.version(), 1);
    assert_eq!(file.roots().len(), 1);

    let mesh = &file.roots()[0];
    assert_eq!(mesh.kind(), NodeKind::Mesh);
    assert_eq!(mesh.hash(), 0x10);
    assert_eq!(mesh.stored_size(), Some(72));
    assert_eq!(mesh.string("n").unwrap(), "Cube");
    assert_eq!(
        mesh.values::<Vec3>("vp").unwrap(),
        &[Vec3::ZERO, Vec3::ONE]
    );

    let names: Vec<&[u8]> = mesh.properties().map(Property::name_bytes).collect();
    assert_eq!(names, [&b"n"[..], &b"vp"[..]]);

    let view = Mesh::new(file.root(0).unwrap()).unwrap();
    assert_eq!(view.name(), Some("Cube"));
    assert_eq!(view.positions().unwrap().len(), 2);
}

#[test]
fn test_reencode_is_identical() {
    let bytes = cube_bytes();
    let file = CastFile::from_bytes(&bytes).unwrap();
    assert_eq!(file.size(), bytes.len());
    assert_eq!(file.to_bytes().unwrap(), bytes);
    assert!(file.size_mismatches().is_empty());
}

#[test]
fn test_bad_magic() {
    let mut bytes = cube_bytes();
    bytes[..4].copy_from_slice(&0xDEADBEEFu32.to_le_bytes());

    let err = CastFile::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, Error::InvalidMagic(0xDEADBEEF)));
    assert!(err.is_format_error());
}

#[test]
fn test_unsupported_property_kind() {
    let mut buf = Vec::new();
    file_header(&mut buf, 1);
    node_header(&mut buf, kinds::ROOT, 0, 1, 1, 0);
    property_header(&mut buf, 0x1234, "x", 1);
    buf.push(0);

    let err = CastFile::from_bytes(&buf).unwrap_err();
    assert!(matches!(err, Error::UnsupportedPropertyKind(0x1234)));
    assert!(matches!(Property::create(0x1234, "x", 1), Err(Error::UnsupportedPropertyKind(0x1234))));
}

#[test]
fn test_truncated_input() {
    let bytes = cube_bytes();
    let err = CastFile::from_bytes(&bytes[..bytes.len() - 4]).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_stale_stored_size_is_reported() {
    let mut bytes = cube_bytes();
    // self_size sits right after the 16-byte file header and the 4-byte kind
    bytes[20..24].copy_from_slice(&99u32.to_le_bytes());

    let file = CastFile::from_bytes(&bytes).unwrap();
    assert_eq!(file.size_mismatches(), [(0x10, 99, 72)]);

    // encoding always writes the recomputed size
    let out = file.to_bytes().unwrap();
    assert_eq!(&out[20..24], &72u32.to_le_bytes());
}

#[test]
fn test_unknown_node_kind_survives() {
    let mut buf = Vec::new();
    file_header(&mut buf, 1);
    node_header(&mut buf, 0x6F6F_6F66, 24, 7, 0, 0);

    let file = CastFile::from_bytes(&buf).unwrap();
    assert_eq!(file.roots()[0].kind(), NodeKind::Unknown(0x6F6F_6F66));
    assert_eq!(file.to_bytes().unwrap(), buf);
}

#[test]
fn test_duplicate_child_hash_first_wins() {
    let mut buf = Vec::new();
    file_header(&mut buf, 1);
    node_header(&mut buf, kinds::ROOT, 24 + 3 * 24, 1, 0, 3);
    node_header(&mut buf, kinds::MODEL, 24, 5, 0, 0);
    node_header(&mut buf, kinds::MESH, 24, 5, 0, 0);
    node_header(&mut buf, kinds::MODEL, 24, 6, 0, 0);

    let file = CastFile::from_bytes(&buf).unwrap();
    let root = file.root(0).unwrap();
    assert_eq!(root.child_by_hash(5).unwrap().kind(), NodeKind::Model);
    assert!(root.child_by_hash(42).is_none());
    assert_eq!(file.to_bytes().unwrap(), buf);
}

#[test]
fn test_empty_file_header_only() {
    let mut buf = Vec::new();
    file_header(&mut buf, 0);
    let file = CastFile::from_bytes(&buf).unwrap();
    assert!(file.roots().is_empty());
    assert_eq!(file.to_bytes().unwrap(), buf);
}

#[test]
fn test_latin1_string_roundtrip() {
    let mut buf = Vec::new();
    file_header(&mut buf, 1);
    // 24 header + (8 + 1 + 5) name
    node_header(&mut buf, kinds::BONE, 38, 0x20, 1, 0);
    property_header(&mut buf, tags::STRING, "n", 5);
    buf.extend_from_slice(b"b\xE9ne\0");

    let file = CastFile::from_bytes(&buf).expect("Failed to decode");
    let bone = &file.roots()[0];
    let name = bone.property("n").unwrap();
    assert_eq!(name.as_bytes().unwrap(), b"b\xE9ne");
    assert!(matches!(bone.string("n"), Err(Error::Utf8(_))));

    let view = Bone::new(file.root(0).unwrap()).unwrap();
    assert_eq!(view.name(), None);

    assert_eq!(file.to_bytes().unwrap(), buf);
    assert!(file.size_mismatches().is_empty());
}
