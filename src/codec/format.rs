//! Cast format constants.

/// Magic value at the start of a Cast file ("cast" read as a little-endian u32).
pub const CAST_MAGIC: u32 = 0x7473_6163;

/// Version written by newly created files.
pub const CURRENT_VERSION: u32 = 1;

/// Size of the file header in bytes.
pub const FILE_HEADER_SIZE: usize = 16;

/// Size of a node header in bytes.
pub const NODE_HEADER_SIZE: usize = 24;

/// Size of a property header in bytes.
pub const PROPERTY_HEADER_SIZE: usize = 8;

/// First hash issued to programmatically created nodes.
pub const HASH_SEED: u64 = 0x534E_4957_5254_5250;

/// Property kind tags.
pub mod tags {
    pub const BYTE: u16 = b'b' as u16;
    pub const SHORT: u16 = b'h' as u16;
    pub const INTEGER32: u16 = b'i' as u16;
    pub const INTEGER64: u16 = b'l' as u16;
    pub const FLOAT: u16 = b'f' as u16;
    pub const DOUBLE: u16 = b'd' as u16;
    pub const STRING: u16 = b's' as u16;
    pub const VECTOR2: u16 = 0x7632;
    pub const VECTOR3: u16 = 0x7633;
    pub const VECTOR4: u16 = 0x7634;
}

/// Node kind codes (four ASCII characters read as a little-endian u32).
pub mod kinds {
    pub const ROOT: u32 = 0x746F_6F72;
    pub const MODEL: u32 = 0x6C64_6F6D;
    pub const MESH: u32 = 0x6873_656D;
    pub const BLEND_SHAPE: u32 = 0x6873_6C62;
    pub const SKELETON: u32 = 0x6C65_6B73;
    pub const BONE: u32 = 0x656E_6F62;
    pub const IK_HANDLE: u32 = 0x6468_6B69;
    pub const CONSTRAINT: u32 = 0x7473_6E63;
    pub const ANIMATION: u32 = 0x6D69_6E61;
    pub const CURVE: u32 = 0x7672_7563;
    pub const NOTIFICATION_TRACK: u32 = 0x6669_746E;
    pub const MATERIAL: u32 = 0x6C74_616D;
    pub const FILE: u32 = 0x656C_6966;
    pub const INSTANCE: u32 = 0x7473_6E69;
}

/// Render a four-character code as text, replacing non-printable bytes with '.'.
pub fn fourcc(code: u32) -> String {
    code.to_le_bytes()
        .iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic() {
        assert_eq!(&CAST_MAGIC.to_le_bytes(), b"cast");
    }

    #[test]
    fn test_kind_codes_spell_names() {
        assert_eq!(fourcc(kinds::ROOT), "root");
        assert_eq!(fourcc(kinds::MESH), "mesh");
        assert_eq!(fourcc(kinds::SKELETON), "skel");
        assert_eq!(fourcc(kinds::IK_HANDLE), "ikhd");
        assert_eq!(fourcc(kinds::NOTIFICATION_TRACK), "ntif");
        assert_eq!(fourcc(0x0000_0001), "....");
    }

    #[test]
    fn test_vector_tags() {
        assert_eq!(&tags::VECTOR2.to_be_bytes(), b"v2");
        assert_eq!(&tags::VECTOR4.to_be_bytes(), b"v4");
    }
}
