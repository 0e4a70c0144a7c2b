//! Low-level Cast binary layout.
//!
//! Everything is little-endian. A file is a fixed header followed by its root
//! nodes; each node is a header followed by its properties, then its children.
//!
//! ## File Structure
//!
//! ```text
//! +------------------+
//! | Magic: "cast"    |  u32
//! | Version          |  u32
//! | Root count       |  u32
//! | Flags            |  u32
//! +------------------+
//! | Node             |  repeated root count times
//! +------------------+
//!
//! Node:
//! +------------------+
//! | Kind             |  u32 (four-character code)
//! | Self size        |  u32 (header + properties + children)
//! | Hash             |  u64
//! | Property count   |  u32
//! | Child count      |  u32
//! +------------------+
//! | Property         |  repeated property count times
//! | Node             |  repeated child count times
//! +------------------+
//!
//! Property:
//! +------------------+
//! | Kind tag         |  u16
//! | Name length      |  u16
//! | Array length     |  u32
//! | Name bytes       |  no terminator
//! | Payload          |  elements, or one null-terminated string
//! +------------------+
//! ```

mod format;
mod read_util;
mod write_util;

pub use format::*;
pub use read_util::*;
pub use write_util::*;
