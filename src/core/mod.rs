//! Core node/property model and its binary encoding.
//!
//! - [`Property`] - named, typed value array
//! - [`Node`] - kind, hash, ordered properties, owned children
//! - [`NodeRef`] - borrowed cursor with parent links, and reference resolution
//! - [`HashAllocator`] - hashes for newly created nodes
//! - [`CastFile`] - header fields plus root nodes

mod builder;
mod cursor;
mod file;
mod hash;
mod node;
mod property;
mod resolve;

pub use builder::*;
pub use cursor::*;
pub use file::*;
pub use hash::*;
pub use node::*;
pub use property::*;
pub use resolve::*;
