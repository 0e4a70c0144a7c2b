//! # Cast
//!
//! Rust implementation of the Cast (.cast) 3D scene interchange format.
//!
//! A Cast file is a tree of typed nodes (models, meshes, skeletons, bones,
//! animations, materials, ...). Every node carries a 64-bit identity hash, an
//! ordered set of named, typed property arrays and its child nodes. Nodes
//! refer to each other by storing a target's hash in an `int64` property.
//!
//! Decoding then re-encoding a well-formed file reproduces it byte for byte:
//! property order is preserved and every size field is recomputed exactly.
//!
//! ## Modules
//!
//! - [`util`] - Errors and vector types
//! - [`codec`] - Low-level binary layout (headers, strings, bulk arrays)
//! - [`core`] - Properties, nodes, cursors, reference resolution, files
//! - [`schema`] - Named views over the standard node kinds
//!
//! ## Example
//!
//! ```no_run
//! use cast::prelude::*;
//!
//! let file = CastFile::open("character.cast")?;
//! for root in file.root_refs() {
//!     for model in root.children().filter_map(Model::new) {
//!         for mesh in model.meshes() {
//!             println!("{:?}: {} vertices", mesh.name(), mesh.positions()?.len());
//!         }
//!     }
//! }
//! # Ok::<(), cast::Error>(())
//! ```

pub mod util;
pub mod codec;
pub mod core;
pub mod schema;

// Re-export commonly used types
pub use util::{Error, Result};
pub use crate::core::{CastFile, Node, NodeKind, NodeRef, Property, PropertyKind, PropertyValues};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result, Vec2, Vec3, Vec4};
    pub use crate::core::{
        CastFile, HashAllocator, Node, NodeBuilder, NodeKind, NodeRef, Property, PropertyKind,
        PropertyValue, PropertyValues, ReferenceScope, Relation,
    };
    pub use crate::schema::*;
}
