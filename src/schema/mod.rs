//! Typed views over the standard node kinds.
//!
//! Each view wraps a [`NodeRef`] of the matching kind and exposes named
//! accessors over its properties. Reference-carrying properties are resolved
//! with the scope listed in [`relations`].

use crate::core::{NodeRef, PropertyValue, PropertyValues, Relation};
use crate::util::{Error, Result};

macro_rules! node_view {
    ($(#[$meta:meta])* $view:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $view<'a>(crate::core::NodeRef<'a>);

        impl<'a> $view<'a> {
            pub const KIND: crate::core::NodeKind = crate::core::NodeKind::$kind;

            /// Wrap `node` if it is of this kind.
            pub fn new(node: crate::core::NodeRef<'a>) -> Option<Self> {
                (node.kind() == Self::KIND).then_some(Self(node))
            }

            #[inline]
            pub fn node(&self) -> &crate::core::NodeRef<'a> {
                &self.0
            }

            #[inline]
            pub fn hash(&self) -> u64 {
                self.0.hash()
            }

            /// The `n` property.
            pub fn name(&self) -> Option<&'a str> {
                self.0.node().string(crate::schema::names::NAME).ok()
            }
        }
    };
}

pub mod names;
mod animation;
mod mesh;
mod skeleton;

pub use animation::*;
pub use mesh::*;
pub use skeleton::*;

/// Reference-carrying properties and where their targets live.
pub mod relations {
    use super::names;
    use crate::core::Relation;

    pub const MESH_MATERIAL: Relation = Relation::subtree(names::MATERIAL);
    pub const BLEND_SHAPE_BASE: Relation = Relation::subtree(names::BASE_SHAPE);
    pub const BLEND_SHAPE_TARGETS: Relation = Relation::subtree(names::TARGET_SHAPE);

    pub const IK_START_BONE: Relation = Relation::sibling(names::START_BONE);
    pub const IK_END_BONE: Relation = Relation::sibling(names::END_BONE);
    pub const IK_TARGET_BONE: Relation = Relation::sibling(names::TARGET_BONE);
    pub const IK_POLE_VECTOR_BONE: Relation = Relation::sibling(names::POLE_VECTOR_BONE);
    pub const IK_POLE_BONE: Relation = Relation::sibling(names::POLE_BONE);

    pub const CONSTRAINT_BONE: Relation = Relation::sibling(names::CONSTRAINT_BONE);
    pub const CONSTRAINT_TARGET_BONE: Relation = Relation::sibling(names::TARGET_BONE);

    pub const INSTANCE_REFERENCE_FILE: Relation = Relation::sibling(names::REFERENCE_FILE);

    /// A material's texture slot: any property name, resolved among its files.
    pub const fn material_slot(slot: &'static str) -> Relation {
        Relation::subtree(slot)
    }
}

/// First value of a property, if present and of type `T`.
fn first<T: PropertyValue>(node: &NodeRef<'_>, name: &str) -> Option<T> {
    node.node().value::<T>(name).ok().copied()
}

/// A byte property read as a flag.
fn flag(node: &NodeRef<'_>, name: &str) -> Option<bool> {
    first::<u8>(node, name).map(|b| b != 0)
}

/// Wrap every resolved target that has the view's kind.
fn resolve_views<'a, V>(node: &NodeRef<'a>, relation: Relation, wrap: fn(NodeRef<'a>) -> Option<V>) -> Vec<V> {
    node.resolve_all(relation).into_iter().filter_map(wrap).collect()
}

/// An index buffer widened to u32. Writers pick the narrowest unsigned type
/// that fits, so byte, short and int32 are all accepted.
fn indices(node: &NodeRef<'_>, name: &str) -> Result<Vec<u32>> {
    match node.node().try_property(name)?.values() {
        PropertyValues::Byte(v) => Ok(v.iter().map(|&i| u32::from(i)).collect()),
        PropertyValues::Short(v) => Ok(v.iter().map(|&i| u32::from(i)).collect()),
        PropertyValues::Integer32(v) => Ok(v.clone()),
        other => Err(Error::mismatch("byte, short or int32", other.kind().name())),
    }
}
