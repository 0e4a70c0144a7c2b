//! Hash-based cross-reference resolution.
//!
//! A reference is an `Integer64` property whose value is another node's
//! identity hash. Where the target lives depends on the relation:
//!
//! - [`ReferenceScope::Subtree`]: among the referencing node's own children
//!   (a mesh's material, a blend shape's meshes, a material's file slots).
//! - [`ReferenceScope::Sibling`]: among the children of the referencing
//!   node's parent (an IK handle's or constraint's bones under a skeleton).

use super::cursor::NodeRef;
use crate::util::{Error, Result};

/// Where a reference's target is looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceScope {
    /// Direct children of the referencing node.
    Subtree,
    /// Direct children of the referencing node's parent.
    Sibling,
}

/// A reference-carrying property paired with its lookup scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relation {
    pub property: &'static str,
    pub scope: ReferenceScope,
}

impl Relation {
    pub const fn subtree(property: &'static str) -> Self {
        Self { property, scope: ReferenceScope::Subtree }
    }

    pub const fn sibling(property: &'static str) -> Self {
        Self { property, scope: ReferenceScope::Sibling }
    }
}

impl<'a> NodeRef<'a> {
    /// The node whose children are searched for `scope`.
    fn scope_owner(&self, scope: ReferenceScope) -> Option<NodeRef<'a>> {
        match scope {
            ReferenceScope::Subtree => Some(self.clone()),
            ReferenceScope::Sibling => self.parent(),
        }
    }

    /// Look up `hash` in `scope`. `None` if the scope has no owner (a sibling
    /// lookup from a parentless node) or no child carries the hash.
    pub fn lookup(&self, hash: u64, scope: ReferenceScope) -> Option<NodeRef<'a>> {
        self.scope_owner(scope)?.child_by_hash(hash)
    }

    /// Resolve the first hash stored in `relation`'s property.
    ///
    /// Absent or mistyped properties resolve to `None`, as do missing targets.
    pub fn resolve(&self, relation: Relation) -> Option<NodeRef<'a>> {
        let hash = *self.node().value::<u64>(relation.property).ok()?;
        self.lookup(hash, relation.scope)
    }

    /// Resolve every hash stored in `relation`'s property, skipping the ones
    /// without a target.
    pub fn resolve_all(&self, relation: Relation) -> Vec<NodeRef<'a>> {
        let Ok(hashes) = self.node().values::<u64>(relation.property) else {
            return Vec::new();
        };
        let Some(owner) = self.scope_owner(relation.scope) else {
            return Vec::new();
        };
        hashes.iter().filter_map(|&h| owner.child_by_hash(h)).collect()
    }

    /// Like [`resolve`](Self::resolve) but reports why resolution failed.
    pub fn try_resolve(&self, relation: Relation) -> Result<NodeRef<'a>> {
        let hash = *self.node().value::<u64>(relation.property)?;
        self.lookup(hash, relation.scope)
            .ok_or(Error::NodeNotFound(hash))
    }
}
