//! Tree construction with hash allocation.

use super::hash::HashAllocator;
use super::node::{Node, NodeKind};
use super::property::{Property, PropertyKind, PropertyValue};

/// Mutable handle to a node plus the allocator new children draw hashes from.
///
/// Returned by [`CastFile::create_root`](super::CastFile::create_root); nests
/// through [`create_child`](Self::create_child).
pub struct NodeBuilder<'a> {
    node: &'a mut Node,
    hashes: &'a mut HashAllocator,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(node: &'a mut Node, hashes: &'a mut HashAllocator) -> Self {
        Self { node, hashes }
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.node.hash()
    }

    #[inline]
    pub fn node(&self) -> &Node {
        self.node
    }

    #[inline]
    pub fn node_mut(&mut self) -> &mut Node {
        self.node
    }

    /// Give up the builder, keeping the node borrow.
    pub fn into_node(self) -> &'a mut Node {
        self.node
    }

    /// Create a child with the next hash and return a builder for it.
    pub fn create_child(&mut self, kind: NodeKind) -> NodeBuilder<'_> {
        let child = self.node.create_child(kind, self.hashes);
        NodeBuilder {
            node: child,
            hashes: &mut *self.hashes,
        }
    }

    /// Create an empty property of `kind`, replacing any with the same name.
    pub fn create_property(&mut self, kind: PropertyKind, name: &str) -> &mut Property {
        self.node.create_property(kind, name)
    }

    /// Set a property to `values`.
    pub fn values<T: PropertyValue>(&mut self, name: &str, values: Vec<T>) -> &mut Self {
        self.node.set_values(name, values);
        self
    }

    /// Set a string property.
    pub fn string(&mut self, name: &str, value: impl Into<Vec<u8>>) -> &mut Self {
        self.node.set_string(name, value);
        self
    }
}
