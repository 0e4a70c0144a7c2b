//! Node tree: recursive decode/encode and structural queries.

use std::fmt;
use std::io::{Read, Write};

use indexmap::IndexMap;

use super::hash::HashAllocator;
use super::property::{Property, PropertyKind, PropertyValue};
use crate::codec::{fourcc, kinds, read_node_header, write_node_header, NodeHeader, NODE_HEADER_SIZE};
use crate::util::{Error, Result};

/// Deepest nesting accepted on decode.
pub const MAX_NODE_DEPTH: usize = 512;

/// Node kind, identified on disk by a four-character code.
///
/// Unknown codes are kept verbatim so foreign nodes survive a round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Model,
    Mesh,
    BlendShape,
    Skeleton,
    Bone,
    IkHandle,
    Constraint,
    Animation,
    Curve,
    NotificationTrack,
    Material,
    File,
    Instance,
    Unknown(u32),
}

impl NodeKind {
    /// The on-disk code.
    pub const fn code(self) -> u32 {
        match self {
            Self::Root => kinds::ROOT,
            Self::Model => kinds::MODEL,
            Self::Mesh => kinds::MESH,
            Self::BlendShape => kinds::BLEND_SHAPE,
            Self::Skeleton => kinds::SKELETON,
            Self::Bone => kinds::BONE,
            Self::IkHandle => kinds::IK_HANDLE,
            Self::Constraint => kinds::CONSTRAINT,
            Self::Animation => kinds::ANIMATION,
            Self::Curve => kinds::CURVE,
            Self::NotificationTrack => kinds::NOTIFICATION_TRACK,
            Self::Material => kinds::MATERIAL,
            Self::File => kinds::FILE,
            Self::Instance => kinds::INSTANCE,
            Self::Unknown(code) => code,
        }
    }

    /// Map an on-disk code to a kind.
    pub const fn from_code(code: u32) -> Self {
        match code {
            kinds::ROOT => Self::Root,
            kinds::MODEL => Self::Model,
            kinds::MESH => Self::Mesh,
            kinds::BLEND_SHAPE => Self::BlendShape,
            kinds::SKELETON => Self::Skeleton,
            kinds::BONE => Self::Bone,
            kinds::IK_HANDLE => Self::IkHandle,
            kinds::CONSTRAINT => Self::Constraint,
            kinds::ANIMATION => Self::Animation,
            kinds::CURVE => Self::Curve,
            kinds::NOTIFICATION_TRACK => Self::NotificationTrack,
            kinds::MATERIAL => Self::Material,
            kinds::FILE => Self::File,
            kinds::INSTANCE => Self::Instance,
            other => Self::Unknown(other),
        }
    }

    /// Name for display.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Model => "Model",
            Self::Mesh => "Mesh",
            Self::BlendShape => "BlendShape",
            Self::Skeleton => "Skeleton",
            Self::Bone => "Bone",
            Self::IkHandle => "IKHandle",
            Self::Constraint => "Constraint",
            Self::Animation => "Animation",
            Self::Curve => "Curve",
            Self::NotificationTrack => "NotificationTrack",
            Self::Material => "Material",
            Self::File => "File",
            Self::Instance => "Instance",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "Unknown({})", fourcc(*code)),
            other => f.write_str(other.name()),
        }
    }
}

/// A tree element: kind, identity hash, ordered properties and owned children.
///
/// Children are owned exclusively. Navigation back to a parent goes through
/// [`NodeRef`](super::NodeRef), which records the path it descended.
///
/// Equality compares content only; the size a node was decoded with is ignored.
#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    hash: u64,
    properties: IndexMap<Vec<u8>, Property>,
    children: Vec<Node>,
    stored_size: Option<u32>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.hash == other.hash
            && self.properties == other.properties
            && self.children == other.children
    }
}

impl Node {
    /// Create an empty node with a freshly allocated hash.
    pub fn new(kind: NodeKind, hashes: &mut HashAllocator) -> Self {
        Self::with_hash(kind, hashes.next_hash())
    }

    /// Create an empty node with an explicit hash.
    pub fn with_hash(kind: NodeKind, hash: u64) -> Self {
        Self {
            kind,
            hash,
            properties: IndexMap::new(),
            children: Vec::new(),
            stored_size: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// The self-size field this node was decoded with, if it was decoded.
    #[inline]
    pub fn stored_size(&self) -> Option<u32> {
        self.stored_size
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Properties in insertion order.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &Property> + '_ {
        self.properties.values()
    }

    #[inline]
    pub fn num_properties(&self) -> usize {
        self.properties.len()
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name.as_bytes())
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.get_mut(name.as_bytes())
    }

    /// Like [`property`](Self::property) but absence is an error.
    pub fn try_property(&self, name: &str) -> Result<&Property> {
        self.property(name)
            .ok_or_else(|| Error::PropertyNotFound(name.to_string()))
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name.as_bytes())
    }

    /// Insert a property. An existing one with the same name is replaced in
    /// place (its position is kept) and returned.
    pub fn insert_property(&mut self, property: Property) -> Option<Property> {
        self.properties.insert(property.name_bytes().to_vec(), property)
    }

    /// Create an empty property of `kind`, replacing any with the same name.
    pub fn create_property(&mut self, kind: PropertyKind, name: &str) -> &mut Property {
        let (index, _) = self
            .properties
            .insert_full(name.as_bytes().to_vec(), Property::new(kind, name, 0));
        &mut self.properties[index]
    }

    /// Set a property to `values`, replacing any with the same name.
    pub fn set_values<T: PropertyValue>(&mut self, name: &str, values: Vec<T>) -> &mut Property {
        let (index, _) = self
            .properties
            .insert_full(name.as_bytes().to_vec(), Property::from_values(name, values));
        &mut self.properties[index]
    }

    /// Set a string property, replacing any with the same name.
    pub fn set_string(&mut self, name: &str, value: impl Into<Vec<u8>>) -> &mut Property {
        let (index, _) = self
            .properties
            .insert_full(name.as_bytes().to_vec(), Property::from_string(name, value));
        &mut self.properties[index]
    }

    /// Remove a property, keeping the order of the rest.
    pub fn remove_property(&mut self, name: &str) -> Option<Property> {
        self.properties.shift_remove(name.as_bytes())
    }

    /// Values of a property as `T`.
    pub fn values<T: PropertyValue>(&self, name: &str) -> Result<&[T]> {
        self.try_property(name)?.get::<T>()
    }

    /// First value of a property as `T`.
    pub fn value<T: PropertyValue>(&self, name: &str) -> Result<&T> {
        self.try_property(name)?.first::<T>()
    }

    /// A string property's value.
    pub fn string(&self, name: &str) -> Result<&str> {
        self.try_property(name)?.as_str()
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[inline]
    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    #[inline]
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Append `child` and return it.
    pub fn attach_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Create and attach an empty child with a freshly allocated hash.
    pub fn create_child(&mut self, kind: NodeKind, hashes: &mut HashAllocator) -> &mut Node {
        self.attach_child(Node::new(kind, hashes))
    }

    /// Direct children of `kind`, in storage order.
    pub fn children_of_kind(&self, kind: NodeKind) -> Vec<&Node> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }

    /// First direct child (in storage order) with `hash`.
    pub fn child_by_hash(&self, hash: u64) -> Option<&Node> {
        self.children.iter().find(|c| c.hash == hash)
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }

    /// Visit every node of the subtree depth-first, parents before children.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node, usize)) {
        self.visit_at(0, f);
    }

    fn visit_at<'a>(&'a self, depth: usize, f: &mut impl FnMut(&'a Node, usize)) {
        f(self, depth);
        for child in &self.children {
            child.visit_at(depth + 1, f);
        }
    }

    // ------------------------------------------------------------------
    // Binary
    // ------------------------------------------------------------------

    /// Encoded size of this subtree: header, properties and children.
    pub fn size(&self) -> usize {
        NODE_HEADER_SIZE
            + self.properties.values().map(Property::encoded_length).sum::<usize>()
            + self.children.iter().map(Node::size).sum::<usize>()
    }

    /// Decode a node and its whole subtree.
    pub fn decode<R: Read>(r: &mut R) -> Result<Self> {
        Self::decode_at(r, 0)
    }

    fn decode_at<R: Read>(r: &mut R, depth: usize) -> Result<Self> {
        if depth > MAX_NODE_DEPTH {
            return Err(Error::invalid(format!("node nesting deeper than {}", MAX_NODE_DEPTH)));
        }

        let header = read_node_header(r)?;
        let kind = NodeKind::from_code(header.kind);
        tracing::trace!(
            kind = %kind,
            hash = header.hash,
            properties = header.property_count,
            children = header.child_count,
            "decoding node"
        );

        let mut properties = IndexMap::new();
        for _ in 0..header.property_count {
            let property = Property::decode(r)?;
            // later duplicates overwrite earlier ones
            properties.insert(property.name_bytes().to_vec(), property);
        }
        if properties.len() != header.property_count as usize {
            tracing::debug!(
                hash = header.hash,
                declared = header.property_count,
                kept = properties.len(),
                "duplicate property names collapsed"
            );
        }

        let mut children = Vec::with_capacity((header.child_count as usize).min(1024));
        for _ in 0..header.child_count {
            children.push(Self::decode_at(r, depth + 1)?);
        }

        Ok(Self {
            kind,
            hash: header.hash,
            properties,
            children,
            stored_size: Some(header.self_size),
        })
    }

    /// Encode this node and its subtree, properties in insertion order.
    pub fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        let size = self.size();
        let header = NodeHeader {
            kind: self.kind.code(),
            self_size: u32::try_from(size)
                .map_err(|_| Error::invalid(format!("node {:#018x} is {} bytes", self.hash, size)))?,
            hash: self.hash,
            property_count: u32::try_from(self.properties.len())
                .map_err(|_| Error::invalid("too many properties"))?,
            child_count: u32::try_from(self.children.len())
                .map_err(|_| Error::invalid("too many children"))?,
        };
        write_node_header(w, &header)?;

        for property in self.properties.values() {
            property.encode(w)?;
        }
        for child in &self.children {
            child.encode(w)?;
        }
        Ok(())
    }

    /// Nodes in this subtree whose stored size differs from the recomputed one.
    pub fn size_mismatches(&self) -> Vec<(u64, u32, usize)> {
        let mut out = Vec::new();
        self.visit(&mut |node, _| {
            if let Some(stored) = node.stored_size {
                let actual = node.size();
                if stored as usize != actual {
                    out.push((node.hash, stored, actual));
                }
            }
        });
        out
    }
}
