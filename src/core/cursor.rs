//! Borrowed node cursor carrying the parent back-reference.

use std::ops::Deref;

use smallvec::SmallVec;

use super::node::{Node, NodeKind};

/// A node reached by descending from a root.
///
/// The cursor remembers the ancestors it passed through, which gives every
/// node below a root a non-owning link to its parent. A cursor created with
/// [`NodeRef::root`] has no parent.
#[derive(Clone, Debug)]
pub struct NodeRef<'a> {
    node: &'a Node,
    ancestors: SmallVec<[&'a Node; 8]>,
}

impl<'a> NodeRef<'a> {
    /// Cursor at a node with no parent.
    pub fn root(node: &'a Node) -> Self {
        Self {
            node,
            ancestors: SmallVec::new(),
        }
    }

    /// The underlying node, with the full borrow lifetime.
    #[inline]
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Cursor at the parent node.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let (&parent, rest) = self.ancestors.split_last()?;
        Some(NodeRef {
            node: parent,
            ancestors: rest.iter().copied().collect(),
        })
    }

    /// The parent node itself.
    #[inline]
    pub fn parent_node(&self) -> Option<&'a Node> {
        self.ancestors.last().copied()
    }

    /// Number of ancestors above this node.
    #[inline]
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    fn descend(&self, child: &'a Node) -> NodeRef<'a> {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(self.node);
        NodeRef { node: child, ancestors }
    }

    /// Cursor at the child with `index`.
    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        self.node.child(index).map(|c| self.descend(c))
    }

    /// Cursors at every direct child, in storage order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + '_ {
        self.node.children().iter().map(move |c| self.descend(c))
    }

    /// Cursors at direct children of `kind`.
    pub fn children_of_kind(&self, kind: NodeKind) -> Vec<NodeRef<'a>> {
        self.node
            .children()
            .iter()
            .filter(|c| c.kind() == kind)
            .map(|c| self.descend(c))
            .collect()
    }

    /// Cursor at the first direct child with `hash`.
    pub fn child_by_hash(&self, hash: u64) -> Option<NodeRef<'a>> {
        self.node.child_by_hash(hash).map(|c| self.descend(c))
    }
}

impl Deref for NodeRef<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        let mut root = Node::with_hash(NodeKind::Root, 1);
        let model = root.attach_child(Node::with_hash(NodeKind::Model, 2));
        let skeleton = model.attach_child(Node::with_hash(NodeKind::Skeleton, 3));
        skeleton.attach_child(Node::with_hash(NodeKind::Bone, 4));
        skeleton.attach_child(Node::with_hash(NodeKind::Bone, 5));
        root
    }

    #[test]
    fn test_parent_links() {
        let root = tree();
        let cursor = NodeRef::root(&root);
        assert!(cursor.parent().is_none());
        assert_eq!(cursor.depth(), 0);

        let bone = cursor.child(0).unwrap().child(0).unwrap().child(1).unwrap();
        assert_eq!(bone.hash(), 5);
        assert_eq!(bone.depth(), 3);

        let skeleton = bone.parent().unwrap();
        assert_eq!(skeleton.kind(), NodeKind::Skeleton);
        assert_eq!(bone.parent_node().unwrap().hash(), 3);
        assert_eq!(skeleton.parent().unwrap().hash(), 2);
        assert_eq!(skeleton.parent().unwrap().parent().unwrap().hash(), 1);
    }

    #[test]
    fn test_child_queries() {
        let root = tree();
        let skeleton = NodeRef::root(&root).child(0).unwrap().child(0).unwrap();
        assert_eq!(skeleton.children().count(), 2);
        assert_eq!(skeleton.children_of_kind(NodeKind::Bone).len(), 2);

        let bone = skeleton.child_by_hash(4).unwrap();
        assert_eq!(bone.parent().unwrap().hash(), 3);
        assert!(skeleton.child_by_hash(1).is_none());
    }
}
