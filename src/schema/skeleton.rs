//! Skeleton, bone, IK handle and constraint views.

use super::{first, flag, names, relations};
use crate::core::{NodeRef, Relation};
use crate::util::{Vec3, Vec4};

node_view! {
    /// Container of bones, IK handles and constraints.
    Skeleton => Skeleton
}

node_view! {
    /// A joint. Its parent is referenced by index among the skeleton's bones.
    Bone => Bone
}

node_view! {
    /// IK chain description; its bones are siblings under the skeleton.
    IkHandle => IkHandle
}

node_view! {
    /// Bone constraint; its bones are siblings under the skeleton.
    Constraint => Constraint
}

impl<'a> Skeleton<'a> {
    pub fn bones(&self) -> Vec<Bone<'a>> {
        self.0.children().filter_map(Bone::new).collect()
    }

    pub fn ik_handles(&self) -> Vec<IkHandle<'a>> {
        self.0.children().filter_map(IkHandle::new).collect()
    }

    pub fn constraints(&self) -> Vec<Constraint<'a>> {
        self.0.children().filter_map(Constraint::new).collect()
    }
}

impl<'a> Bone<'a> {
    /// Sentinel returned by [`parent_index`](Self::parent_index) for root bones.
    pub const NO_PARENT: i32 = -1;

    /// Index of the parent among the skeleton's bones, or [`Self::NO_PARENT`]
    /// when the bone has none stored.
    pub fn parent_index(&self) -> i32 {
        first::<u32>(&self.0, names::PARENT_INDEX)
            .map(|i| i as i32)
            .unwrap_or(Self::NO_PARENT)
    }

    /// The parent bone, looked up by index under the enclosing skeleton.
    pub fn parent_bone(&self) -> Option<Bone<'a>> {
        let index = usize::try_from(self.parent_index()).ok()?;
        self.0.parent()?.children().filter_map(Bone::new).nth(index)
    }

    pub fn segment_scale_compensate(&self) -> Option<bool> {
        flag(&self.0, names::SEGMENT_SCALE_COMPENSATE)
    }

    pub fn local_position(&self) -> Option<Vec3> {
        first(&self.0, names::LOCAL_POSITION)
    }

    pub fn local_rotation(&self) -> Option<Vec4> {
        first(&self.0, names::LOCAL_ROTATION)
    }

    pub fn world_position(&self) -> Option<Vec3> {
        first(&self.0, names::WORLD_POSITION)
    }

    pub fn world_rotation(&self) -> Option<Vec4> {
        first(&self.0, names::WORLD_ROTATION)
    }

    pub fn scale(&self) -> Option<Vec3> {
        first(&self.0, names::SCALE)
    }
}

fn sibling_bone<'a>(node: &NodeRef<'a>, relation: Relation) -> Option<Bone<'a>> {
    node.resolve(relation).and_then(Bone::new)
}

impl<'a> IkHandle<'a> {
    pub fn start_bone(&self) -> Option<Bone<'a>> {
        sibling_bone(&self.0, relations::IK_START_BONE)
    }

    pub fn end_bone(&self) -> Option<Bone<'a>> {
        sibling_bone(&self.0, relations::IK_END_BONE)
    }

    pub fn target_bone(&self) -> Option<Bone<'a>> {
        sibling_bone(&self.0, relations::IK_TARGET_BONE)
    }

    pub fn pole_vector_bone(&self) -> Option<Bone<'a>> {
        sibling_bone(&self.0, relations::IK_POLE_VECTOR_BONE)
    }

    pub fn pole_bone(&self) -> Option<Bone<'a>> {
        sibling_bone(&self.0, relations::IK_POLE_BONE)
    }

    pub fn use_target_rotation(&self) -> bool {
        flag(&self.0, names::TARGET_ROTATION).unwrap_or(false)
    }
}

impl<'a> Constraint<'a> {
    /// Constraint type code ("pt", "or", "sc", ...).
    pub fn constraint_type(&self) -> Option<&'a str> {
        self.0.node().string(names::CONSTRAINT_TYPE).ok()
    }

    pub fn constraint_bone(&self) -> Option<Bone<'a>> {
        sibling_bone(&self.0, relations::CONSTRAINT_BONE)
    }

    pub fn target_bone(&self) -> Option<Bone<'a>> {
        sibling_bone(&self.0, relations::CONSTRAINT_TARGET_BONE)
    }

    pub fn maintain_offset(&self) -> bool {
        flag(&self.0, names::MAINTAIN_OFFSET).unwrap_or(false)
    }

    /// Per-axis skip flags (x, y, z).
    pub fn skip_axes(&self) -> [bool; 3] {
        [names::SKIP_X, names::SKIP_Y, names::SKIP_Z].map(|n| flag(&self.0, n).unwrap_or(false))
    }
}
