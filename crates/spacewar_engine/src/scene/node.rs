//! Scene node data

use super::renderable::SharedRenderable;
use crate::foundation::math::{Mat4, Transform, Vec3};
use bitflags::bitflags;

slotmap::new_key_type! {
    /// Generational handle to a node stored in a [`super::SceneGraph`]
    pub struct NodeId;
}

bitflags! {
    /// Per-node state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node and its subtree are drawn
        const VISIBLE = 1 << 0;
        /// Cached world transform is stale
        const TRANSFORM_DIRTY = 1 << 1;
    }
}

/// A single element of the scene tree
///
/// Fields are only reachable through accessors; the owning
/// [`super::SceneGraph`] is the sole writer of the parent/child links.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub(super) local: Transform,
    pub(super) velocity: Vec3,
    pub(super) children: Vec<NodeId>,
    pub(super) parent: Option<NodeId>,
    pub(super) renderable: Option<SharedRenderable>,
    pub(super) world: Mat4,
    pub(super) flags: NodeFlags,
}

impl SceneNode {
    /// A detached node: identity transform, zero velocity, no children, visible
    pub(super) fn detached(local: Transform) -> Self {
        Self {
            local,
            velocity: Vec3::zeros(),
            children: Vec::new(),
            parent: None,
            renderable: None,
            world: Mat4::identity(),
            flags: NodeFlags::VISIBLE | NodeFlags::TRANSFORM_DIRTY,
        }
    }

    /// Transform relative to the parent
    pub fn local_transform(&self) -> &Transform {
        &self.local
    }

    /// Velocity in parent space, units per second
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Owned children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Non-owning back-link to the parent, `None` for roots
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Attached renderable, if any
    pub fn renderable(&self) -> Option<&SharedRenderable> {
        self.renderable.as_ref()
    }

    /// Whether the node (not counting ancestors) is marked visible
    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    /// Current state bits
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }
}
