//! Arena-backed scene graph
//!
//! Nodes live in a single [`SlotMap`] owned by the graph. Parent/child edges
//! are expressed as [`NodeId`] handles: a parent's `children` list is the
//! owning edge, a child's `parent` field is a plain back-link. Because no node
//! holds a counted reference to another, a bad attach can never leak a cycle
//! of owners, and every attach is checked for cycles anyway.
//!
//! ## World transform policy
//!
//! Lazy with dirty flags. Changing a node's local transform or its parent
//! marks the node's whole subtree `TRANSFORM_DIRTY`.
//! [`SceneGraph::update_world_transforms`] recomputes dirty nodes top-down
//! once per frame. [`SceneGraph::world_transform`] ignores the cache and
//! always walks the ancestor chain, so it is correct at any time.

use super::error::SceneError;
use super::node::{NodeFlags, NodeId, SceneNode};
use super::renderable::SharedRenderable;
use crate::foundation::math::{Mat4, Transform, Vec3};
use slotmap::SlotMap;

/// A node selected for drawing, with its world matrix
#[derive(Debug, Clone)]
pub struct VisibleNode {
    /// The node being drawn
    pub id: NodeId,
    /// World matrix as of this frame
    pub world: Mat4,
    /// What to draw
    pub renderable: SharedRenderable,
}

/// Tree of scene nodes with exclusive parent-to-child ownership
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
    /// Parentless nodes in the order they became roots
    roots: Vec<NodeId>,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached node with an identity transform and zero velocity
    pub fn create_node(&mut self) -> NodeId {
        self.create_node_with(Transform::identity())
    }

    /// Create a detached node with the given local transform
    pub fn create_node_with(&mut self, local: Transform) -> NodeId {
        let id = self.nodes.insert(SceneNode::detached(local));
        self.roots.push(id);
        log::trace!("Created scene node {id:?}");
        id
    }

    /// Create a node and attach it as the last child of `parent`
    pub fn create_child(&mut self, parent: NodeId, local: Transform) -> Result<NodeId, SceneError> {
        self.ensure_exists(parent)?;
        let child = self.create_node_with(local);
        self.attach(parent, child)?;
        Ok(child)
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Read-only access to a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Parentless nodes in the order they became roots
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Parent of `id`, `None` for roots and stale handles
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Ordered children of `id`; empty for stale handles
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Whether `ancestor` appears on the parent chain of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent_of(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    /// Make `child` the last child of `parent`
    ///
    /// A child that already has a parent is detached from it first, so it is
    /// never listed under two parents. Fails with
    /// [`SceneError::CycleViolation`] when `child` is `parent` or one of its
    /// ancestors; the tree is left untouched in that case.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.ensure_exists(parent)?;
        self.ensure_exists(child)?;

        if parent == child || self.is_ancestor(child, parent) {
            log::warn!("Rejected attach of {child:?} under {parent:?}: would create a cycle");
            return Err(SceneError::CycleViolation { parent, child });
        }

        match self.parent_of(child) {
            Some(previous) => {
                log::debug!("Re-parenting {child:?} from {previous:?} to {parent:?}");
                self.unlink(previous, child);
            }
            None => self.roots.retain(|&root| root != child),
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        self.mark_subtree_dirty(child);
        Ok(())
    }

    /// Remove `child` from `parent`'s children and turn it into a root
    ///
    /// Returns `false` without touching anything when `child` is not a child
    /// of `parent`. The detached node stays alive until [`Self::release`].
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.unlink(parent, child) {
            return false;
        }
        self.roots.push(child);
        self.mark_subtree_dirty(child);
        true
    }

    /// Destroy `id` and its whole subtree, returning how many nodes were removed
    pub fn release(&mut self, id: NodeId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        match self.parent_of(id) {
            Some(parent) => {
                self.unlink(parent, id);
            }
            None => self.roots.retain(|&root| root != id),
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        log::debug!("Released {removed} scene node(s) rooted at {id:?}");
        removed
    }

    /// Remove every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
    }

    /// Attach `renderable` to `id`, returning the reference it replaced
    pub fn set_renderable(
        &mut self,
        id: NodeId,
        renderable: SharedRenderable,
    ) -> Result<Option<SharedRenderable>, SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        Ok(node.renderable.replace(renderable))
    }

    /// Detach the renderable from `id`, returning it
    pub fn clear_renderable(&mut self, id: NodeId) -> Result<Option<SharedRenderable>, SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        Ok(node.renderable.take())
    }

    /// Renderable attached to `id`
    pub fn renderable(&self, id: NodeId) -> Option<&SharedRenderable> {
        self.nodes.get(id).and_then(|node| node.renderable.as_ref())
    }

    /// Replace the local transform of `id`
    pub fn set_local_transform(&mut self, id: NodeId, local: Transform) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        node.local = local;
        self.mark_subtree_dirty(id);
        Ok(())
    }

    /// Set the velocity of `id`, in parent space units per second
    pub fn set_velocity(&mut self, id: NodeId, velocity: Vec3) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        node.velocity = velocity;
        Ok(())
    }

    /// Show or hide `id` and, implicitly, its subtree
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        node.flags.set(NodeFlags::VISIBLE, visible);
        Ok(())
    }

    /// Move every node with a non-zero velocity by `velocity * dt`
    pub fn advance(&mut self, dt: f32) {
        let moving: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.velocity != Vec3::zeros())
            .map(|(id, _)| id)
            .collect();

        for id in moving {
            if let Some(node) = self.nodes.get_mut(id) {
                node.local.position += node.velocity * dt;
            }
            self.mark_subtree_dirty(id);
        }
    }

    /// World transform of `id` computed from its ancestors right now
    pub fn world_transform(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(id)?;
        let mut world = node.local.to_matrix();
        let mut current = node.parent;
        while let Some(parent_id) = current {
            let parent = self.nodes.get(parent_id)?;
            world = parent.local.to_matrix() * world;
            current = parent.parent;
        }
        Some(world)
    }

    /// Cached world transform of `id`, `None` while it is dirty
    pub fn cached_world_transform(&self, id: NodeId) -> Option<Mat4> {
        self.nodes
            .get(id)
            .filter(|node| !node.flags.contains(NodeFlags::TRANSFORM_DIRTY))
            .map(|node| node.world)
    }

    /// Recompute the cached world matrix of every dirty node
    ///
    /// Returns the number of nodes recomputed.
    pub fn update_world_transforms(&mut self) -> usize {
        let mut updated = 0;
        let mut stack: Vec<(NodeId, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&root| (root, Mat4::identity()))
            .collect();

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            if node.flags.contains(NodeFlags::TRANSFORM_DIRTY) {
                node.world = parent_world * node.local.to_matrix();
                node.flags.remove(NodeFlags::TRANSFORM_DIRTY);
                updated += 1;
            }
            let world = node.world;
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }
        updated
    }

    /// Pre-order walk of the subtree rooted at `root`
    pub fn depth_first(&self, root: NodeId) -> DepthFirst<'_> {
        let stack = if self.contains(root) { vec![root] } else { Vec::new() };
        DepthFirst { graph: self, stack }
    }

    /// Pre-order walk of every tree, roots in order
    pub fn iter_depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            graph: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Visible nodes carrying a renderable, in pre-order
    ///
    /// Refreshes world transforms first. A hidden node prunes its subtree.
    pub fn visible_renderables(&mut self) -> Vec<VisibleNode> {
        self.update_world_transforms();

        let mut visible = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if !node.is_visible() {
                continue;
            }
            if let Some(renderable) = &node.renderable {
                visible.push(VisibleNode {
                    id,
                    world: node.world,
                    renderable: renderable.clone(),
                });
            }
            stack.extend(node.children.iter().rev());
        }
        visible
    }

    fn ensure_exists(&self, id: NodeId) -> Result<(), SceneError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(SceneError::NodeNotFound(id))
        }
    }

    /// Drop the parent->child edge; the child does not become a root here
    fn unlink(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(position) = parent_node.children.iter().position(|&c| c == child) else {
            return false;
        };
        parent_node.children.remove(position);
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = None;
        }
        true
    }

    fn mark_subtree_dirty(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current) {
                node.flags.insert(NodeFlags::TRANSFORM_DIRTY);
                stack.extend_from_slice(&node.children);
            }
        }
    }
}

/// Pre-order iterator over scene nodes
pub struct DepthFirst<'a> {
    graph: &'a SceneGraph,
    stack: Vec<NodeId>,
}

impl Iterator for DepthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.graph.children_of(id).iter().rev());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::renderable::{MaterialId, MeshId, Renderable};
    use approx::assert_relative_eq;

    fn rock() -> SharedRenderable {
        Renderable::new("rock", MeshId(1), MaterialId(1)).shared()
    }

    #[test]
    fn new_node_is_detached_identity_and_still() {
        let mut graph = SceneGraph::new();
        let id = graph.create_node();
        let node = graph.node(id).unwrap();

        assert!(node.parent().is_none());
        assert!(node.children().is_empty());
        assert!(node.local_transform().is_identity());
        assert_eq!(node.velocity(), Vec3::zeros());
        assert!(node.renderable().is_none());
        assert_eq!(graph.roots(), &[id]);
    }

    #[test]
    fn attach_to_self_is_a_cycle() {
        let mut graph = SceneGraph::new();
        let a = graph.create_node();
        assert_eq!(
            graph.attach(a, a),
            Err(SceneError::CycleViolation { parent: a, child: a })
        );
        assert!(graph.parent_of(a).is_none());
    }

    #[test]
    fn attach_rejects_stale_handles() {
        let mut graph = SceneGraph::new();
        let a = graph.create_node();
        let b = graph.create_node();
        graph.release(b);

        assert_eq!(graph.attach(a, b), Err(SceneError::NodeNotFound(b)));
        assert_eq!(graph.attach(b, a), Err(SceneError::NodeNotFound(b)));
        assert!(graph.set_renderable(b, rock()).is_err());
        assert!(graph.children_of(b).is_empty());
    }

    #[test]
    fn reattaching_to_same_parent_moves_child_to_end() {
        let mut graph = SceneGraph::new();
        let root = graph.create_node();
        let a = graph.create_child(root, Transform::identity()).unwrap();
        let b = graph.create_child(root, Transform::identity()).unwrap();

        graph.attach(root, a).unwrap();
        assert_eq!(graph.children_of(root), &[b, a]);
    }

    #[test]
    fn release_removes_subtree_only() {
        let mut graph = SceneGraph::new();
        let root = graph.create_node();
        let ship = graph.create_child(root, Transform::identity()).unwrap();
        let turret = graph.create_child(ship, Transform::identity()).unwrap();
        let other = graph.create_child(root, Transform::identity()).unwrap();

        assert_eq!(graph.release(ship), 2);
        assert!(!graph.contains(ship));
        assert!(!graph.contains(turret));
        assert_eq!(graph.children_of(root), &[other]);
        assert_eq!(graph.release(ship), 0);
        assert!(!graph.detach(root, ship));
    }

    #[test]
    fn renderable_is_shared_between_nodes() {
        let mut graph = SceneGraph::new();
        let a = graph.create_node();
        let b = graph.create_node();
        let shared = rock();

        graph.set_renderable(a, shared.clone()).unwrap();
        graph.set_renderable(b, shared.clone()).unwrap();
        assert_eq!(std::sync::Arc::strong_count(&shared), 3);

        graph.release(a);
        assert_eq!(std::sync::Arc::strong_count(&shared), 2);
        assert_eq!(graph.clear_renderable(b).unwrap().as_ref(), Some(&shared));
        assert!(graph.renderable(b).is_none());
    }

    #[test]
    fn advance_integrates_velocity() {
        let mut graph = SceneGraph::new();
        let id = graph.create_node();
        graph.set_velocity(id, Vec3::new(2.0, 0.0, -1.0)).unwrap();
        graph.update_world_transforms();

        graph.advance(0.5);

        let node = graph.node(id).unwrap();
        assert_relative_eq!(node.local_transform().position, Vec3::new(1.0, 0.0, -0.5));
        assert!(graph.cached_world_transform(id).is_none());
    }

    #[test]
    fn update_only_recomputes_dirty_nodes() {
        let mut graph = SceneGraph::new();
        let root = graph.create_node();
        let child = graph.create_child(root, Transform::identity()).unwrap();
        let _other = graph.create_node();

        assert_eq!(graph.update_world_transforms(), 3);
        assert_eq!(graph.update_world_transforms(), 0);

        graph
            .set_local_transform(child, Transform::from_position(Vec3::new(0.0, 1.0, 0.0)))
            .unwrap();
        assert_eq!(graph.update_world_transforms(), 1);
    }

    #[test]
    fn depth_first_is_pre_order() {
        let mut graph = SceneGraph::new();
        let r = graph.create_node();
        let a = graph.create_child(r, Transform::identity()).unwrap();
        let a1 = graph.create_child(a, Transform::identity()).unwrap();
        let b = graph.create_child(r, Transform::identity()).unwrap();
        let lone = graph.create_node();

        let order: Vec<_> = graph.iter_depth_first().collect();
        assert_eq!(order, vec![r, a, a1, b, lone]);

        let sub: Vec<_> = graph.depth_first(a).collect();
        assert_eq!(sub, vec![a, a1]);
    }

    #[test]
    fn clear_drops_every_node_and_invalidates_handles() {
        let mut graph = SceneGraph::new();
        let root = graph.create_node();
        let child = graph.create_child(root, Transform::identity()).unwrap();
        graph.set_renderable(child, rock()).unwrap();

        graph.clear();

        assert!(graph.is_empty());
        assert!(graph.roots().is_empty());
        assert!(!graph.contains(child));
        assert_eq!(graph.set_velocity(root, Vec3::x()), Err(SceneError::NodeNotFound(root)));
        assert!(graph.visible_renderables().is_empty());
    }
}
