//! Hand-off point for renderables produced off the frame thread
//!
//! Loader threads hold a [`RenderableSender`]. The frame thread owns the
//! matching [`RenderableInbox`] and applies queued assignments to the scene at
//! a point of its choosing, so the graph itself is never shared.

use super::node::NodeId;
use super::renderable::SharedRenderable;
use super::scene_graph::SceneGraph;
use std::sync::mpsc::{self, Receiver, Sender};
use thiserror::Error;

/// The inbox was dropped before the renderable could be queued
#[derive(Error, Debug)]
#[error("renderable inbox for node {node:?} has been dropped")]
pub struct InboxClosed {
    /// Node the renderable was meant for
    pub node: NodeId,
}

/// Create a connected sender/inbox pair
pub fn renderable_channel() -> (RenderableSender, RenderableInbox) {
    let (sender, receiver) = mpsc::channel();
    (RenderableSender { sender }, RenderableInbox { receiver })
}

/// Cloneable, `Send` handle used by loaders to deliver finished renderables
#[derive(Debug, Clone)]
pub struct RenderableSender {
    sender: Sender<(NodeId, SharedRenderable)>,
}

impl RenderableSender {
    /// Queue `renderable` for attachment to `node`
    pub fn send(&self, node: NodeId, renderable: SharedRenderable) -> Result<(), InboxClosed> {
        self.sender
            .send((node, renderable))
            .map_err(|_| InboxClosed { node })
    }
}

/// Receiving end, owned by the frame thread
#[derive(Debug)]
pub struct RenderableInbox {
    receiver: Receiver<(NodeId, SharedRenderable)>,
}

impl RenderableInbox {
    /// Attach every queued renderable, returning how many were applied
    ///
    /// Assignments for nodes released in the meantime are dropped.
    pub fn apply(&self, scene: &mut SceneGraph) -> usize {
        let mut applied = 0;
        for (node, renderable) in self.receiver.try_iter() {
            match scene.set_renderable(node, renderable) {
                Ok(_) => applied += 1,
                Err(err) => log::warn!("Dropping loaded renderable: {err}"),
            }
        }
        applied
    }
}
