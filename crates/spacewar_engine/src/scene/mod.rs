//! Scene management
//!
//! The scene is a forest of nodes, each with a local transform, a velocity,
//! owned children and an optional shared renderable.
//!
//! ## Ownership
//!
//! ```text
//! SceneGraph (arena, sole owner of every node)
//!      │
//!      ├── parent.children  : owning edge, insertion ordered
//!      ├── child.parent     : back-link, lookup only
//!      └── node.renderable  : Arc, shared between nodes
//! ```
//!
//! The scene is single-threaded. Loader threads that produce renderables go
//! through [`renderable_channel`] instead of touching the graph.

mod error;
mod node;
mod renderable;
mod scene_graph;
mod transfer;

#[cfg(test)]
mod tests;

pub use error::SceneError;
pub use node::{NodeFlags, NodeId, SceneNode};
pub use renderable::{MaterialId, MeshId, Renderable, SharedRenderable};
pub use scene_graph::{DepthFirst, SceneGraph, VisibleNode};
pub use transfer::{renderable_channel, InboxClosed, RenderableInbox, RenderableSender};
