//! Scene graph errors

use super::NodeId;
use thiserror::Error;

/// Errors returned by scene graph mutations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The handle refers to a node that was never created or has been released
    #[error("scene node {0:?} does not exist")]
    NodeNotFound(NodeId),

    /// Attaching would make a node its own ancestor
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CycleViolation {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },
}
