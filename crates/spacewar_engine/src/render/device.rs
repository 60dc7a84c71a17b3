//! Render device abstraction
//!
//! A device owns the GPU (or a stand-in) and exposes the minimum the frame
//! loop needs: clear, draw, present and resize.

use crate::foundation::math::Mat4;
use crate::scene::{Renderable, VisibleNode};
use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Result type for device operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Draw or present without a matching begin
    #[error("no frame in progress")]
    FrameNotStarted,

    /// Begin called twice without present
    #[error("a frame is already in progress")]
    FrameInProgress,
}

/// RGBA clear colour
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearColor(pub [f32; 4]);

/// Per-draw record in the layout uploaded to the GPU instance buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// Column-major world matrix
    pub model: [[f32; 4]; 4],
    /// RGBA tint
    pub tint: [f32; 4],
    /// Mesh identifier
    pub mesh: u32,
    /// Material identifier
    pub material: u32,
    _padding: [u32; 2],
}

impl DrawInstance {
    /// Build the record for a renderable drawn with `world`
    pub fn new(world: &Mat4, renderable: &Renderable) -> Self {
        Self {
            model: (*world).into(),
            tint: renderable.tint,
            mesh: renderable.mesh.0,
            material: renderable.material.0,
            _padding: [0; 2],
        }
    }

    /// Record for a node selected by the scene walk
    pub fn from_visible(node: &VisibleNode) -> Self {
        Self::new(&node.world, &node.renderable)
    }

    /// World matrix as a nalgebra matrix
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from(self.model)
    }
}

/// GPU device the frame renderer submits to
pub trait RenderDevice {
    /// Start a frame by clearing the back buffer
    fn begin_frame(&mut self, clear: ClearColor) -> RenderResult<()>;

    /// Record one draw
    fn draw(&mut self, instance: &DrawInstance, renderable: &Renderable) -> RenderResult<()>;

    /// Finish the frame and present it
    fn present(&mut self) -> RenderResult<()>;

    /// Resize the swap chain
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;
}
