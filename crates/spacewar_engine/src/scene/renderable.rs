//! Renderable payload attached to scene nodes
//!
//! A renderable names the visual asset a node draws with. The same renderable
//! is usually shared by many nodes (every asteroid uses one rock mesh), so
//! nodes hold it through an [`Arc`] and it lives as long as its longest-lived
//! referrer.

use std::sync::Arc;

/// Identifier of a mesh known to the render device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeshId(pub u32);

/// Identifier of a material known to the render device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialId(pub u32);

/// Shared handle to a renderable
pub type SharedRenderable = Arc<Renderable>;

/// Opaque visual payload (mesh, material, tint) referenced by scene nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    /// Human readable name used in logs
    pub label: String,
    /// Mesh to draw
    pub mesh: MeshId,
    /// Material to draw with
    pub material: MaterialId,
    /// RGBA tint multiplied into the material colour
    pub tint: [f32; 4],
    /// Rendering layer for sorting (higher values render later)
    pub layer: u8,
}

impl Renderable {
    /// Create a renderable with a white tint on layer 0
    pub fn new(label: impl Into<String>, mesh: MeshId, material: MaterialId) -> Self {
        Self {
            label: label.into(),
            mesh,
            material,
            tint: [1.0; 4],
            layer: 0,
        }
    }

    /// Set the tint colour
    pub fn with_tint(mut self, tint: [f32; 4]) -> Self {
        self.tint = tint;
        self
    }

    /// Set the render layer
    pub fn with_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    /// Wrap into a shared handle
    pub fn shared(self) -> SharedRenderable {
        Arc::new(self)
    }
}
