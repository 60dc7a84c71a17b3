//! Per-frame submission of the scene to a render device

use super::device::{ClearColor, DrawInstance, RenderDevice, RenderResult};
use crate::scene::SceneGraph;

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Draw calls submitted
    pub draw_calls: usize,
    /// `true` when the frame was skipped because the surface has no area
    pub skipped: bool,
}

/// Walks the scene and submits one draw per visible renderable
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    clear: ClearColor,
    surface: (u32, u32),
}

impl FrameRenderer {
    /// Create a renderer for a surface of the given size
    pub fn new(clear: ClearColor, width: u32, height: u32) -> Self {
        Self {
            clear,
            surface: (width, height),
        }
    }

    /// Track a new surface size
    pub fn set_surface(&mut self, width: u32, height: u32) {
        self.surface = (width, height);
    }

    /// Current surface size
    pub fn surface(&self) -> (u32, u32) {
        self.surface
    }

    /// Clear, draw every visible renderable and present
    ///
    /// Draws follow scene pre-order, stably sorted by render layer.
    pub fn render(
        &mut self,
        scene: &mut SceneGraph,
        device: &mut dyn RenderDevice,
    ) -> RenderResult<FrameStats> {
        if self.surface.0 == 0 || self.surface.1 == 0 {
            return Ok(FrameStats {
                draw_calls: 0,
                skipped: true,
            });
        }

        let mut visible = scene.visible_renderables();
        visible.sort_by_key(|node| node.renderable.layer);

        device.begin_frame(self.clear)?;
        for node in &visible {
            device.draw(&DrawInstance::from_visible(node), &node.renderable)?;
        }
        device.present()?;

        Ok(FrameStats {
            draw_calls: visible.len(),
            skipped: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Transform, Vec3};
    use crate::render::HeadlessDevice;
    use crate::scene::{MaterialId, MeshId, Renderable};
    use approx::assert_relative_eq;

    #[test]
    fn draws_in_layer_then_scene_order_with_world_matrices() {
        let mut scene = SceneGraph::new();
        let hud = Renderable::new("hud", MeshId(9), MaterialId(9)).with_layer(2).shared();
        let ship = Renderable::new("ship", MeshId(1), MaterialId(1)).shared();
        let star = Renderable::new("star", MeshId(2), MaterialId(2)).shared();

        let root = scene.create_node_with(Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
        let overlay = scene.create_child(root, Transform::identity()).unwrap();
        let player = scene
            .create_child(root, Transform::from_position(Vec3::new(0.0, 2.0, 0.0)))
            .unwrap();
        let backdrop = scene.create_node();
        scene.set_renderable(overlay, hud).unwrap();
        scene.set_renderable(player, ship).unwrap();
        scene.set_renderable(backdrop, star).unwrap();

        let mut renderer = FrameRenderer::new(ClearColor([0.1, 0.1, 0.1, 1.0]), 640, 480);
        let mut device = HeadlessDevice::new(640, 480);
        let stats = renderer.render(&mut scene, &mut device).unwrap();

        assert_eq!(stats, FrameStats { draw_calls: 3, skipped: false });
        let frame = device.last_frame().unwrap();
        let labels: Vec<&str> = frame.draws.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["ship", "star", "hud"]);
        assert_eq!(frame.clear, ClearColor([0.1, 0.1, 0.1, 1.0]));
        assert_relative_eq!(
            frame.draws[0].instance.model_matrix(),
            scene.world_transform(player).unwrap(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn zero_sized_surface_skips_the_frame() {
        let mut scene = SceneGraph::new();
        let mut renderer = FrameRenderer::new(ClearColor::default(), 640, 480);
        let mut device = HeadlessDevice::new(640, 480);

        renderer.set_surface(0, 0);
        let stats = renderer.render(&mut scene, &mut device).unwrap();

        assert!(stats.skipped);
        assert_eq!(device.frames_presented(), 0);
    }
}
