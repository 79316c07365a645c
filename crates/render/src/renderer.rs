use std::fmt::Write;

use crate::scene::Scene;
use crate::view::FrameView;

/// Renderer-agnostic interface for anything that can draw a frame on the CPU side.
///
/// The renderer reads a scene and a frame view, then produces output. It
/// never sees the camera, so drawing cannot feed back into camera state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the given scene from the given view.
    fn render(&self, scene: &Scene, view: &FrameView) -> Self::Output;
}

/// Text renderer for headless runs.
///
/// Produces a human-readable description of the view and of which scene
/// instances fall inside the view volume. Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &FrameView) -> String {
        let mut out = String::new();
        let visible: usize = scene
            .meshes
            .iter()
            .flat_map(|m| &m.instances)
            .filter(|i| view.is_visible(i.model.w_axis.truncate()))
            .count();

        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame (scene={}, instances={}, visible={}) ===",
            scene.kind,
            scene.instance_count(),
            visible
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) front=({:.3}, {:.3}, {:.3}) fov={:.1}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.front.x,
            view.front.y,
            view.front.z,
            view.fov_degrees
        );

        for mesh in &scene.meshes {
            for (n, instance) in mesh.instances.iter().enumerate() {
                let p = instance.model.w_axis.truncate();
                let mark = if view.is_visible(p) { '*' } else { ' ' };
                let _ = writeln!(
                    out,
                    " {mark}[{}#{n}] pos=({:.2}, {:.2}, {:.2})",
                    mesh.name, p.x, p.y, p.z
                );
            }
        }

        out
    }
}
