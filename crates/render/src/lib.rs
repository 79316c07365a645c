//! Rendering adapter: renderer-agnostic frame view, demo scenes and a text renderer.
//!
//! # Invariants
//! - Renderers read a [`FrameView`], never the camera itself.
//! - A frame view is built only after the frame's input has been applied.
//! - Scene geometry is static; only the view changes between frames.

mod renderer;
mod scene;
mod view;

pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{
    CUBE_POSITIONS, GridSpec, Instance, Scene, SceneKind, SceneMesh, UnknownScene, Vertex,
};
pub use view::FrameView;

pub fn crate_info() -> &'static str {
    "flycam-render v0.1.0"
}
