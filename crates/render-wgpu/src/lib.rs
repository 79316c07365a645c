//! wgpu render backend for the fly-camera demo.
//!
//! Uploads a [`flycam_render::Scene`] once and draws it every frame with the
//! view-projection from a [`flycam_render::FrameView`].
//!
//! # Invariants
//! - The renderer never touches camera or input state.
//! - Geometry buffers are immutable after upload; only the uniform changes per frame.

mod gpu;
mod shaders;

pub use gpu::WgpuRenderer;
