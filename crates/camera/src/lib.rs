//! First-person fly camera.
//!
//! Turns held movement keys, mouse deltas and scroll deltas into a view
//! transform and a field of view for the projection.
//!
//! # Invariants
//! - `front`, `right` and `up` are an orthonormal basis derived from yaw/pitch.
//! - Pitch stays within ±89° whenever pitch constraining is requested.
//! - Zoom stays within [1, 45] degrees.
//! - Camera motion is frame-time scaled and never touches the filesystem.

mod camera;
mod config;
mod projection;

pub use camera::{
    Camera, CameraError, CameraMovement, CameraState, DEFAULT_PITCH, DEFAULT_SENSITIVITY,
    DEFAULT_SPEED, DEFAULT_YAW, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, PITCH_LIMIT,
};
pub use config::{CameraConfig, ConfigError};
pub use projection::Projection;

pub fn crate_info() -> &'static str {
    "flycam-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }
}
