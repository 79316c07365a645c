use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{
    Camera, CameraError, DEFAULT_PITCH, DEFAULT_SENSITIVITY, DEFAULT_SPEED, DEFAULT_YAW,
    DEFAULT_ZOOM, PITCH_LIMIT,
};

/// Errors from loading a camera configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Camera tuning loaded from YAML. Missing fields take the constructor defaults.
///
/// ```yaml
/// position: [0.0, 1.5, 6.0]
/// movement_speed: 4.0
/// mouse_sensitivity: 0.08
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub world_up: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees, clamped to ±89 when the camera is built.
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Initial field of view in degrees.
    pub zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl CameraConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded camera config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Camera {
    /// Build a camera from configuration, validating everything the unchecked
    /// constructors take on trust. Non-finite values are rejected; finite
    /// pitch and zoom out of range are clamped.
    pub fn from_config(config: &CameraConfig) -> Result<Self, CameraError> {
        check_tuning("movement_speed", config.movement_speed)?;
        check_tuning("mouse_sensitivity", config.mouse_sensitivity)?;
        if !config.zoom.is_finite() {
            return Err(CameraError::NonFinite { name: "zoom" });
        }

        let pitch = config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let mut camera =
            Self::try_with_orientation(config.position, config.world_up, config.yaw, pitch)?;
        camera.movement_speed = config.movement_speed;
        camera.mouse_sensitivity = config.mouse_sensitivity;
        camera.set_zoom(config.zoom);
        Ok(camera)
    }
}

fn check_tuning(name: &'static str, value: f32) -> Result<(), CameraError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidTuning { name, value })
    }
}
