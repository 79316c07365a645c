use glam::Mat4;

/// Perspective parameters that do not depend on the camera orientation.
///
/// The field of view comes from [`crate::Camera::zoom`] each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        let mut projection = Self::default();
        projection.resize(width, height);
        projection
    }

    /// Update the aspect ratio for a new framebuffer size. A zero height is ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Right-handed perspective matrix for a vertical field of view in degrees.
    pub fn matrix(&self, fov_degrees: f32) -> Mat4 {
        Mat4::perspective_rh(fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_updates_aspect() {
        let mut p = Projection::default();
        p.resize(1920, 1080);
        assert!((p.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_is_ignored() {
        let mut p = Projection::new(1280, 720);
        let before = p.aspect;
        p.resize(1280, 0);
        assert_eq!(p.aspect, before);
    }

    #[test]
    fn narrower_fov_magnifies() {
        let p = Projection::default();
        let wide = p.matrix(45.0);
        let narrow = p.matrix(10.0);
        // The y scale term grows as the field of view shrinks.
        assert!(narrow.y_axis.y > wide.y_axis.y);
        assert!(!wide.is_nan());
    }
}
