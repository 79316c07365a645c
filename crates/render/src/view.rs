use flycam_camera::{Camera, Projection};
use glam::{Mat4, Vec3};

/// Everything a renderer needs from the camera for one frame.
///
/// Built after the frame's input has been applied; renderers never see the
/// camera itself and so cannot mutate it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub view: Mat4,
    pub projection: Mat4,
    /// Camera position in world space.
    pub eye: Vec3,
    /// Unit view direction.
    pub front: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for FrameView {
    fn default() -> Self {
        Self::from_camera(&Camera::default(), &Projection::default())
    }
}

impl FrameView {
    pub fn from_camera(camera: &Camera, projection: &Projection) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: projection.matrix(camera.zoom()),
            eye: camera.position,
            front: camera.front(),
            fov_degrees: camera.zoom(),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Whether a world-space point lands inside the view volume.
    pub fn is_visible(&self, point: Vec3) -> bool {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return false;
        }
        let ndc = clip.truncate() / clip.w;
        // wgpu depth range is [0, 1].
        ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && (0.0..=1.0).contains(&ndc.z)
    }
}
