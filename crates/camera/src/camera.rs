use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::projection::Projection;

/// Initial yaw in degrees. -90 makes the initial front vector point down -Z.
pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
/// World units per second.
pub const DEFAULT_SPEED: f32 = 2.5;
/// Degrees per pixel of mouse delta.
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch is kept strictly inside (-90, 90) so the look direction never flips over a pole.
pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

/// Below this squared length a vector is treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Direction of a single keyboard-driven camera displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Errors from the checked camera constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("world up vector {0:?} is zero or parallel to the initial view direction")]
    DegenerateWorldUp(Vec3),
    #[error("{name} must be positive and finite, got {value}")]
    InvalidTuning { name: &'static str, value: f32 },
    #[error("{name} must be finite")]
    NonFinite { name: &'static str },
}

/// First-person fly camera.
///
/// Orientation is stored as yaw/pitch in degrees. The `front`, `right` and
/// `up` vectors are re-derived from those two angles after every orientation
/// change, so they are always an orthonormal basis and never drift.
///
/// The update methods do not validate their inputs. A NaN offset or frame time
/// propagates into the camera state, and a negative frame time moves the
/// camera against the requested direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye location in world space.
    pub position: Vec3,
    /// World units per second for [`Camera::process_keyboard`].
    pub movement_speed: f32,
    /// Degrees per pixel for [`Camera::process_mouse_movement`].
    pub mouse_sensitivity: f32,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0))
    }
}

impl Camera {
    /// Camera at `position` with +Y as world up, looking down -Z.
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }

    /// Camera with an explicit world up vector and starting angles (degrees).
    ///
    /// `world_up` must be non-zero and not parallel to the resulting front
    /// vector; otherwise the basis is NaN. Use
    /// [`Camera::try_with_orientation`] when the inputs are not trusted.
    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            front: Vec3::NEG_Z,
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw: wrap_degrees(yaw),
            pitch,
            zoom: DEFAULT_ZOOM,
        };
        camera.update_camera_vectors();
        tracing::debug!(
            ?position,
            yaw = camera.yaw,
            pitch = camera.pitch,
            "camera created"
        );
        camera
    }

    /// Like [`Camera::with_orientation`] but rejects non-finite inputs and a
    /// degenerate `world_up`.
    pub fn try_with_orientation(
        position: Vec3,
        world_up: Vec3,
        yaw: f32,
        pitch: f32,
    ) -> Result<Self, CameraError> {
        if !position.is_finite() {
            return Err(CameraError::NonFinite { name: "position" });
        }
        if !yaw.is_finite() {
            return Err(CameraError::NonFinite { name: "yaw" });
        }
        if !pitch.is_finite() {
            return Err(CameraError::NonFinite { name: "pitch" });
        }
        if !world_up.is_finite() || world_up.length_squared() < DEGENERATE_EPSILON {
            return Err(CameraError::DegenerateWorldUp(world_up));
        }
        let front = front_from_angles(wrap_degrees(yaw), pitch);
        if front.cross(world_up).length_squared() < DEGENERATE_EPSILON {
            return Err(CameraError::DegenerateWorldUp(world_up));
        }
        Ok(Self::with_orientation(position, world_up, yaw, pitch))
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Yaw in degrees, wrapped into [-180, 180).
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees, within [`MIN_ZOOM`, `MAX_ZOOM`]
    /// unless a NaN scroll offset was applied.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Look-at transform from `position` toward `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Projection (driven by the current zoom) times view.
    pub fn view_projection(&self, projection: &Projection) -> Mat4 {
        projection.matrix(self.zoom) * self.view_matrix()
    }

    /// Displace the camera by `movement_speed * delta_time` along front or right.
    ///
    /// Calls for different directions within one frame add up, and the order
    /// of those calls does not matter.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Turn the camera by a mouse delta in pixels.
    ///
    /// `y_offset` must already be reversed by the caller (positive looks up).
    /// With `constrain_pitch` the pitch is clamped to ±[`PITCH_LIMIT`].
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw = wrap_degrees(self.yaw + x_offset * self.mouse_sensitivity);
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch && self.pitch.abs() > PITCH_LIMIT {
            tracing::trace!(pitch = self.pitch, "pitch clamped");
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_camera_vectors();
    }

    /// Narrow (positive offset) or widen (negative offset) the field of view.
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Read-only report of the current camera state.
    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            front: self.front,
            up: self.up,
            right: self.right,
            yaw: self.yaw,
            pitch: self.pitch,
            zoom: self.zoom,
        }
    }

    pub(crate) fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_camera_vectors(&mut self) {
        self.front = front_from_angles(self.yaw, self.pitch);
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// Snapshot of a camera for logging and tooling output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraState {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
}

fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

/// Wrap an angle in degrees into [-180, 180).
fn wrap_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(cam: &Camera) {
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        assert!((f.length() - 1.0).abs() < EPS, "front not unit: {f:?}");
        assert!((r.length() - 1.0).abs() < EPS, "right not unit: {r:?}");
        assert!((u.length() - 1.0).abs() < EPS, "up not unit: {u:?}");
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
    }

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        assert!(cam.front().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(cam.right().abs_diff_eq(Vec3::X, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Y, EPS));
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert_eq!(cam.zoom(), 45.0);
    }

    #[test]
    fn forward_one_second_at_default_speed() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        cam.process_keyboard(CameraMovement::Forward, 1.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), EPS));
    }

    #[test]
    fn backward_and_left_flip_sign() {
        let mut cam = Camera::new(Vec3::ZERO);
        cam.process_keyboard(CameraMovement::Backward, 2.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), EPS));

        let mut cam = Camera::new(Vec3::ZERO);
        cam.process_keyboard(CameraMovement::Left, 2.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(-5.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn movement_families_commute() {
        let start = Camera::with_orientation(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, 37.0, -12.0);
        let dt = 0.016;

        let mut a = start.clone();
        a.process_keyboard(CameraMovement::Forward, dt);
        a.process_keyboard(CameraMovement::Right, dt);

        let mut b = start;
        b.process_keyboard(CameraMovement::Right, dt);
        b.process_keyboard(CameraMovement::Forward, dt);

        assert!(a.position.abs_diff_eq(b.position, 1e-6));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut cam = Camera::new(Vec3::ZERO);
        cam.process_keyboard(CameraMovement::Forward, 0.5);
        cam.process_keyboard(CameraMovement::Backward, 0.5);
        assert!(cam.position.abs_diff_eq(Vec3::ZERO, EPS));
    }

    #[test]
    fn mouse_turn_to_positive_x() {
        let mut cam = Camera::new(Vec3::ZERO);
        cam.mouse_sensitivity = 1.0;
        cam.process_mouse_movement(90.0, 0.0, true);
        assert_eq!(cam.yaw(), 0.0);
        assert!(cam.front().abs_diff_eq(Vec3::X, EPS));
        assert_orthonormal(&cam);
    }

    #[test]
    fn pitch_converges_to_limit() {
        let mut cam = Camera::new(Vec3::ZERO);
        for _ in 0..50 {
            cam.process_mouse_movement(0.0, 1000.0, true);
            assert!(cam.pitch() <= PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), PITCH_LIMIT);

        for _ in 0..50 {
            cam.process_mouse_movement(0.0, -1000.0, true);
            assert!(cam.pitch() >= -PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
        assert_orthonormal(&cam);
    }

    #[test]
    fn unconstrained_pitch_is_not_clamped() {
        let mut cam = Camera::new(Vec3::ZERO);
        cam.mouse_sensitivity = 1.0;
        cam.process_mouse_movement(0.0, 120.0, false);
        assert_eq!(cam.pitch(), 120.0);
    }

    #[test]
    fn basis_orthonormal_across_clamp_range() {
        let mut yaw = -720.0;
        while yaw <= 720.0 {
            let mut pitch = -PITCH_LIMIT;
            while pitch <= PITCH_LIMIT {
                let cam = Camera::with_orientation(Vec3::ZERO, Vec3::Y, yaw, pitch);
                assert_orthonormal(&cam);
                pitch += 7.0;
            }
            yaw += 15.0;
        }
    }

    #[test]
    fn yaw_stays_wrapped() {
        let mut cam = Camera::new(Vec3::ZERO);
        cam.mouse_sensitivity = 1.0;
        let reference = {
            let mut c = cam.clone();
            c.process_mouse_movement(100.0, 0.0, true);
            c.front()
        };
        for _ in 0..1000 {
            cam.process_mouse_movement(360.0, 0.0, true);
        }
        cam.process_mouse_movement(100.0, 0.0, true);
        assert!((-180.0..180.0).contains(&cam.yaw()));
        assert!(cam.front().abs_diff_eq(reference, 1e-4));
    }

    #[test]
    fn wrap_degrees_range() {
        assert_eq!(wrap_degrees(-90.0), -90.0);
        assert_eq!(wrap_degrees(180.0), -180.0);
        assert_eq!(wrap_degrees(270.0), -90.0);
        assert_eq!(wrap_degrees(-540.0), -180.0);
    }

    #[test]
    fn zoom_clamped_both_ways() {
        let mut cam = Camera::default();
        cam.process_mouse_scroll(1000.0);
        assert_eq!(cam.zoom(), MIN_ZOOM);
        cam.process_mouse_scroll(-1000.0);
        assert_eq!(cam.zoom(), MAX_ZOOM);
        cam.process_mouse_scroll(5.0);
        assert_eq!(cam.zoom(), 40.0);
    }

    #[test]
    fn scroll_leaves_orientation_alone() {
        let mut cam = Camera::default();
        let before = (cam.front(), cam.right(), cam.up());
        cam.process_mouse_scroll(3.0);
        assert_eq!(before, (cam.front(), cam.right(), cam.up()));
    }

    #[test]
    fn view_matrix_is_pure() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(13.0, -7.0, true);
        let a = cam.view_matrix();
        let b = cam.view_matrix();
        assert_eq!(a, b);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let cam = Camera::with_orientation(Vec3::new(4.0, -1.0, 2.0), Vec3::Y, 30.0, 20.0);
        let eye = cam.view_matrix().transform_point3(cam.position);
        assert!(eye.abs_diff_eq(Vec3::ZERO, EPS));
        // A point straight ahead ends up on the -Z axis in eye space.
        let ahead = cam.view_matrix().transform_point3(cam.position + cam.front() * 5.0);
        assert!(ahead.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-4));
    }

    #[test]
    fn checked_constructor_rejects_zero_world_up() {
        let err = Camera::try_with_orientation(Vec3::ZERO, Vec3::ZERO, DEFAULT_YAW, 0.0);
        assert_eq!(err, Err(CameraError::DegenerateWorldUp(Vec3::ZERO)));
    }

    #[test]
    fn checked_constructor_rejects_world_up_along_front() {
        let err = Camera::try_with_orientation(Vec3::ZERO, Vec3::NEG_Z, DEFAULT_YAW, 0.0);
        assert!(matches!(err, Err(CameraError::DegenerateWorldUp(_))));
    }

    #[test]
    fn custom_world_up() {
        let cam = Camera::try_with_orientation(Vec3::ZERO, Vec3::Z, 0.0, 0.0).unwrap();
        assert_orthonormal(&cam);
        assert_eq!(cam.world_up(), Vec3::Z);
        assert!(cam.up().abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn checked_constructor_rejects_non_finite_inputs() {
        let yaw = Camera::try_with_orientation(Vec3::ZERO, Vec3::Y, f32::INFINITY, 0.0);
        assert_eq!(yaw, Err(CameraError::NonFinite { name: "yaw" }));

        let pitch = Camera::try_with_orientation(Vec3::ZERO, Vec3::Y, DEFAULT_YAW, f32::NAN);
        assert_eq!(pitch, Err(CameraError::NonFinite { name: "pitch" }));

        let position =
            Camera::try_with_orientation(Vec3::new(0.0, f32::NAN, 0.0), Vec3::Y, DEFAULT_YAW, 0.0);
        assert_eq!(position, Err(CameraError::NonFinite { name: "position" }));
    }

    #[test]
    fn nan_offset_propagates() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(f32::NAN, 0.0, true);
        assert!(cam.yaw().is_nan());
        assert!(cam.front().is_nan());
    }

    #[test]
    fn state_reports_current_values() {
        let mut cam = Camera::default();
        cam.process_mouse_scroll(10.0);
        let state = cam.state();
        assert_eq!(state.position, cam.position);
        assert_eq!(state.front, cam.front());
        assert_eq!(state.zoom, 35.0);
    }
}
