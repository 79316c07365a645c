use flycam_camera::{Camera, CameraMovement};

/// A high-level action produced from one frame of input.
///
/// Camera actions are applied by [`crate::FlyController`]; the rest are
/// reported back to the application, which owns the window and the HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Move along one camera axis for the given (possibly sprint-scaled) frame time.
    Move {
        direction: CameraMovement,
        delta_time: f32,
    },
    /// Turn by a pixel delta, y already reversed so positive looks up.
    Look {
        x_offset: f32,
        y_offset: f32,
        constrain_pitch: bool,
    },
    /// Scroll delta for the field of view.
    Zoom(f32),
    /// Free-fly control was switched on or off.
    ToggleFly,
    /// Show or hide the overlay.
    ToggleHud,
    /// Leave the application.
    Quit,
}

impl Action {
    pub fn is_camera_action(&self) -> bool {
        matches!(self, Self::Move { .. } | Self::Look { .. } | Self::Zoom(_))
    }

    /// Apply a camera action. Application-level actions leave the camera untouched.
    pub fn apply(&self, camera: &mut Camera) {
        match *self {
            Self::Move {
                direction,
                delta_time,
            } => camera.process_keyboard(direction, delta_time),
            Self::Look {
                x_offset,
                y_offset,
                constrain_pitch,
            } => camera.process_mouse_movement(x_offset, y_offset, constrain_pitch),
            Self::Zoom(y_offset) => camera.process_mouse_scroll(y_offset),
            Self::ToggleFly | Self::ToggleHud | Self::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn move_applies_keyboard() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        Action::Move {
            direction: CameraMovement::Forward,
            delta_time: 1.0,
        }
        .apply(&mut cam);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-5));
    }

    #[test]
    fn look_applies_mouse() {
        let mut cam = Camera::default();
        cam.mouse_sensitivity = 1.0;
        Action::Look {
            x_offset: 90.0,
            y_offset: 0.0,
            constrain_pitch: true,
        }
        .apply(&mut cam);
        assert_eq!(cam.yaw(), 0.0);
    }

    #[test]
    fn zoom_applies_scroll() {
        let mut cam = Camera::default();
        Action::Zoom(2.0).apply(&mut cam);
        assert_eq!(cam.zoom(), 43.0);
    }

    #[test]
    fn app_actions_leave_camera_alone() {
        let mut cam = Camera::default();
        let before = cam.clone();
        for action in [Action::ToggleFly, Action::ToggleHud, Action::Quit] {
            assert!(!action.is_camera_action());
            action.apply(&mut cam);
        }
        assert_eq!(cam, before);
    }
}
