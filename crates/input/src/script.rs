use std::path::Path;

use flycam_camera::{Camera, CameraState};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::controller::FlyController;
use crate::event::{EventQueue, InputEvent};

/// Errors from loading or validating an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("frame {frame}: frame time must be finite and non-negative, got {dt}")]
    InvalidFrameTime { frame: usize, dt: f32 },
    #[error("frame {frame}: event {event:?} carries a non-finite value")]
    NonFiniteEvent { frame: usize, event: InputEvent },
}

/// One recorded frame: its frame time and the events that arrived before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    pub dt: f32,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

/// A sequence of frames that can be replayed through a [`FlyController`]
/// without a window.
///
/// ```yaml
/// frames:
///   - dt: 0.016
///     events:
///       - { event: key_pressed, key: W }
///   - dt: 0.016
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub frames: Vec<ScriptFrame>,
}

impl InputScript {
    pub fn from_yaml_str(text: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_yaml::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let script = Self::from_yaml_str(&std::fs::read_to_string(path)?)?;
        tracing::debug!(
            path = %path.display(),
            frames = script.frames.len(),
            "loaded input script"
        );
        Ok(script)
    }

    /// Frame times and event payloads are handed to the camera unchecked, so
    /// reject negative frame times and anything NaN or infinite.
    pub fn validate(&self) -> Result<(), ScriptError> {
        for (frame, f) in self.frames.iter().enumerate() {
            if !f.dt.is_finite() || f.dt < 0.0 {
                return Err(ScriptError::InvalidFrameTime { frame, dt: f.dt });
            }
            if let Some(&event) = f.events.iter().find(|e| !e.is_finite()) {
                return Err(ScriptError::NonFiniteEvent { frame, event });
            }
        }
        Ok(())
    }

    /// Replay every frame and return the camera state after each one.
    ///
    /// Replay stops after a frame that produced [`Action::Quit`].
    pub fn run(&self, controller: &mut FlyController, camera: &mut Camera) -> Vec<CameraState> {
        let mut states = Vec::with_capacity(self.frames.len());
        self.run_with(controller, camera, |_, camera| states.push(camera.state()));
        states
    }

    /// Replay every frame, calling `on_frame` with the frame index and the
    /// camera once that frame's input has been applied. Returns the number of
    /// frames replayed.
    pub fn run_with<F>(
        &self,
        controller: &mut FlyController,
        camera: &mut Camera,
        mut on_frame: F,
    ) -> usize
    where
        F: FnMut(usize, &Camera),
    {
        let mut queue = EventQueue::new();

        for (index, frame) in self.frames.iter().enumerate() {
            queue.extend(frame.events.iter().copied());
            let actions = controller.update(&mut queue, camera, frame.dt);
            on_frame(index, camera);
            if actions.contains(&Action::Quit) {
                tracing::debug!(frame = index, "script quit early");
                return index + 1;
            }
        }

        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use glam::Vec3;
    use std::io::Write;

    const WALK: &str = "
frames:
  - dt: 0.5
    events:
      - { event: key_pressed, key: W }
  - dt: 0.5
  - dt: 0.5
    events:
      - { event: key_released, key: W }
";

    #[test]
    fn parse_and_run() {
        let script = InputScript::from_yaml_str(WALK).unwrap();
        assert_eq!(script.frames.len(), 3);
        assert_eq!(
            script.frames[0].events,
            vec![InputEvent::KeyPressed { key: Key::W }]
        );

        let mut controller = FlyController::default();
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        let states = script.run(&mut controller, &mut camera);
        assert_eq!(states.len(), 3);
        assert!(states[1].position.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-5));
        assert_eq!(states[1].position, states[2].position);
    }

    #[test]
    fn quit_stops_replay() {
        let script = InputScript::from_yaml_str(
            "
frames:
  - dt: 0.1
    events:
      - { event: key_pressed, key: Escape }
  - dt: 0.1
",
        )
        .unwrap();
        let states = script.run(&mut FlyController::default(), &mut Camera::default());
        assert_eq!(states.len(), 1);
    }

    #[test]
    fn negative_frame_time_rejected() {
        let err = InputScript::from_yaml_str("frames:\n  - dt: -0.1\n").unwrap_err();
        assert!(matches!(err, ScriptError::InvalidFrameTime { frame: 0, .. }));
    }

    #[test]
    fn non_finite_event_payloads_rejected() {
        let cases = [
            "{ event: mouse_motion, dx: .nan, dy: 0.0 }",
            "{ event: cursor_moved, x: 10.0, y: .inf }",
            "{ event: scroll, delta: .nan }",
        ];
        for event in cases {
            let yaml = format!(
                "frames:\n  - dt: 0.1\n  - dt: 0.1\n    events:\n      - {event}\n"
            );
            let err = InputScript::from_yaml_str(&yaml).unwrap_err();
            assert!(
                matches!(err, ScriptError::NonFiniteEvent { frame: 1, .. }),
                "{event}: {err}"
            );
        }
    }

    #[test]
    fn load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{WALK}").unwrap();
        let script = InputScript::load(tmp.path()).unwrap();
        assert_eq!(script.frames.len(), 3);
    }

    #[test]
    fn run_with_sees_each_frame() {
        let script = InputScript::from_yaml_str(WALK).unwrap();
        let mut seen = Vec::new();
        let frames = script.run_with(
            &mut FlyController::default(),
            &mut Camera::default(),
            |i, camera| seen.push((i, camera.position.z)),
        );
        assert_eq!(frames, 3);
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].0, 0);
        assert!(seen[2].1 < 3.0);
    }

    #[test]
    fn empty_script_produces_no_states() {
        let script = InputScript::default();
        assert!(script.run(&mut FlyController::default(), &mut Camera::default()).is_empty());
    }
}
