use std::collections::BTreeSet;

use flycam_camera::{Camera, CameraMovement};
use glam::Vec2;

use crate::action::Action;
use crate::bindings::KeyBindings;
use crate::event::EventQueue;
use crate::state::InputState;

/// Drives a [`Camera`] from queued input once per frame.
///
/// Owns the input state, so nothing about held keys or the last cursor
/// position lives in globals. Call [`FlyController::update`] once per frame
/// before reading the view matrix.
#[derive(Debug, Clone)]
pub struct FlyController {
    pub bindings: KeyBindings,
    /// Clamp pitch to ±89° on mouse look.
    pub constrain_pitch: bool,
    state: InputState,
    enabled: bool,
}

impl Default for FlyController {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl FlyController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            constrain_pitch: true,
            state: InputState::new(),
            enabled: true,
        }
    }

    /// Whether free-fly control currently drives the camera.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.state.reset_cursor();
        tracing::debug!(enabled, "fly control toggled");
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Forget held keys, e.g. after the window loses focus.
    pub fn release_all(&mut self) {
        self.state.release_all();
    }

    /// Drain the frame's events, apply camera actions and return every action
    /// produced, application commands included.
    ///
    /// Commands are handled first, so toggling fly on takes effect in the same
    /// frame. Then one `Move` per distinct held direction, one `Look` and one
    /// `Zoom` are applied in that order. While fly control is disabled the
    /// look, scroll and movement input of the frame is discarded.
    pub fn update(
        &mut self,
        queue: &mut EventQueue,
        camera: &mut Camera,
        delta_time: f32,
    ) -> Vec<Action> {
        let _span = tracing::info_span!("fly_update").entered();

        for event in queue.drain() {
            self.state.handle_event(&event);
        }

        let mut actions: Vec<Action> = self
            .state
            .take_pressed()
            .into_iter()
            .filter_map(|key| self.bindings.command_for(key))
            .collect();
        for action in &actions {
            if *action == Action::ToggleFly {
                self.set_enabled(!self.enabled);
            }
        }

        let look = self.state.take_look_delta();
        let scroll = self.state.take_scroll_delta();

        if self.enabled {
            let dt = match self.bindings.sprint {
                Some(key) if self.state.is_held(key) => {
                    delta_time * self.bindings.sprint_multiplier
                }
                _ => delta_time,
            };

            // W and Up both held must not move twice as fast.
            let directions: BTreeSet<CameraMovement> = self
                .state
                .held_keys()
                .filter_map(|key| self.bindings.movement_for(key))
                .collect();
            for direction in directions {
                actions.push(Action::Move {
                    direction,
                    delta_time: dt,
                });
            }

            if look != Vec2::ZERO {
                actions.push(Action::Look {
                    x_offset: look.x,
                    y_offset: look.y,
                    constrain_pitch: self.constrain_pitch,
                });
            }
            if scroll != 0.0 {
                actions.push(Action::Zoom(scroll));
            }
        }

        for action in &actions {
            action.apply(camera);
        }

        tracing::trace!(
            actions = actions.len(),
            position = ?camera.position,
            yaw = camera.yaw(),
            pitch = camera.pitch(),
            "fly update complete"
        );

        actions
    }
}
