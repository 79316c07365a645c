use std::collections::BTreeMap;

use flycam_camera::CameraMovement;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::key::Key;

/// Mapping from keys to camera movement and application commands.
///
/// Loadable from YAML; omitted fields keep their defaults.
///
/// ```yaml
/// movement: { W: Forward, S: Backward, A: Left, D: Right }
/// sprint: null
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub movement: BTreeMap<Key, CameraMovement>,
    /// While held, movement frame time is multiplied by `sprint_multiplier`.
    pub sprint: Option<Key>,
    pub sprint_multiplier: f32,
    pub toggle_fly: Key,
    pub toggle_hud: Key,
    pub quit: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let movement = BTreeMap::from([
            (Key::W, CameraMovement::Forward),
            (Key::Up, CameraMovement::Forward),
            (Key::S, CameraMovement::Backward),
            (Key::Down, CameraMovement::Backward),
            (Key::A, CameraMovement::Left),
            (Key::Left, CameraMovement::Left),
            (Key::D, CameraMovement::Right),
            (Key::Right, CameraMovement::Right),
        ]);
        Self {
            movement,
            sprint: Some(Key::LeftShift),
            sprint_multiplier: 3.0,
            toggle_fly: Key::Tab,
            toggle_hud: Key::F1,
            quit: Key::Escape,
        }
    }
}

impl KeyBindings {
    pub fn movement_for(&self, key: Key) -> Option<CameraMovement> {
        self.movement.get(&key).copied()
    }

    /// Application command bound to a key press, if any.
    pub fn command_for(&self, key: Key) -> Option<Action> {
        if key == self.toggle_fly {
            Some(Action::ToggleFly)
        } else if key == self.toggle_hud {
            Some(Action::ToggleHud)
        } else if key == self.quit {
            Some(Action::Quit)
        } else {
            None
        }
    }
}
