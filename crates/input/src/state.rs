use std::collections::BTreeSet;

use glam::Vec2;

use crate::event::InputEvent;
use crate::key::Key;

/// Input accumulated from events, owned by the frame loop.
///
/// Tracks which keys are held, the last cursor sample and the look/scroll
/// deltas gathered since they were last taken.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_held: BTreeSet<Key>,
    /// Newly pressed keys since the last `take_pressed`, auto-repeat excluded.
    pressed: Vec<Key>,
    /// `None` until the first cursor sample arrives (or after `reset_cursor`).
    last_cursor: Option<Vec2>,
    /// x = right, y = up.
    look_delta: Vec2,
    scroll_delta: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPressed { key } => {
                if self.keys_held.insert(key) {
                    self.pressed.push(key);
                }
            }
            InputEvent::KeyReleased { key } => {
                self.keys_held.remove(&key);
            }
            InputEvent::CursorMoved { x, y } => {
                let position = Vec2::new(x, y);
                // The first sample only establishes a reference point; using it
                // as a delta would snap the view by the cursor's distance to 0,0.
                if let Some(last) = self.last_cursor {
                    self.look_delta += Vec2::new(x - last.x, last.y - y);
                }
                self.last_cursor = Some(position);
            }
            InputEvent::MouseMotion { dx, dy } => {
                self.look_delta += Vec2::new(dx, -dy);
            }
            InputEvent::Scroll { delta } => {
                self.scroll_delta += delta;
            }
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    /// Held keys in a stable order.
    pub fn held_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys_held.iter().copied()
    }

    pub fn take_pressed(&mut self) -> Vec<Key> {
        std::mem::take(&mut self.pressed)
    }

    /// Look delta in pixels since the last call, with positive y meaning up.
    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    pub fn take_scroll_delta(&mut self) -> f32 {
        std::mem::take(&mut self.scroll_delta)
    }

    /// Forget the cursor reference so the next sample is treated as the first.
    pub fn reset_cursor(&mut self) {
        self.last_cursor = None;
        self.look_delta = Vec2::ZERO;
    }

    /// Drop all held keys, e.g. when the window loses focus and release events
    /// will never arrive.
    pub fn release_all(&mut self) {
        self.keys_held.clear();
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cursor_sample_produces_no_delta() {
        let mut state = InputState::new();
        state.handle_event(&InputEvent::CursorMoved { x: 400.0, y: 300.0 });
        assert_eq!(state.take_look_delta(), Vec2::ZERO);
    }

    #[test]
    fn cursor_delta_reverses_y() {
        let mut state = InputState::new();
        state.handle_event(&InputEvent::CursorMoved { x: 400.0, y: 300.0 });
        state.handle_event(&InputEvent::CursorMoved { x: 410.0, y: 295.0 });
        state.handle_event(&InputEvent::CursorMoved { x: 415.0, y: 290.0 });
        assert_eq!(state.take_look_delta(), Vec2::new(15.0, 10.0));
        // Taken deltas are cleared.
        assert_eq!(state.take_look_delta(), Vec2::ZERO);
    }

    #[test]
    fn mouse_motion_reverses_y() {
        let mut state = InputState::new();
        state.handle_event(&InputEvent::MouseMotion { dx: -4.0, dy: 6.0 });
        assert_eq!(state.take_look_delta(), Vec2::new(-4.0, -6.0));
    }

    #[test]
    fn reset_cursor_rearms_first_sample() {
        let mut state = InputState::new();
        state.handle_event(&InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        state.reset_cursor();
        state.handle_event(&InputEvent::CursorMoved { x: 500.0, y: 500.0 });
        assert_eq!(state.take_look_delta(), Vec2::ZERO);
    }

    #[test]
    fn held_keys_and_auto_repeat() {
        let mut state = InputState::new();
        state.handle_event(&InputEvent::KeyPressed { key: Key::W });
        state.handle_event(&InputEvent::KeyPressed { key: Key::W });
        state.handle_event(&InputEvent::KeyPressed { key: Key::D });
        assert!(state.is_held(Key::W));
        assert_eq!(state.take_pressed(), vec![Key::W, Key::D]);

        state.handle_event(&InputEvent::KeyReleased { key: Key::W });
        assert!(!state.is_held(Key::W));
        assert_eq!(state.held_keys().collect::<Vec<_>>(), vec![Key::D]);
    }

    #[test]
    fn scroll_accumulates() {
        let mut state = InputState::new();
        state.handle_event(&InputEvent::Scroll { delta: 1.0 });
        state.handle_event(&InputEvent::Scroll { delta: 2.5 });
        assert_eq!(state.take_scroll_delta(), 3.5);
        assert_eq!(state.take_scroll_delta(), 0.0);
    }

    #[test]
    fn release_all_clears_keys() {
        let mut state = InputState::new();
        state.handle_event(&InputEvent::KeyPressed { key: Key::A });
        state.release_all();
        assert!(!state.is_held(Key::A));
        assert!(state.take_pressed().is_empty());
    }
}
