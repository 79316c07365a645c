use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::key::Key;

/// A raw input event as delivered by the windowing layer.
///
/// Cursor positions and motion deltas are in pixels with screen Y growing
/// downward; the reversal to "positive looks up" happens in [`crate::InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    KeyPressed { key: Key },
    KeyReleased { key: Key },
    /// Absolute cursor position.
    CursorMoved { x: f32, y: f32 },
    /// Relative pointer motion (e.g. raw device motion while the cursor is grabbed).
    MouseMotion { dx: f32, dy: f32 },
    /// Vertical scroll, positive = away from the user.
    Scroll { delta: f32 },
}

impl InputEvent {
    /// False when a pointer or scroll payload is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::KeyPressed { .. } | Self::KeyReleased { .. } => true,
            Self::CursorMoved { x, y } => x.is_finite() && y.is_finite(),
            Self::MouseMotion { dx, dy } => dx.is_finite() && dy.is_finite(),
            Self::Scroll { delta } => delta.is_finite(),
        }
    }
}

/// FIFO of input events collected between frames.
///
/// Event callbacks only push; the frame loop drains the whole queue at one
/// fixed point before the camera is read, so the rendered view always
/// reflects every event received up to that frame.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Remove and yield every queued event in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Extend<InputEvent> for EventQueue {
    fn extend<T: IntoIterator<Item = InputEvent>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut queue = EventQueue::new();
        queue.push(InputEvent::KeyPressed { key: Key::W });
        queue.push(InputEvent::Scroll { delta: 1.0 });
        queue.push(InputEvent::KeyReleased { key: Key::W });
        assert_eq!(queue.len(), 3);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                InputEvent::KeyPressed { key: Key::W },
                InputEvent::Scroll { delta: 1.0 },
                InputEvent::KeyReleased { key: Key::W },
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_discards_pending_events() {
        let mut queue = EventQueue::new();
        queue.extend([
            InputEvent::KeyPressed { key: Key::A },
            InputEvent::MouseMotion { dx: 1.0, dy: 1.0 },
        ]);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn finiteness_checks_pointer_payloads() {
        assert!(InputEvent::KeyPressed { key: Key::W }.is_finite());
        assert!(InputEvent::Scroll { delta: -3.0 }.is_finite());
        assert!(!InputEvent::Scroll { delta: f32::NAN }.is_finite());
        assert!(!InputEvent::MouseMotion { dx: 0.0, dy: f32::INFINITY }.is_finite());
        assert!(!InputEvent::CursorMoved { x: f32::NAN, y: 0.0 }.is_finite());
    }

    #[test]
    fn events_parse_from_yaml() {
        let events: Vec<InputEvent> = serde_yaml::from_str(
            "- { event: key_pressed, key: LeftShift }\n- { event: mouse_motion, dx: 3.0, dy: -2.0 }\n",
        )
        .unwrap();
        assert_eq!(events[0], InputEvent::KeyPressed { key: Key::LeftShift });
        assert_eq!(events[1], InputEvent::MouseMotion { dx: 3.0, dy: -2.0 });
    }
}
