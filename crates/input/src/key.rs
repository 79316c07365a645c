use serde::{Deserialize, Serialize};

/// Keys the engine knows about. Windowing layers translate their own key
/// codes into these and drop everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    LeftShift,
    Tab,
    Escape,
    F1,
}
