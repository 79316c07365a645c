//! Input layer: windowing events in, camera updates out.
//!
//! Event callbacks push [`InputEvent`]s into an [`EventQueue`]; once per frame
//! the [`FlyController`] drains the queue, folds it into its [`InputState`],
//! turns the result into [`Action`]s and applies the camera ones.
//!
//! # Invariants
//! - All input for a frame is applied before the camera is read for drawing.
//! - Input state lives in explicit structs, never in globals.
//! - The crate is windowing-agnostic; apps translate their key codes to [`Key`].

pub mod action;
mod bindings;
mod controller;
mod event;
mod key;
mod script;
mod state;

pub use action::Action;
pub use bindings::KeyBindings;
pub use controller::FlyController;
pub use event::{EventQueue, InputEvent};
pub use key::Key;
pub use script::{InputScript, ScriptError, ScriptFrame};
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "flycam-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
