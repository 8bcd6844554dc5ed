//! Input Module
//!
//! Provides platform-agnostic input handling for keyboard, mouse and cursor.
//! This module is decoupled from any specific windowing system; the
//! [`winit_bridge`] submodule translates winit events into it.
//!
//! The host records events as they arrive, the controller reads the
//! "pressed this frame" edges during its tick, and the host then calls
//! [`InputState::end_frame`].
//!
//! # Example
//!
//! ```rust,ignore
//! use spectator_hijack_engine::input::{InputState, KeyCode, MouseButton};
//!
//! let mut input = InputState::new();
//! input.mouse.set_button(MouseButton::Middle, true);
//! assert!(input.mouse.just_pressed(MouseButton::Middle));
//!
//! controller.tick(&mut frame);
//! input.end_frame();
//! ```

pub mod cursor;
pub mod keyboard;
pub mod mouse;
pub mod winit_bridge;

// Re-export commonly used types at module level
pub use cursor::{CursorLockMode, CursorState};
pub use keyboard::{KeyCode, KeyboardState};
pub use mouse::{ButtonState, MouseButton, MouseState};

/// Combined input state for both keyboard and mouse.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl InputState {
    /// Create a new input state with all inputs in their default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop this frame's press edges once every consumer has run.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
    }

    /// Reset all input state to defaults.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.mouse.reset();
    }

    /// Convenience for scripted input: press and immediately release a key.
    pub fn tap_key(&mut self, key: KeyCode) {
        self.keyboard.handle_key(key, true);
        self.keyboard.handle_key(key, false);
    }

    /// Convenience for scripted input: click a mouse button.
    pub fn click(&mut self, button: MouseButton) {
        self.mouse.set_button(button, true);
        self.mouse.set_button(button, false);
    }
}
