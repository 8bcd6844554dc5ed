//! Keyboard Input Module
//!
//! Tracks held keys and the keys that went down during the current frame.
//! Decoupled from winit to use generic key codes.

use std::collections::HashSet;

/// Generic key codes, independent of windowing system.
///
/// These map to standard keyboard keys but are not tied to winit::keyboard::KeyCode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    A,
    D,
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Keyboard state for one frame.
///
/// `held` mirrors the physical key state; `pressed` only holds keys whose
/// press event arrived since the last [`KeyboardState::end_frame`].
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release.
    ///
    /// A press for a key that is already held (OS key repeat) does not count
    /// as a new press.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        if pressed {
            if self.held.insert(key) {
                self.pressed.insert(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Whether the key is currently down.
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether the key went down during this frame.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Forget this frame's presses. Held keys stay held.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Release every key.
    pub fn reset(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}
