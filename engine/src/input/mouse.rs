//! Mouse Input Module
//!
//! Contains mouse button tracking with per-frame press edges.
//! Decoupled from winit to use generic types.

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// State of the three main mouse buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    /// Create a new button state with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update button state for a specific button.
    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Other(_) => {} // Ignore extra buttons
        }
    }

    /// Check if a specific button is set.
    pub fn is_set(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => false,
        }
    }

    /// Check if any button is set.
    pub fn any(&self) -> bool {
        self.left || self.middle || self.right
    }

    /// Reset all buttons to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Mouse button state for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    /// Buttons currently held down
    pub held: ButtonState,
    /// Buttons that went down since the last `end_frame`
    pub pressed: ButtonState,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a button press or release.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed && !self.held.is_set(button) {
            self.pressed.set(button, true);
        }
        self.held.set(button, pressed);
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held.is_set(button)
    }

    /// Whether the button went down during this frame.
    pub fn just_pressed(&self, button: MouseButton) -> bool {
        self.pressed.is_set(button)
    }

    pub fn end_frame(&mut self) {
        self.pressed.reset();
    }

    pub fn reset(&mut self) {
        self.held.reset();
        self.pressed.reset();
    }
}
