//! Input Configuration
//!
//! Key and button bindings for the hijack, kept in one place instead of
//! being matched inline in the controller.

use crate::input::{InputState, KeyCode, MouseButton};

/// Hijack bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HijackBindings {
    /// Toggles the hijack on and off
    pub engage: MouseButton,
    /// Ends an active hijack
    pub cancel: KeyCode,
    /// Observe the next character in the list
    pub next: KeyCode,
    /// Observe the previous character in the list
    pub previous: KeyCode,
}

impl Default for HijackBindings {
    fn default() -> Self {
        Self {
            engage: MouseButton::Middle,
            cancel: KeyCode::Escape,
            next: KeyCode::D,
            previous: KeyCode::A,
        }
    }
}

impl HijackBindings {
    pub fn engage_pressed(&self, input: &InputState) -> bool {
        input.mouse.just_pressed(self.engage)
    }

    pub fn cancel_pressed(&self, input: &InputState) -> bool {
        input.keyboard.just_pressed(self.cancel)
    }

    pub fn next_pressed(&self, input: &InputState) -> bool {
        input.keyboard.just_pressed(self.next)
    }

    pub fn previous_pressed(&self, input: &InputState) -> bool {
        input.keyboard.just_pressed(self.previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = HijackBindings::default();
        let mut input = InputState::new();
        input.click(MouseButton::Middle);
        input.tap_key(KeyCode::D);

        assert!(bindings.engage_pressed(&input));
        assert!(bindings.next_pressed(&input));
        assert!(!bindings.previous_pressed(&input));
        assert!(!bindings.cancel_pressed(&input));
    }
}
