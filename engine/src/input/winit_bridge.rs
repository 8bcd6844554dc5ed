//! Winit Bridge
//!
//! Feeds winit window events into [`InputState`] and drives the real OS
//! cursor through the [`CursorDevice`] contract.

use std::sync::Arc;

use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window};

use super::{CursorLockMode, CursorState, InputState, KeyCode, MouseButton};
use crate::host::CursorDevice;

/// Map a winit key code to the engine's key code.
pub fn map_key(key: WinitKeyCode) -> KeyCode {
    match key {
        WinitKeyCode::KeyA => KeyCode::A,
        WinitKeyCode::KeyD => KeyCode::D,
        WinitKeyCode::Escape => KeyCode::Escape,
        _ => KeyCode::Unknown,
    }
}

/// Map a winit mouse button to the engine's mouse button.
pub fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Back => MouseButton::Other(4),
        WinitMouseButton::Forward => MouseButton::Other(5),
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

/// Apply a window event to the input state.
///
/// Returns `true` if the event was a keyboard or mouse button event.
pub fn apply_window_event(input: &mut InputState, event: &WindowEvent) -> bool {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            if let PhysicalKey::Code(code) = event.physical_key {
                input
                    .keyboard
                    .handle_key(map_key(code), event.state == ElementState::Pressed);
            }
            true
        }
        WindowEvent::MouseInput { state, button, .. } => {
            input
                .mouse
                .set_button(map_mouse_button(*button), *state == ElementState::Pressed);
            true
        }
        // Losing focus drops every held key so nothing sticks down
        WindowEvent::Focused(false) => {
            input.reset();
            false
        }
        _ => false,
    }
}

/// [`CursorDevice`] backed by a winit window.
///
/// winit cannot report cursor visibility, so the last applied state is cached.
pub struct WinitCursor {
    window: Arc<Window>,
    state: CursorState,
}

impl WinitCursor {
    pub fn new(window: Arc<Window>, initial: CursorState) -> Self {
        let mut cursor = Self {
            window,
            state: initial,
        };
        cursor.apply(initial);
        cursor
    }

    fn apply(&mut self, state: CursorState) {
        let grab = match state.lock {
            CursorLockMode::None => CursorGrabMode::None,
            CursorLockMode::Locked => CursorGrabMode::Locked,
            CursorLockMode::Confined => CursorGrabMode::Confined,
        };
        if let Err(err) = self.window.set_cursor_grab(grab) {
            if grab == CursorGrabMode::Locked {
                // Not every platform can lock; confine instead
                if let Err(err) = self.window.set_cursor_grab(CursorGrabMode::Confined) {
                    tracing::warn!(%err, "cursor grab unsupported");
                }
            } else {
                tracing::warn!(%err, ?grab, "cursor grab failed");
            }
        }
        self.window.set_cursor_visible(state.visible);
        self.state = state;
    }
}

impl CursorDevice for WinitCursor {
    fn cursor_state(&self) -> CursorState {
        self.state
    }

    fn set_cursor_state(&mut self, state: CursorState) {
        self.apply(state);
    }
}
