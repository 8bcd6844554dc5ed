//! Cursor State Module
//!
//! Visibility and lock mode of the OS cursor, as read from and written to a
//! [`CursorDevice`](crate::host::CursorDevice).

use serde::{Deserialize, Serialize};

/// How the cursor is constrained to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorLockMode {
    /// Free to leave the window
    #[default]
    None,
    /// Pinned in place (FPS-style)
    Locked,
    /// Kept inside the window but free to move
    Confined,
}

/// Snapshot of the cursor's visibility and lock mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    pub visible: bool,
    pub lock: CursorLockMode,
}

impl Default for CursorState {
    /// Visible and free, the state a menu or editor expects.
    fn default() -> Self {
        Self::released()
    }
}

impl CursorState {
    pub fn new(visible: bool, lock: CursorLockMode) -> Self {
        Self { visible, lock }
    }

    /// Cursor shown and unconstrained.
    pub fn released() -> Self {
        Self {
            visible: true,
            lock: CursorLockMode::None,
        }
    }

    /// Cursor hidden and locked in place.
    pub fn captured() -> Self {
        Self {
            visible: false,
            lock: CursorLockMode::Locked,
        }
    }

    pub fn is_captured(&self) -> bool {
        !self.visible && self.lock == CursorLockMode::Locked
    }
}
