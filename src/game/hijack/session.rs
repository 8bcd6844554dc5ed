//! Hijack Session
//!
//! State that only exists while the camera is hijacked. Created by
//! `start_hijack`, dropped by `stop_hijack`; nothing outside the controller
//! holds on to it.

use crate::host::{CharacterRef, Pose};
use crate::input::CursorState;

/// Direction of a manual target switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchDirection {
    Next,
    Previous,
}

/// Animation state of the hacking overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoiseState {
    /// Current overlay opacity
    pub alpha: f32,
    /// UV scroll, kept in `[0, 1)`
    pub scroll_x: f32,
    pub scroll_y: f32,
    /// Vertical position of the scanline band as a fraction of screen height
    pub scanline_y: f32,
    /// Seconds since the scanline last jumped
    pub scanline_timer: f32,
}

#[derive(Debug, Clone)]
pub struct HijackSession {
    pub(super) player: CharacterRef,
    pub(super) targets: Vec<CharacterRef>,
    pub(super) current_index: usize,
    pub(super) next_switch_allowed_at: f64,
    pub(super) frozen_pose: Pose,
    pub(super) noise: NoiseState,
    pub(super) saved_cursor: CursorState,
}

impl HijackSession {
    /// The player character frozen in place for this session.
    pub fn player(&self) -> CharacterRef {
        self.player
    }

    /// Candidates being cycled through, in scene enumeration order.
    pub fn targets(&self) -> &[CharacterRef] {
        &self.targets
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The character the camera follows. Always `targets[current_index]`.
    pub fn current_target(&self) -> Option<CharacterRef> {
        self.targets.get(self.current_index).copied()
    }

    /// Unscaled time at which the next manual switch is accepted.
    pub fn next_switch_allowed_at(&self) -> f64 {
        self.next_switch_allowed_at
    }

    /// Pose the player is held at.
    pub fn frozen_pose(&self) -> Pose {
        self.frozen_pose
    }

    pub fn noise(&self) -> NoiseState {
        self.noise
    }

    /// Cursor state to restore when the session ends.
    pub fn saved_cursor(&self) -> CursorState {
        self.saved_cursor
    }
}
