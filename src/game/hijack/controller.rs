//! Spectator Hijack Controller
//!
//! Idle/Active state machine driven once per frame by [`tick`] and, while
//! active, drawn by [`render`]. While active the player is pinned to the pose
//! it had when the hijack began, the camera follows another character, and
//! a red noise overlay is drawn over the screen.
//!
//! [`tick`]: SpectatorHijackController::tick
//! [`render`]: SpectatorHijackController::render

use std::fmt;

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::error::HijackError;
use super::overlay::overlay_quads;
use super::session::{HijackSession, NoiseState, SwitchDirection};
use super::targeting::{find_best_index, is_valid_target, rebuild_target_list, wrap_index};
use crate::game::config::{HijackBindings, HijackConfig, OverlayConfig};
use crate::host::{CharacterRef, HostFrame, Pose, Scene};
use crate::input::CursorState;
use crate::render::{NoiseTexture, OverlaySurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HijackState {
    Idle,
    Active,
}

/// Why a hijack ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Engage input pressed again
    UserToggle,
    /// Cancel input pressed
    Cancelled,
    /// The player character disappeared
    PlayerLost,
    /// Every observable character went away
    TargetsExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            StopReason::UserToggle => "toggled off",
            StopReason::Cancelled => "cancelled",
            StopReason::PlayerLost => "player lost",
            StopReason::TargetsExhausted => "no targets left",
        };
        f.write_str(reason)
    }
}

pub struct SpectatorHijackController {
    config: HijackConfig,
    overlay: OverlayConfig,
    bindings: HijackBindings,
    session: Option<HijackSession>,
    /// Generated on first render, then kept for the controller's lifetime
    noise_texture: Option<NoiseTexture>,
    rng: StdRng,
}

impl Default for SpectatorHijackController {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectatorHijackController {
    pub fn new() -> Self {
        Self::with_rng(
            HijackConfig::default(),
            OverlayConfig::default(),
            HijackBindings::default(),
            StdRng::from_entropy(),
        )
    }

    /// Deterministic scanline jumps and noise texture.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(
            HijackConfig::default(),
            OverlayConfig::default(),
            HijackBindings::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(config: HijackConfig, overlay: OverlayConfig, bindings: HijackBindings, rng: StdRng) -> Self {
        Self {
            config,
            overlay,
            bindings,
            session: None,
            noise_texture: None,
            rng,
        }
    }

    pub fn state(&self) -> HijackState {
        if self.session.is_some() {
            HijackState::Active
        } else {
            HijackState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&HijackSession> {
        self.session.as_ref()
    }

    pub fn current_target(&self) -> Option<CharacterRef> {
        self.session.as_ref().and_then(HijackSession::current_target)
    }

    /// The noise texture, if it has been generated yet.
    pub fn cached_noise_texture(&self) -> Option<&NoiseTexture> {
        self.noise_texture.as_ref()
    }

    /// Per-frame update. Call exactly once per host frame, before the input
    /// edges for the frame are cleared.
    pub fn tick(&mut self, frame: &mut HostFrame<'_>) {
        let player = frame.scene.player();

        let Some((session_player, frozen_pose)) = self.session.as_ref().map(|s| (s.player, s.frozen_pose)) else {
            if player.is_some() && self.bindings.engage_pressed(frame.input) {
                if let Err(err) = self.start_hijack(frame) {
                    warn!("Hijack not started: {}", err);
                }
            }
            return;
        };

        if player != Some(session_player) {
            self.stop_hijack(frame, StopReason::PlayerLost);
            return;
        }
        if self.bindings.engage_pressed(frame.input) {
            self.stop_hijack(frame, StopReason::UserToggle);
            return;
        }
        if self.bindings.cancel_pressed(frame.input) {
            self.stop_hijack(frame, StopReason::Cancelled);
            return;
        }

        freeze(frame.scene, session_player, frozen_pose);

        if !self.revalidate_target(frame.scene) {
            self.stop_hijack(frame, StopReason::TargetsExhausted);
            return;
        }

        // A switch made this frame reaches the camera on the next tick
        if let (Some(target), Some(camera)) = (self.current_target(), frame.camera.as_deref_mut()) {
            camera.set_target(target);
        }

        let now = frame.time.now;
        let cooldown_elapsed = self
            .session
            .as_ref()
            .is_some_and(|s| now >= s.next_switch_allowed_at);
        if cooldown_elapsed {
            let direction = if self.bindings.next_pressed(frame.input) {
                Some(SwitchDirection::Next)
            } else if self.bindings.previous_pressed(frame.input) {
                Some(SwitchDirection::Previous)
            } else {
                None
            };
            if let Some(direction) = direction {
                if let Some(target) = self.switch_target(direction, now) {
                    info!("Now observing {}", frame.scene.display_name(target));
                }
            }
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.noise.advance(&self.overlay, frame.time, &mut self.rng);
    }

    /// Prune invalid targets when the current one has gone bad. Returns
    /// `false` when nothing observable is left.
    fn revalidate_target(&mut self, scene: &dyn Scene) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let player = Some(session.player);

        let current_ok = session
            .current_target()
            .is_some_and(|target| is_valid_target(scene, target, player));
        if current_ok {
            return true;
        }

        session.targets.retain(|&target| is_valid_target(scene, target, player));
        if session.targets.is_empty() {
            return false;
        }
        if session.current_index >= session.targets.len() {
            session.current_index = 0;
        }
        if let Some(target) = session.current_target() {
            debug!("Target lost, switched to {}", scene.display_name(target));
        }
        true
    }

    /// Enter observation mode.
    ///
    /// Fails without touching any state when the camera, the player or every
    /// candidate target is missing. Does nothing when already active.
    pub fn start_hijack(&mut self, frame: &mut HostFrame<'_>) -> Result<(), HijackError> {
        if self.session.is_some() {
            return Ok(());
        }
        if frame.camera.is_none() {
            return Err(HijackError::NoCamera);
        }
        let player = frame.scene.player().ok_or(HijackError::NoPlayer)?;
        let frozen_pose = frame.scene.pose(player).ok_or(HijackError::NoPlayer)?;

        let targets = rebuild_target_list(&*frame.scene, player);
        if targets.is_empty() {
            return Err(HijackError::NoTargets);
        }
        // Nothing in range: still start, on the first candidate
        let current_index = find_best_index(&self.config, &*frame.scene, player, &targets).unwrap_or(0);
        let target = targets[current_index];

        let saved_cursor = frame.cursor.cursor_state();
        frame.cursor.set_cursor_state(CursorState::captured());

        self.session = Some(HijackSession {
            player,
            targets,
            current_index,
            next_switch_allowed_at: frame.time.now + self.config.switch_cooldown,
            frozen_pose,
            noise: NoiseState::reset(&self.overlay),
            saved_cursor,
        });

        freeze(frame.scene, player, frozen_pose);
        if let Some(camera) = frame.camera.as_deref_mut() {
            camera.set_target(target);
        }

        info!("Hijack started, observing {}", frame.scene.display_name(target));
        Ok(())
    }

    /// Leave observation mode and give the camera and cursor back.
    pub fn stop_hijack(&mut self, frame: &mut HostFrame<'_>, reason: StopReason) {
        let Some(session) = self.session.take() else {
            return;
        };

        if let (Some(player), Some(camera)) = (frame.scene.player(), frame.camera.as_deref_mut()) {
            camera.set_target(player);
        }
        frame.cursor.set_cursor_state(session.saved_cursor);

        info!("Hijack stopped: {}", reason);
    }

    /// Move to the neighbouring target and restart the switch cooldown.
    ///
    /// Ignores the cooldown itself; [`tick`](Self::tick) gates on it.
    pub fn switch_target(&mut self, direction: SwitchDirection, now: f64) -> Option<CharacterRef> {
        let session = self.session.as_mut()?;
        if session.targets.is_empty() {
            return None;
        }
        session.current_index = wrap_index(session.current_index, session.targets.len(), direction);
        session.next_switch_allowed_at = now + self.config.switch_cooldown;
        session.current_target()
    }

    /// Draw the hacking overlay. Does nothing while idle.
    pub fn render(&mut self, surface: &mut dyn OverlaySurface) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let size = self.overlay.noise.size;
        let quads = overlay_quads(&self.overlay, &session.noise, surface.screen_size(), (size, size));

        let texture = self.noise_texture();
        for quad in quads {
            surface.draw_textured_rect(quad.rect, texture, quad.uv, quad.tint);
        }
    }

    /// The noise texture, generated on first call.
    pub fn noise_texture(&mut self) -> &NoiseTexture {
        let params = self.overlay.noise;
        let rng = &mut self.rng;
        self.noise_texture
            .get_or_insert_with(|| NoiseTexture::generate(&params, rng))
    }
}

/// Pin the player to `pose` and kill any motion.
fn freeze(scene: &mut dyn Scene, player: CharacterRef, pose: Pose) {
    scene.set_pose(player, pose);
    if let Some(body) = scene.rigid_body(player) {
        body.set_linear_velocity(Vec3::ZERO);
        body.set_angular_velocity(Vec3::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FrameTime, SandboxCamera, SandboxCursor, SandboxScene};
    use crate::input::{InputState, KeyCode, MouseButton};
    use crate::render::RecordingSurface;

    struct Rig {
        scene: SandboxScene,
        camera: SandboxCamera,
        cursor: SandboxCursor,
        player: CharacterRef,
    }

    impl Rig {
        fn new() -> Self {
            let mut scene = SandboxScene::new();
            let player = scene.add_character("Player", Pose::default());
            scene.set_player(Some(player));
            Self {
                scene,
                camera: SandboxCamera::default(),
                cursor: SandboxCursor::default(),
                player,
            }
        }

        fn tick(&mut self, controller: &mut SpectatorHijackController, input: &InputState, now: f64) {
            let mut frame = HostFrame {
                scene: &mut self.scene,
                camera: Some(&mut self.camera),
                cursor: &mut self.cursor,
                input,
                time: FrameTime::new(now, 0.016),
            };
            controller.tick(&mut frame);
        }
    }

    fn engage() -> InputState {
        let mut input = InputState::new();
        input.click(MouseButton::Middle);
        input
    }

    #[test]
    fn test_starts_idle() {
        let controller = SpectatorHijackController::with_seed(1);
        assert_eq!(controller.state(), HijackState::Idle);
        assert!(controller.current_target().is_none());
        assert!(controller.cached_noise_texture().is_none());
    }

    #[test]
    fn test_engage_starts_on_frontal_target() {
        let mut rig = Rig::new();
        let _behind = rig.scene.add_character("Behind", Pose::from_yaw(Vec3::new(0.0, 0.0, 5.0), 0.0));
        let ahead = rig.scene.add_character("Ahead", Pose::from_yaw(Vec3::new(0.0, 0.0, -5.0), 0.0));

        let mut controller = SpectatorHijackController::with_seed(1);
        rig.tick(&mut controller, &engage(), 1.0);

        assert!(controller.is_active());
        assert_eq!(controller.current_target(), Some(ahead));
        assert_eq!(rig.camera.target, Some(ahead));
        assert!(rig.cursor.state.is_captured());

        let session = controller.session().unwrap();
        assert!((session.next_switch_allowed_at() - 1.15).abs() < 1e-9);
        assert_eq!(session.noise().alpha, 0.25);
    }

    #[test]
    fn test_start_without_camera_fails() {
        let mut rig = Rig::new();
        rig.scene.add_character("Guard", Pose::from_yaw(Vec3::new(0.0, 0.0, -5.0), 0.0));
        let input = engage();
        let mut controller = SpectatorHijackController::with_seed(1);

        let mut frame = HostFrame {
            scene: &mut rig.scene,
            camera: None,
            cursor: &mut rig.cursor,
            input: &input,
            time: FrameTime::new(0.0, 0.016),
        };
        assert_eq!(controller.start_hijack(&mut frame), Err(HijackError::NoCamera));
        assert!(!controller.is_active());
    }

    #[test]
    fn test_all_out_of_range_starts_on_first() {
        let mut rig = Rig::new();
        let far = rig.scene.add_character("Far", Pose::from_yaw(Vec3::new(0.0, 0.0, -200.0), 0.0));
        rig.scene.add_character("Farther", Pose::from_yaw(Vec3::new(0.0, 0.0, -300.0), 0.0));

        let mut controller = SpectatorHijackController::with_seed(1);
        rig.tick(&mut controller, &engage(), 0.0);

        assert_eq!(controller.current_target(), Some(far));
        assert_eq!(controller.session().unwrap().current_index(), 0);
    }

    #[test]
    fn test_camera_returns_to_player_on_cancel() {
        let mut rig = Rig::new();
        rig.scene.add_character("Guard", Pose::from_yaw(Vec3::new(0.0, 0.0, -5.0), 0.0));
        let mut controller = SpectatorHijackController::with_seed(1);
        rig.tick(&mut controller, &engage(), 0.0);

        let mut cancel = InputState::new();
        cancel.tap_key(KeyCode::Escape);
        rig.tick(&mut controller, &cancel, 0.1);

        assert_eq!(controller.state(), HijackState::Idle);
        assert_eq!(rig.camera.target, Some(rig.player));
        assert_eq!(rig.cursor.state, CursorState::released());
    }

    #[test]
    fn test_switch_ignores_cooldown_when_called_directly() {
        let mut rig = Rig::new();
        let a = rig.scene.add_character("A", Pose::from_yaw(Vec3::new(0.0, 0.0, -5.0), 0.0));
        let b = rig.scene.add_character("B", Pose::from_yaw(Vec3::new(0.0, 0.0, -50.0), 0.0));
        let mut controller = SpectatorHijackController::with_seed(1);
        rig.tick(&mut controller, &engage(), 0.0);
        assert_eq!(controller.current_target(), Some(a));

        assert_eq!(controller.switch_target(SwitchDirection::Next, 0.01), Some(b));
        assert_eq!(controller.switch_target(SwitchDirection::Next, 0.02), Some(a));
        assert_eq!(controller.session().unwrap().next_switch_allowed_at(), 0.02 + 0.15);
    }

    #[test]
    fn test_switch_while_idle_is_none() {
        let mut controller = SpectatorHijackController::with_seed(1);
        assert_eq!(controller.switch_target(SwitchDirection::Next, 0.0), None);
    }

    #[test]
    fn test_render_draws_two_quads_only_when_active() {
        let mut rig = Rig::new();
        rig.scene.add_character("Guard", Pose::from_yaw(Vec3::new(0.0, 0.0, -5.0), 0.0));
        let mut controller = SpectatorHijackController::with_seed(1);
        let mut surface = RecordingSurface::new(800.0, 600.0);

        controller.render(&mut surface);
        assert!(surface.calls.is_empty());
        assert!(controller.cached_noise_texture().is_none());

        rig.tick(&mut controller, &engage(), 0.0);
        controller.render(&mut surface);
        assert_eq!(surface.calls.len(), 2);
        assert_eq!(surface.calls[0].texture_size, (128, 128));
        assert!(controller.cached_noise_texture().is_some());
    }

    #[test]
    fn test_noise_texture_generated_once() {
        let mut controller = SpectatorHijackController::with_seed(9);
        let first = controller.noise_texture().clone();
        let second = controller.noise_texture().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(StopReason::UserToggle.to_string(), "toggled off");
        assert_eq!(StopReason::TargetsExhausted.to_string(), "no targets left");
    }
}
