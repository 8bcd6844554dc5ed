//! Host Module
//!
//! Contracts between the mod and the game that hosts it. The host owns every
//! character, the camera, the cursor and the clock; the mod only ever talks to
//! them through the traits in this module.
//!
//! Handles (`CharacterRef`, `NodeRef`) are weak: the host may destroy the
//! entity behind one at any frame boundary. Nothing dereferences a handle
//! directly, every query goes back through [`Scene`] and answers `None` or
//! `false` for an entity that no longer exists.
//!
//! # Example
//!
//! ```rust,ignore
//! use spectator_hijack_engine::host::{FrameTime, HostFrame};
//!
//! let mut frame = HostFrame {
//!     scene: &mut scene,
//!     camera: Some(&mut camera),
//!     cursor: &mut cursor,
//!     input: &input,
//!     time: FrameTime::new(now, delta),
//! };
//! controller.tick(&mut frame);
//! ```

pub mod sandbox;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::{CursorState, InputState};

pub use sandbox::{SandboxBody, SandboxCamera, SandboxCharacter, SandboxCursor, SandboxNode, SandboxScene};

/// Direction an unrotated character faces (engine convention: -Z forward).
pub const CHARACTER_FORWARD: Vec3 = Vec3::NEG_Z;

/// Opaque handle to a character entity owned by the host.
///
/// Equality is identity: two handles are equal iff they name the same entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterRef(u64);

impl CharacterRef {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Opaque handle to a node in the host's transform hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(u64);

impl NodeRef {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// World-space position and orientation of a character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    #[serde(default = "identity_rotation")]
    pub rotation: Quat,
}

fn identity_rotation() -> Quat {
    Quat::IDENTITY
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` turned `yaw` radians around +Y.
    pub fn from_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw),
        }
    }

    /// Unit vector the character is facing.
    pub fn forward(&self) -> Vec3 {
        self.rotation * CHARACTER_FORWARD
    }
}

/// Physics body attached to a character.
pub trait RigidBody {
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn set_angular_velocity(&mut self, velocity: Vec3);
}

/// Character registry plus the per-entity queries the mod needs.
pub trait Scene {
    /// The character the local player controls, if one exists right now.
    fn player(&self) -> Option<CharacterRef>;

    /// Every character entity currently in the scene, in host enumeration order.
    fn characters(&self) -> Vec<CharacterRef>;

    /// Whether the entity behind `character` still exists.
    fn is_alive(&self, character: CharacterRef) -> bool;

    /// Whether the entity and all of its ancestors are enabled.
    fn is_active_in_hierarchy(&self, character: CharacterRef) -> bool;

    /// Human-readable name used in log lines.
    fn display_name(&self, character: CharacterRef) -> String;

    /// Transform node the character is attached to.
    fn transform_node(&self, character: CharacterRef) -> Option<NodeRef>;

    /// Parent of `node` in the transform hierarchy, `None` at the root.
    fn parent(&self, node: NodeRef) -> Option<NodeRef>;

    /// Name of a transform node.
    fn node_name(&self, node: NodeRef) -> Option<&str>;

    fn pose(&self, character: CharacterRef) -> Option<Pose>;

    fn forward(&self, character: CharacterRef) -> Option<Vec3> {
        self.pose(character).map(|pose| pose.forward())
    }

    fn set_pose(&mut self, character: CharacterRef, pose: Pose);

    /// Physics body of the character, when it has one.
    fn rigid_body(&mut self, character: CharacterRef) -> Option<&mut dyn RigidBody>;
}

/// The game's camera singleton.
pub trait CameraRig {
    /// Make the camera follow `target`.
    fn set_target(&mut self, target: CharacterRef);
}

/// Cursor visibility and lock state of the pointing device.
pub trait CursorDevice {
    fn cursor_state(&self) -> CursorState;
    fn set_cursor_state(&mut self, state: CursorState);
}

/// Unscaled frame clock. Keeps running when gameplay time is paused or slowed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since startup
    pub now: f64,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameTime {
    pub fn new(now: f64, delta: f32) -> Self {
        Self { now, delta }
    }
}

/// Everything the controller may touch during one frame.
pub struct HostFrame<'a> {
    pub scene: &'a mut dyn Scene,
    /// `None` while the camera singleton does not exist (menus, loading).
    pub camera: Option<&'a mut dyn CameraRig>,
    pub cursor: &'a mut dyn CursorDevice,
    pub input: &'a InputState,
    pub time: FrameTime,
}
