//! In-memory host used by the simulator and the test suite.
//!
//! Scenes can be built in code or deserialized from JSON:
//!
//! ```json
//! {
//!   "player": 1,
//!   "nodes": [{ "id": 1, "name": "Player" }],
//!   "characters": [
//!     { "id": 1, "name": "Player", "node": 1, "pose": { "position": [0, 0, 0] } }
//!   ]
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{CameraRig, CharacterRef, CursorDevice, NodeRef, Pose, RigidBody, Scene};
use crate::input::CursorState;

fn enabled() -> bool {
    true
}

/// Transform node in the sandbox hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxNode {
    pub id: NodeRef,
    pub name: String,
    #[serde(default)]
    pub parent: Option<NodeRef>,
    #[serde(default = "enabled")]
    pub active: bool,
}

/// Velocity-only physics body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxBody {
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

impl RigidBody for SandboxBody {
    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.linear_velocity = velocity;
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.angular_velocity = velocity;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxCharacter {
    pub id: CharacterRef,
    pub name: String,
    pub node: NodeRef,
    #[serde(default)]
    pub pose: Pose,
    #[serde(default = "enabled")]
    pub active: bool,
    #[serde(default)]
    pub body: Option<SandboxBody>,
}

/// A scene held entirely in memory. Characters are enumerated in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SandboxScene {
    #[serde(default)]
    pub player: Option<CharacterRef>,
    #[serde(default)]
    pub nodes: Vec<SandboxNode>,
    #[serde(default)]
    pub characters: Vec<SandboxCharacter>,
    #[serde(skip)]
    next_id: u64,
}

impl SandboxScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut scene: Self = serde_json::from_str(json)?;
        scene.next_id = scene
            .nodes
            .iter()
            .map(|n| n.id.raw())
            .chain(scene.characters.iter().map(|c| c.id.raw()))
            .max()
            .unwrap_or(0);
        Ok(scene)
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Add a root-level node and return its handle.
    pub fn add_node(&mut self, name: &str, parent: Option<NodeRef>) -> NodeRef {
        let id = NodeRef::new(self.allocate_id());
        self.nodes.push(SandboxNode {
            id,
            name: name.to_string(),
            parent,
            active: true,
        });
        id
    }

    /// Add a character on its own root node named after it, with a physics body.
    pub fn add_character(&mut self, name: &str, pose: Pose) -> CharacterRef {
        let node = self.add_node(name, None);
        self.add_character_on(name, node, pose)
    }

    /// Add a character whose node is a child of `parent`.
    pub fn add_character_under(&mut self, name: &str, parent: NodeRef, pose: Pose) -> CharacterRef {
        let node = self.add_node(name, Some(parent));
        self.add_character_on(name, node, pose)
    }

    fn add_character_on(&mut self, name: &str, node: NodeRef, pose: Pose) -> CharacterRef {
        let id = CharacterRef::new(self.allocate_id());
        self.characters.push(SandboxCharacter {
            id,
            name: name.to_string(),
            node,
            pose,
            active: true,
            body: Some(SandboxBody::default()),
        });
        id
    }

    pub fn set_player(&mut self, player: Option<CharacterRef>) {
        self.player = player;
    }

    pub fn character(&self, id: CharacterRef) -> Option<&SandboxCharacter> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn character_mut(&mut self, id: CharacterRef) -> Option<&mut SandboxCharacter> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    pub fn node(&self, id: NodeRef) -> Option<&SandboxNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeRef) -> Option<&mut SandboxNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn set_active(&mut self, id: CharacterRef, active: bool) {
        if let Some(character) = self.character_mut(id) {
            character.active = active;
        }
    }

    /// Remove a character. Handles to it stay around but stop resolving.
    pub fn destroy(&mut self, id: CharacterRef) {
        self.characters.retain(|c| c.id != id);
        if self.player == Some(id) {
            self.player = None;
        }
    }

    /// Rename the root of the hierarchy the character hangs under.
    pub fn rename_root(&mut self, id: CharacterRef, name: &str) {
        let Some(mut node) = self.character(id).map(|c| c.node) else {
            return;
        };
        let mut visited = vec![node];
        while let Some(parent) = self.node(node).and_then(|n| n.parent) {
            if visited.contains(&parent) {
                break;
            }
            visited.push(parent);
            node = parent;
        }
        if let Some(root) = self.node_mut(node) {
            root.name = name.to_string();
        }
    }

    /// Move a character without going through the physics body.
    pub fn teleport(&mut self, id: CharacterRef, position: Vec3) {
        if let Some(character) = self.character_mut(id) {
            character.pose.position = position;
        }
    }

    pub fn body(&self, id: CharacterRef) -> Option<SandboxBody> {
        self.character(id).and_then(|c| c.body)
    }

    fn node_chain_active(&self, mut node: Option<NodeRef>) -> bool {
        // Bounded walk so a malformed parent cycle cannot hang the frame
        for _ in 0..=self.nodes.len() {
            let Some(id) = node else {
                return true;
            };
            match self.node(id) {
                Some(n) if n.active => node = n.parent,
                _ => return false,
            }
        }
        false
    }
}

impl Scene for SandboxScene {
    fn player(&self) -> Option<CharacterRef> {
        self.player.filter(|p| self.is_alive(*p))
    }

    fn characters(&self) -> Vec<CharacterRef> {
        self.characters.iter().map(|c| c.id).collect()
    }

    fn is_alive(&self, character: CharacterRef) -> bool {
        self.character(character).is_some()
    }

    fn is_active_in_hierarchy(&self, character: CharacterRef) -> bool {
        match self.character(character) {
            Some(c) => c.active && self.node_chain_active(Some(c.node)),
            None => false,
        }
    }

    fn display_name(&self, character: CharacterRef) -> String {
        self.character(character)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("<destroyed #{}>", character.raw()))
    }

    fn transform_node(&self, character: CharacterRef) -> Option<NodeRef> {
        self.character(character).map(|c| c.node)
    }

    fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node).and_then(|n| n.parent)
    }

    fn node_name(&self, node: NodeRef) -> Option<&str> {
        self.node(node).map(|n| n.name.as_str())
    }

    fn pose(&self, character: CharacterRef) -> Option<Pose> {
        self.character(character).map(|c| c.pose)
    }

    fn set_pose(&mut self, character: CharacterRef, pose: Pose) {
        if let Some(c) = self.character_mut(character) {
            c.pose = pose;
        }
    }

    fn rigid_body(&mut self, character: CharacterRef) -> Option<&mut dyn RigidBody> {
        self.character_mut(character)
            .and_then(|c| c.body.as_mut())
            .map(|body| body as &mut dyn RigidBody)
    }
}

/// Camera that just remembers what it was told to follow.
#[derive(Debug, Clone, Default)]
pub struct SandboxCamera {
    pub target: Option<CharacterRef>,
    /// Number of `set_target` calls received
    pub retargets: usize,
}

impl CameraRig for SandboxCamera {
    fn set_target(&mut self, target: CharacterRef) {
        self.target = Some(target);
        self.retargets += 1;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SandboxCursor {
    pub state: CursorState,
}

impl SandboxCursor {
    pub fn new(state: CursorState) -> Self {
        Self { state }
    }
}

impl CursorDevice for SandboxCursor {
    fn cursor_state(&self) -> CursorState {
        self.state
    }

    fn set_cursor_state(&mut self, state: CursorState) {
        self.state = state;
    }
}
