//! Pet Filter
//!
//! Companion animals are characters too, but watching them is pointless.
//! They are recognised purely by the name of the root node of their
//! hierarchy. The match is a plain case-insensitive substring test, so
//! unrelated names that happen to contain "pet" ("Carpet", "Trumpeter") are
//! filtered out as well. Known limitation; the host gives us nothing more
//! structural to go on.

use crate::host::{CharacterRef, NodeRef, Scene};

/// Lower-case fragments that mark a root node as a pet.
const PET_MARKERS: [&str; 2] = ["pet_template", "pet"];

/// Whether a root-node name identifies a pet.
pub fn is_pet_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let lower = name.to_lowercase();
    PET_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Topmost node of the hierarchy the character is attached to.
pub fn root_node(scene: &dyn Scene, character: CharacterRef) -> Option<NodeRef> {
    let mut node = scene.transform_node(character)?;
    let mut visited = vec![node];
    while let Some(parent) = scene.parent(node) {
        // A broken host hierarchy could loop; stop at the first repeat
        if visited.contains(&parent) {
            break;
        }
        visited.push(parent);
        node = parent;
    }
    Some(node)
}

/// Name of the character's root node.
pub fn root_name(scene: &dyn Scene, character: CharacterRef) -> Option<String> {
    let root = root_node(scene, character)?;
    scene.node_name(root).map(str::to_owned)
}

/// Whether the character is a pet. Characters without a transform are not.
pub fn is_pet(scene: &dyn Scene, character: CharacterRef) -> bool {
    root_name(scene, character).is_some_and(|name| is_pet_name(&name))
}
