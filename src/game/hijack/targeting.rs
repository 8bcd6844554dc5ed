//! Target Selection
//!
//! Which characters can be observed, which one to start on, and how the
//! index moves when the player cycles through them.

use glam::Vec3;

use super::pet_filter::is_pet;
use super::session::SwitchDirection;
use crate::game::config::HijackConfig;
use crate::host::{CharacterRef, Scene};

/// A character can be observed while it exists, is enabled, is not a pet,
/// and is not the player.
pub fn is_valid_target(scene: &dyn Scene, character: CharacterRef, player: Option<CharacterRef>) -> bool {
    Some(character) != player
        && scene.is_alive(character)
        && scene.is_active_in_hierarchy(character)
        && !is_pet(scene, character)
}

/// Every observable character in the scene, in the host's enumeration order.
pub fn rebuild_target_list(scene: &dyn Scene, player: CharacterRef) -> Vec<CharacterRef> {
    scene
        .characters()
        .into_iter()
        .filter(|&c| is_valid_target(scene, c, Some(player)))
        .collect()
}

/// Score a candidate at `position` as seen from `origin` facing `forward`.
///
/// Returns `None` outside the configured distance band. Inside it, targets
/// straight ahead score up to `facing_weight`, targets behind down to
/// `-facing_weight`, minus `distance_weight` per unit of distance.
pub fn score_candidate(config: &HijackConfig, origin: Vec3, forward: Vec3, position: Vec3) -> Option<f32> {
    let offset = position - origin;
    let distance = offset.length();
    if distance < config.min_target_distance || distance > config.max_target_distance {
        return None;
    }

    let direction = offset / distance;
    Some(forward.dot(direction) * config.facing_weight - distance * config.distance_weight)
}

/// Index of the best-scoring target, or `None` when nothing is in range.
///
/// Ties keep the earliest candidate.
pub fn find_best_index(
    config: &HijackConfig,
    scene: &dyn Scene,
    player: CharacterRef,
    targets: &[CharacterRef],
) -> Option<usize> {
    let origin = scene.pose(player)?.position;
    let forward = scene.forward(player)?;

    let mut best: Option<(usize, f32)> = None;
    for (index, &target) in targets.iter().enumerate() {
        let Some(pose) = scene.pose(target) else {
            continue;
        };
        let Some(score) = score_candidate(config, origin, forward, pose.position) else {
            continue;
        };
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

/// Step `index` one place in `direction`, wrapping at both ends.
pub fn wrap_index(index: usize, len: usize, direction: SwitchDirection) -> usize {
    if len == 0 {
        return 0;
    }
    match direction {
        SwitchDirection::Next => (index + 1) % len,
        SwitchDirection::Previous => (index.min(len) + len - 1) % len,
    }
}
