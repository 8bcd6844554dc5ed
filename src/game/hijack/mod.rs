//! Spectator Hijack
//!
//! Middle mouse detaches the camera from the player and hands it to another
//! character in the scene. A/D cycle through the candidates, middle mouse or
//! Escape give the camera back. The player is frozen in place for the whole
//! session and a red "hacking" noise overlay is drawn on top of the frame.

mod controller;
mod error;
mod overlay;
mod pet_filter;
mod session;
mod targeting;

pub use controller::{HijackState, SpectatorHijackController, StopReason};
pub use error::HijackError;
pub use overlay::{OverlayQuad, overlay_quads};
pub use pet_filter::{is_pet, is_pet_name, root_name, root_node};
pub use session::{HijackSession, NoiseState, SwitchDirection};
pub use targeting::{find_best_index, is_valid_target, rebuild_target_list, score_candidate, wrap_index};
