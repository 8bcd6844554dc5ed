//! Game Module
//!
//! The hijack mod itself, built on top of the engine's host contracts.

pub mod config;
pub mod hijack;
pub mod mod_entry;

pub use config::{HijackBindings, HijackConfig, OverlayConfig};
pub use hijack::{HijackError, HijackState, SpectatorHijackController, StopReason};
pub use mod_entry::{ModBehaviour, ModEntryPoint, ModRuntime};
