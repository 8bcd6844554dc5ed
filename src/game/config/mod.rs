//! Config Module
//!
//! Centralized tuning for the spectator hijack. Every value is a hardcoded
//! default; nothing here is read from disk.

pub mod hijack_config;
pub mod input_config;

pub use hijack_config::{HijackConfig, OverlayConfig};
pub use input_config::HijackBindings;
