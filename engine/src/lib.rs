//! Spectator Hijack Engine Library
//!
//! A camera-hijack mod for a third-person game: the player hands the camera
//! to other characters in the scene while their own character stays frozen,
//! with a procedural noise overlay drawn on top.
//!
//! # Modules
//!
//! - [`host`] - Traits for the game that hosts the mod, plus an in-memory sandbox host
//! - [`input`] - Platform-agnostic keyboard, mouse and cursor state
//! - [`render`] - Overlay drawing contract, noise texture and the wgpu overlay pass
//! - [`logging`] - `tracing` subscriber setup for binaries
//! - [`game`] - The hijack controller, its tuning and the mod entry point
//!
//! # Example
//!
//! ```ignore
//! use spectator_hijack_engine::game::{ModBehaviour, ModEntryPoint, ModRuntime};
//! use spectator_hijack_engine::host::{FrameTime, HostFrame};
//!
//! let mut runtime = ModRuntime::new();
//! ModEntryPoint::new().on_after_setup(&mut runtime);
//!
//! // Every frame
//! runtime.update(&mut HostFrame {
//!     scene: &mut scene,
//!     camera: Some(&mut camera),
//!     cursor: &mut cursor,
//!     input: &input,
//!     time: FrameTime::new(now, delta),
//! });
//! runtime.draw(&mut overlay_pass);
//! input.end_frame();
//! ```

pub mod host;
pub mod input;
pub mod logging;
pub mod render;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used input types
pub use input::{InputState, KeyCode, KeyboardState, MouseButton, MouseState};
// Re-export host contracts
pub use host::{CameraRig, CharacterRef, CursorDevice, FrameTime, HostFrame, Pose, Scene};
