//! Render Module
//!
//! Screen-space overlay rendering: the [`OverlaySurface`] drawing contract,
//! the procedural noise texture, and a wgpu render pass that implements the
//! contract on the GPU.

pub mod noise_texture;
pub mod overlay_pass;
pub mod overlay_surface;
pub mod render_pass;

pub use noise_texture::{
    NoiseParams, NoiseTexture, Rgba8, NOISE_TEXTURE_SIZE, perlin_noise, stripe_factor,
};
pub use overlay_pass::{OverlayBatch, OverlayPass, OverlayVertex, MAX_OVERLAY_QUADS};
pub use overlay_surface::{DrawCall, OverlaySurface, RecordingSurface, Rect};
pub use render_pass::{FrameContext, RenderContext, RenderPass, RenderPassPriority};
