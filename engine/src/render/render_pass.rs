//! Render Pass Abstraction
//!
//! The seam between the host renderer and the overlay. The host owns the
//! device, the swapchain and the command encoder; anything the mod draws on
//! the GPU plugs in as a [`RenderPass`] and is run after the host's own
//! passes, in priority order.

use wgpu::{CommandEncoder, Device, Queue, TextureView};

/// Render pass execution priority (lower = earlier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderPassPriority {
    /// Main geometry drawn by the host
    Geometry = 100,
    /// Post-processing effects
    PostProcess = 300,
    /// Screen-space overlays, always on top
    UI = 400,
}

/// GPU handles the host lends to a pass.
pub struct RenderContext<'a> {
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub surface_format: wgpu::TextureFormat,
    pub width: u32,
    pub height: u32,
}

/// Per-frame target the pass records into.
pub struct FrameContext<'a> {
    pub encoder: &'a mut CommandEncoder,
    /// Finished scene color; overlays load it and draw on top
    pub color_view: &'a TextureView,
    /// Unscaled seconds since startup
    pub time: f32,
    pub delta_time: f32,
}

pub trait RenderPass {
    /// Unique name for this pass (for debugging/profiling)
    fn name(&self) -> &'static str;

    fn priority(&self) -> RenderPassPriority;

    /// Whether the pass has anything to draw this frame
    fn is_enabled(&self) -> bool {
        true
    }

    fn set_enabled(&mut self, _enabled: bool) {}

    /// Create pipelines and buffers. Called once before the first frame.
    fn initialize(&mut self, ctx: &RenderContext);

    fn resize(&mut self, _ctx: &RenderContext, _width: u32, _height: u32) {}

    /// Upload per-frame data (called each frame before render)
    fn update(&mut self, _ctx: &RenderContext, _delta_time: f32) {}

    fn render(&self, ctx: &RenderContext, frame: &mut FrameContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlays_sort_last() {
        let mut order = vec![
            RenderPassPriority::UI,
            RenderPassPriority::Geometry,
            RenderPassPriority::PostProcess,
        ];
        order.sort();
        assert_eq!(
            order,
            vec![
                RenderPassPriority::Geometry,
                RenderPassPriority::PostProcess,
                RenderPassPriority::UI,
            ]
        );
    }
}
