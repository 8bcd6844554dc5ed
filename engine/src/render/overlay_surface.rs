//! Overlay Surface
//!
//! Immediate-mode 2D drawing contract used by full-screen effects. Screen
//! coordinates are in pixels with the origin at the top-left corner. UV
//! rectangles are in normalized texture space; values outside `[0, 1)` tile
//! when the texture wraps.

use super::noise_texture::NoiseTexture;

/// Axis-aligned rectangle (pixels for screen rects, normalized for UVs).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }
}

/// Something the overlay can be drawn onto.
pub trait OverlaySurface {
    /// Screen width and height in pixels.
    fn screen_size(&self) -> (f32, f32);

    /// Draw `texture` into `rect`, sampling `uv`, multiplied by `tint` (RGBA).
    fn draw_textured_rect(&mut self, rect: Rect, texture: &NoiseTexture, uv: Rect, tint: [f32; 4]);
}

/// One recorded call to [`OverlaySurface::draw_textured_rect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub rect: Rect,
    pub uv: Rect,
    pub tint: [f32; 4],
    pub texture_size: (u32, u32),
}

/// Surface that only records what would have been drawn.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl OverlaySurface for RecordingSurface {
    fn screen_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn draw_textured_rect(&mut self, rect: Rect, texture: &NoiseTexture, uv: Rect, tint: [f32; 4]) {
        self.calls.push(DrawCall {
            rect,
            uv,
            tint,
            texture_size: (texture.width(), texture.height()),
        });
    }
}
