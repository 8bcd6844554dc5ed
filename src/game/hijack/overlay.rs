//! Hacking Overlay
//!
//! Per-frame animation of the red noise layer and the geometry of the two
//! quads drawn for it: a full-screen scrolling noise layer and a thin,
//! brighter scanline band that jumps to a random height every few frames.

use rand::Rng;

use super::session::NoiseState;
use crate::game::config::OverlayConfig;
use crate::host::FrameTime;
use crate::render::Rect;

impl NoiseState {
    /// State a fresh hijack starts from.
    pub fn reset(config: &OverlayConfig) -> Self {
        Self {
            alpha: config.reset_alpha,
            scroll_x: 0.0,
            scroll_y: 0.0,
            scanline_y: config.reset_scanline,
            scanline_timer: 0.0,
        }
    }

    /// Advance the animation by one frame of unscaled time.
    pub fn advance<R: Rng + ?Sized>(&mut self, config: &OverlayConfig, time: FrameTime, rng: &mut R) {
        let phase = (time.now * config.alpha_frequency as f64).sin() as f32;
        self.alpha = config.alpha_base + config.alpha_swing * phase;

        self.scroll_x = (self.scroll_x + time.delta * config.scroll_speed.0).rem_euclid(1.0);
        self.scroll_y = (self.scroll_y + time.delta * config.scroll_speed.1).rem_euclid(1.0);

        self.scanline_timer += time.delta;
        if self.scanline_timer > config.scanline_interval {
            self.scanline_timer = 0.0;
            self.scanline_y = rng.r#gen::<f32>();
        }
    }
}

/// One textured, tinted rectangle of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayQuad {
    pub rect: Rect,
    pub uv: Rect,
    pub tint: [f32; 4],
}

/// The noise layer followed by the scanline band.
///
/// UVs tile the texture at one texel per screen pixel.
pub fn overlay_quads(
    config: &OverlayConfig,
    noise: &NoiseState,
    screen: (f32, f32),
    texture_size: (u32, u32),
) -> [OverlayQuad; 2] {
    let (width, height) = screen;
    let tex_w = texture_size.0 as f32;
    let tex_h = texture_size.1 as f32;

    let [r, g, b] = config.noise_tint;
    let noise_layer = OverlayQuad {
        rect: Rect::new(0.0, 0.0, width, height),
        uv: Rect::new(noise.scroll_x, noise.scroll_y, width / tex_w, height / tex_h),
        tint: [r, g, b, noise.alpha],
    };

    let line_y = noise.scanline_y * height;
    let line_height = height * config.scanline_height;
    let scroll_scale = config.scanline_scroll_scale;
    let [r, g, b] = config.scanline_tint;
    let scanline = OverlayQuad {
        rect: Rect::new(0.0, line_y, width, line_height),
        uv: Rect::new(
            noise.scroll_x * scroll_scale,
            noise.scroll_y * scroll_scale,
            width / tex_w,
            line_height / tex_h,
        ),
        tint: [r, g, b, noise.alpha * config.scanline_alpha_scale],
    };

    [noise_layer, scanline]
}
