//! Hijack Configuration
//!
//! Target selection timing and the look of the hacking overlay.

use crate::render::NoiseParams;

/// Target acquisition and switching parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct HijackConfig {
    /// Minimum unscaled seconds between manual target switches
    pub switch_cooldown: f64,
    /// Candidates closer than this are never picked as the initial target
    pub min_target_distance: f32,
    /// Candidates farther than this are never picked as the initial target
    pub max_target_distance: f32,
    /// Score weight of `dot(player_forward, direction_to_candidate)`
    pub facing_weight: f32,
    /// Score penalty per world unit of distance
    pub distance_weight: f32,
}

impl Default for HijackConfig {
    fn default() -> Self {
        Self {
            switch_cooldown: 0.15,
            min_target_distance: 0.5,
            max_target_distance: 80.0,
            facing_weight: 2.0,
            distance_weight: 0.02,
        }
    }
}

/// Hacking overlay animation and tint parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    // Opacity breathing: alpha = base + swing * sin(now * frequency)
    pub alpha_base: f32,
    pub alpha_swing: f32,
    pub alpha_frequency: f32,

    /// UV scroll speed per unscaled second (x, y)
    pub scroll_speed: (f32, f32),

    /// Seconds between scanline jumps
    pub scanline_interval: f32,
    /// Scanline band height as a fraction of screen height
    pub scanline_height: f32,
    /// Scanline opacity relative to the noise layer
    pub scanline_alpha_scale: f32,
    /// Scanline UV scroll relative to the noise layer
    pub scanline_scroll_scale: f32,

    /// RGB tint of the full-screen noise layer
    pub noise_tint: [f32; 3],
    /// RGB tint of the scanline band
    pub scanline_tint: [f32; 3],

    // Values the animation restarts from when a hijack begins
    pub reset_alpha: f32,
    pub reset_scanline: f32,

    pub noise: NoiseParams,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            alpha_base: 0.18,
            alpha_swing: 0.07,
            alpha_frequency: 8.0,

            scroll_speed: (0.6, 0.3),

            scanline_interval: 0.07,
            scanline_height: 0.03,
            scanline_alpha_scale: 1.6,
            scanline_scroll_scale: 2.0,

            noise_tint: [1.0, 0.35, 0.35],
            scanline_tint: [1.0, 0.1, 0.1],

            reset_alpha: 0.25,
            reset_scanline: 0.5,

            noise: NoiseParams::default(),
        }
    }
}
