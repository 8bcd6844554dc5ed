//! Render Tests - Noise Texture and Overlay Drawing
//!
//! Tests for the generated noise texture and the draw calls the controller
//! issues against an overlay surface.

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use spectator_hijack_engine::game::SpectatorHijackController;
use spectator_hijack_engine::host::{FrameTime, HostFrame, Pose, SandboxCamera, SandboxCursor, SandboxScene};
use spectator_hijack_engine::input::{InputState, MouseButton};
use spectator_hijack_engine::render::noise_texture::stripe_factor;
use spectator_hijack_engine::render::{NoiseParams, NoiseTexture, OverlayBatch, RecordingSurface, Rect};

// ============================================================================
// Noise Texture Tests
// ============================================================================

fn row_mean(texture: &NoiseTexture, row: u32) -> f32 {
    let sum: u32 = (0..texture.width())
        .map(|x| texture.texel(x, row).map_or(0, |t| t.r as u32))
        .sum();
    sum as f32 / texture.width() as f32
}

#[test]
fn test_two_generations_differ_per_texel() {
    let params = NoiseParams::default();
    let a = NoiseTexture::generate(&params, &mut StdRng::seed_from_u64(1));
    let b = NoiseTexture::generate(&params, &mut StdRng::seed_from_u64(2));

    assert_ne!(a.texels(), b.texels());
}

#[test]
fn test_red_channel_stays_within_stripe_bounds() {
    let params = NoiseParams::default();
    let texture = NoiseTexture::generate(&params, &mut StdRng::seed_from_u64(11));

    for y in 0..texture.height() {
        let stripe = stripe_factor(&params, y);
        let lo = (60.0 * stripe) as u8;
        let hi = (189.0 * stripe) as u8;
        for x in 0..texture.width() {
            let red = texture.texel(x, y).unwrap().r;
            assert!(red >= lo && red <= hi, "texel ({x}, {y}) = {red}, expected {lo}..={hi}");
        }
    }
}

#[test]
fn test_banding_follows_row_stripe_in_every_generation() {
    let params = NoiseParams::default();
    let stripes: Vec<f32> = (0..params.size).map(|y| stripe_factor(&params, y)).collect();
    let darkest = (0..params.size as usize)
        .min_by(|&a, &b| stripes[a].total_cmp(&stripes[b]))
        .unwrap() as u32;
    let brightest = (0..params.size as usize)
        .max_by(|&a, &b| stripes[a].total_cmp(&stripes[b]))
        .unwrap() as u32;

    for seed in [5, 6, 7] {
        let texture = NoiseTexture::generate(&params, &mut StdRng::seed_from_u64(seed));
        assert!(
            row_mean(&texture, brightest) > row_mean(&texture, darkest),
            "seed {seed}: bright row should average above dark row"
        );
    }
}

// ============================================================================
// Overlay Drawing Tests
// ============================================================================

#[test]
fn test_controller_draws_noise_then_scanline() {
    let mut scene = SandboxScene::new();
    let player = scene.add_character("Player", Pose::default());
    scene.set_player(Some(player));
    scene.add_character("Guard", Pose::from_yaw(Vec3::new(0.0, 0.0, -5.0), 0.0));

    let mut camera = SandboxCamera::default();
    let mut cursor = SandboxCursor::default();
    let mut input = InputState::new();
    input.click(MouseButton::Middle);

    let mut controller = SpectatorHijackController::with_seed(8);
    controller.tick(&mut HostFrame {
        scene: &mut scene,
        camera: Some(&mut camera),
        cursor: &mut cursor,
        input: &input,
        time: FrameTime::new(0.0, 0.016),
    });

    let mut surface = RecordingSurface::new(1920.0, 1080.0);
    controller.render(&mut surface);

    assert_eq!(surface.calls.len(), 2);
    let layer = surface.calls[0];
    let scanline = surface.calls[1];

    // Fresh session: alpha 0.25, no scroll, scanline at mid-screen
    assert_eq!(layer.rect, Rect::new(0.0, 0.0, 1920.0, 1080.0));
    assert_eq!(layer.uv, Rect::new(0.0, 0.0, 15.0, 8.4375));
    assert_eq!(layer.tint[3], 0.25);

    assert_eq!(scanline.rect.y, 540.0);
    assert!((scanline.rect.height - 32.4).abs() < 1e-3);
    assert!((scanline.tint[3] - 0.4).abs() < 1e-6);
    assert!(scanline.tint[1] < layer.tint[1], "scanline is a deeper red");
}

#[test]
fn test_overlay_batch_accepts_controller_quads() {
    let texture = NoiseTexture::generate(&NoiseParams::default(), &mut StdRng::seed_from_u64(4));
    let mut batch = OverlayBatch::default();

    assert!(batch.add_quad(
        Rect::new(0.0, 0.0, 800.0, 600.0),
        Rect::new(0.1, 0.2, 6.25, 4.6875),
        [1.0, 0.35, 0.35, 0.2],
        800.0,
        600.0,
    ));
    assert_eq!(batch.quad_count(), 1);
    assert_eq!(texture.as_bytes().len(), 128 * 128 * 4);
}
