//! Hacking Noise Texture Module
//!
//! Generates the 128x128 RGBA noise texture drawn over the screen while the
//! camera is hijacked. Each texel is a random red brightness scaled by a
//! per-row Perlin stripe, which gives the texture horizontal banding.
//! Green and blue are always zero and alpha is always opaque; overlay
//! transparency comes from the draw-time tint.

use bytemuck::{Pod, Zeroable};
use rand::Rng;

/// Size of the noise texture in pixels (128x128)
pub const NOISE_TEXTURE_SIZE: u32 = 128;

/// One RGBA8 texel, laid out exactly as the GPU expects it.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

static_assertions::assert_eq_size!(Rgba8, [u8; 4]);

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Shape of the generated noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseParams {
    /// Width and height in texels
    pub size: u32,
    /// Lowest random base brightness (inclusive)
    pub base_min: u8,
    /// Highest random base brightness (exclusive)
    pub base_max: u8,
    /// Perlin sample step per row
    pub stripe_frequency: f32,
    /// How much the stripe darkens a row (stripe = perlin * amplitude + floor)
    pub stripe_amplitude: f32,
    pub stripe_floor: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            size: NOISE_TEXTURE_SIZE,
            base_min: 60,
            base_max: 190,
            stripe_frequency: 0.25,
            stripe_amplitude: 0.4,
            stripe_floor: 0.6,
        }
    }
}

/// CPU-side noise texture. Generated once and kept for the owner's lifetime.
/// Sampled with repeat addressing and nearest filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseTexture {
    width: u32,
    height: u32,
    texels: Vec<Rgba8>,
}

impl NoiseTexture {
    /// Generate a fresh texture. Row banding depends only on `params`; the
    /// per-texel brightness comes from `rng`.
    pub fn generate<R: Rng + ?Sized>(params: &NoiseParams, rng: &mut R) -> Self {
        let size = params.size;
        let mut texels = Vec::with_capacity((size * size) as usize);

        for y in 0..size {
            let stripe = stripe_factor(params, y);
            for _x in 0..size {
                let base = rng.gen_range(params.base_min..params.base_max);
                let value = (base as f32 * stripe) as u8;
                texels.push(Rgba8::new(value, 0, 0, 255));
            }
        }

        Self {
            width: size,
            height: size,
            texels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texels in row-major order, row 0 first.
    pub fn texels(&self) -> &[Rgba8] {
        &self.texels
    }

    pub fn texel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.texels.get((y * self.width + x) as usize).copied()
    }

    /// Raw RGBA bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }
}

/// Brightness multiplier applied to every texel of `row`.
pub fn stripe_factor(params: &NoiseParams, row: u32) -> f32 {
    perlin_noise(0.0, row as f32 * params.stripe_frequency) * params.stripe_amplitude
        + params.stripe_floor
}

/// 2D Perlin noise remapped to `[0, 1]`. Integer lattice points return 0.5.
pub fn perlin_noise(x: f32, y: f32) -> f32 {
    let perm = permutation_table();
    ((perlin_2d(x, y, &perm) + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Ken Perlin's reference permutation, doubled so lookups never wrap.
fn permutation_table() -> [u8; 512] {
    const P: [u8; 256] = [
        151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
        140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
        247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
        57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
        74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
        60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
        65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
        200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
        52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
        207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
        119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
        129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
        218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
        81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
        184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
        222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
    ];

    let mut perm = [0u8; 512];
    for i in 0..256 {
        perm[i] = P[i];
        perm[i + 256] = P[i];
    }
    perm
}

fn perlin_2d(x: f32, y: f32, perm: &[u8; 512]) -> f32 {
    let xi = (x.floor() as i32 & 255) as usize;
    let yi = (y.floor() as i32 & 255) as usize;

    let xf = x - x.floor();
    let yf = y - y.floor();

    let u = fade(xf);
    let v = fade(yf);

    let aa = perm[perm[xi] as usize + yi];
    let ab = perm[perm[xi] as usize + yi + 1];
    let ba = perm[perm[xi + 1] as usize + yi];
    let bb = perm[perm[xi + 1] as usize + yi + 1];

    let x1 = lerp(grad2d(aa, xf, yf), grad2d(ba, xf - 1.0, yf), u);
    let x2 = lerp(grad2d(ab, xf, yf - 1.0), grad2d(bb, xf - 1.0, yf - 1.0), u);
    lerp(x1, x2, v)
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
fn grad2d(hash: u8, x: f32, y: f32) -> f32 {
    match hash & 3 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        _ => -x - y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generate(seed: u64) -> NoiseTexture {
        NoiseTexture::generate(&NoiseParams::default(), &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_texture_shape() {
        let tex = generate(1);
        assert_eq!(tex.width(), 128);
        assert_eq!(tex.height(), 128);
        assert_eq!(tex.texels().len(), 128 * 128);
        assert_eq!(tex.as_bytes().len(), 128 * 128 * 4);
    }

    #[test]
    fn test_only_red_channel_and_opaque() {
        let tex = generate(2);
        for texel in tex.texels() {
            assert_eq!(texel.g, 0);
            assert_eq!(texel.b, 0);
            assert_eq!(texel.a, 255);
        }
    }

    #[test]
    fn test_stripe_factor_range() {
        let params = NoiseParams::default();
        for row in 0..params.size {
            let stripe = stripe_factor(&params, row);
            assert!((0.6..=1.0).contains(&stripe), "row {row}: {stripe}");
        }
    }

    #[test]
    fn test_stripe_has_variation() {
        let params = NoiseParams::default();
        let stripes: Vec<f32> = (0..params.size).map(|r| stripe_factor(&params, r)).collect();
        let min = stripes.iter().cloned().fold(f32::MAX, f32::min);
        let max = stripes.iter().cloned().fold(f32::MIN, f32::max);
        assert!(max - min > 0.01, "stripes should band, got {min}..{max}");
    }

    #[test]
    fn test_lattice_points_are_midgray() {
        assert!((perlin_noise(0.0, 0.0) - 0.5).abs() < 1e-6);
        assert!((perlin_noise(0.0, 3.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_seeded_generation_is_repeatable() {
        assert_eq!(generate(7), generate(7));
        assert_ne!(generate(7), generate(8));
    }

    #[test]
    fn test_texel_bounds() {
        let tex = generate(3);
        assert!(tex.texel(127, 127).is_some());
        assert!(tex.texel(128, 0).is_none());
        assert!(tex.texel(0, 128).is_none());
    }
}
