//! Per-pixel color procedures

use super::math::Vec2;
use super::types::{Color, Texture};

/// Interpolated attributes for one covered pixel
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    /// Interpolated depth (larger is closer)
    pub depth: f32,
    /// Interpolated texture coordinate
    pub uv: Vec2,
    /// Flat light intensity of the face, 1.0 outside the mesh driver
    pub intensity: f32,
    /// Framebuffer width
    pub width: usize,
}

/// Maps a fragment to a color
pub trait Shader {
    fn shade(&self, frag: &Fragment) -> Color;
}

impl<F: Fn(&Fragment) -> Color> Shader for F {
    fn shade(&self, frag: &Fragment) -> Color {
        self(frag)
    }
}

/// Horizontal stripes of 3-pixel bands, blue ramping left to right.
/// Ignores everything about the triangle except pixel position.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandedGradient;

/// (green, blue factor) for each of the five bands
const BANDS: [(u8, f32); 5] = [(120, 250.0), (90, 230.0), (60, 210.0), (90, 230.0), (120, 250.0)];

pub fn banded_gradient(x: i32, y: i32, width: usize) -> Color {
    let band = (y / 3).rem_euclid(5) as usize;
    let (green, factor) = BANDS[band];
    let level = x as f32 / width as f32;
    let blue = (factor * level) as u8;
    Color::new(0, green, blue)
}

impl Shader for BandedGradient {
    fn shade(&self, frag: &Fragment) -> Color {
        banded_gradient(frag.x, frag.y, frag.width)
    }
}

/// Single color lit by the face intensity
#[derive(Debug, Clone, Copy)]
pub struct FlatShader(pub Color);

impl Shader for FlatShader {
    fn shade(&self, frag: &Fragment) -> Color {
        self.0.shade(frag.intensity)
    }
}

/// Samples a texture at the interpolated uv, lit by the face intensity
pub struct TextureShader<'a> {
    pub texture: &'a Texture,
}

impl Shader for TextureShader<'_> {
    fn shade(&self, frag: &Fragment) -> Color {
        // Texture rows run top-down, v runs bottom-up
        self.texture.sample(frag.uv.x, 1.0 - frag.uv.y).shade(frag.intensity)
    }
}
