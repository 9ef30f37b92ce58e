//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use super::math::Vec3;
use super::{HEIGHT, WIDTH};
use crate::error::RenderError;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unit-range channels, rounding `c * 255` half to even
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let to_byte = |c: f32| (c * 255.0).round_ties_even().clamp(0.0, 255.0) as u8;
        Self {
            r: to_byte(r),
            g: to_byte(g),
            b: to_byte(b),
        }
    }

    /// Apply shading (multiply by intensity 0.0-1.0)
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
        }
    }

    /// Bitmap byte order: blue, green, red
    pub fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    pub fn from_bgr(bytes: [u8; 3]) -> Self {
        Self {
            r: bytes[2],
            g: bytes[1],
            b: bytes[0],
        }
    }
}

/// Simple texture (array of colors)
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub name: String,
}

impl Texture {
    /// Load texture from an image file (PNG, JPEG or BMP)
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let img = image::open(path)?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let texture = Self::from_image(img, name);
        log::debug!("Loaded texture: {} ({}x{})", texture.name, texture.width, texture.height);
        Ok(texture)
    }

    /// Decode a texture from raw encoded image bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self, RenderError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(img, name))
    }

    fn from_image(img: image::DynamicImage, name: String) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels: Vec<Color> = rgb
            .pixels()
            .map(|p| Color::new(p[0], p[1], p[2]))
            .collect();

        Self {
            width: width as usize,
            height: height as usize,
            pixels,
            name,
        }
    }

    /// Create a checkerboard test texture
    pub fn checkerboard(width: usize, height: usize, color1: Color, color2: Color) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / 4) + (y / 4)) % 2 == 0;
                pixels.push(if checker { color1 } else { color2 });
            }
        }
        Self { width, height, pixels, name: "checkerboard".to_string() }
    }

    /// Sample texture at UV coordinates (nearest, wrapping)
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || self.height == 0 {
            return Color::BLACK;
        }
        let tx = ((u * self.width as f32).floor() as i64).rem_euclid(self.width as i64) as usize;
        let ty = ((v * self.height as f32).floor() as i64).rem_euclid(self.height as i64) as usize;
        self.pixels[ty * self.width + tx]
    }
}

/// How faces with more than three vertices are turned into triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolygonMode {
    /// Only the first three vertices of each face are drawn
    #[default]
    FirstTriangle,
    /// Fan-triangulate around the first vertex
    Fan,
}

/// Render session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Color the framebuffer is cleared to
    pub clear_color: Color,
    /// Color used by point and line drawing
    pub draw_color: Color,
    /// Direction towards the light (for flat intensity and culling)
    pub light_dir: Vec3,
    /// Added to every mesh vertex before scaling
    pub translate: Vec3,
    /// Per-axis scale applied after translation
    pub scale: Vec3,
    /// Skip faces whose intensity rounds below zero
    pub backface_cull: bool,
    pub polygon_mode: PolygonMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            clear_color: Color::BLACK,
            draw_color: Color::WHITE,
            light_dir: Vec3::FORWARD,
            translate: Vec3::ZERO,
            scale: Vec3::ONE,
            backface_cull: true,
            polygon_mode: PolygonMode::FirstTriangle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_bgr_order() {
        let c = Color::new(10, 20, 30);
        assert_eq!(c.to_bgr(), [30, 20, 10]);
        assert_eq!(Color::from_bgr([30, 20, 10]), c);
    }

    #[test]
    fn test_color_from_unit() {
        assert_eq!(Color::from_unit(1.0, 0.0, 0.5), Color::new(255, 0, 128));
        assert_eq!(Color::from_unit(2.0, -1.0, 0.0), Color::new(255, 0, 0));
    }

    #[test]
    fn test_color_shade() {
        assert_eq!(Color::new(200, 100, 50).shade(0.5), Color::new(100, 50, 25));
        assert_eq!(Color::WHITE.shade(-3.0), Color::BLACK);
    }

    #[test]
    fn test_texture_sample_wraps() {
        let tex = Texture::checkerboard(8, 8, Color::WHITE, Color::BLACK);
        assert_eq!(tex.sample(0.0, 0.0), Color::WHITE);
        assert_eq!(tex.sample(0.5, 0.0), Color::BLACK);
        assert_eq!(tex.sample(1.0, 0.0), Color::WHITE);
        assert_eq!(tex.sample(-0.5, 0.0), Color::BLACK);
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.clear_color, Color::BLACK);
        assert_eq!(config.draw_color, Color::WHITE);
        assert_eq!(config.polygon_mode, PolygonMode::FirstTriangle);
    }
}
