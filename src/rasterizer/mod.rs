//! Software rasterizer
//!
//! Features:
//! - Bresenham line drawing in every octant
//! - Bounding-box + barycentric triangle fill
//! - Z-buffer hidden surface removal (larger depth wins)
//! - Pluggable per-pixel shaders
//! - 24-bit BMP output

mod math;
mod types;
mod framebuffer;
mod shader;
mod render;
mod bmp;

pub use math::*;
pub use types::*;
pub use framebuffer::*;
pub use shader::*;
pub use render::*;
pub use bmp::*;

/// Default image dimensions
pub const WIDTH: usize = 640;
pub const HEIGHT: usize = 480;
