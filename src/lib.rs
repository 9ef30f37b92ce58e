//! Softraster: software triangle rasterizer
//!
//! Renders triangulated meshes into a color + depth framebuffer and writes
//! the result as a 24-bit BMP:
//! - Bresenham lines
//! - Bounding-box + barycentric triangle fill
//! - Z-buffer hidden surface removal
//! - Flat lighting with back-face culling
//! - Pluggable per-pixel shaders

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod mesh;
pub mod rasterizer;
pub mod session;

pub use config::{load_config, load_config_from_str, save_config};
pub use error::RenderError;
pub use session::RenderSession;
