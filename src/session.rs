//! Render session
//!
//! Owns the framebuffer and drawing state for one image. Sessions are
//! independent of each other; nothing is global.

use std::path::Path;

use crate::error::RenderError;
use crate::mesh::{load_obj, Mesh};
use crate::rasterizer::{
    fill_triangle, render_mesh, write_bmp, Color, Framebuffer, Point2, RenderConfig, RenderStats,
    Shader, Triangle, Vec3,
};

pub struct RenderSession {
    config: RenderConfig,
    fb: Framebuffer,
}

impl RenderSession {
    /// Create a session with a framebuffer cleared to `config.clear_color`
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        let fb = Framebuffer::new(config.width, config.height, config.clear_color)?;
        Ok(Self { config, fb })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.fb
    }

    /// Resize the image. The framebuffer is reallocated and cleared.
    pub fn create_window(&mut self, width: usize, height: usize) -> Result<(), RenderError> {
        self.fb = Framebuffer::new(width, height, self.config.clear_color)?;
        self.config.width = width;
        self.config.height = height;
        Ok(())
    }

    /// Start a fresh image: clear color everywhere, depth back to negative infinity
    pub fn clear(&mut self) {
        self.fb.clear(self.config.clear_color);
        self.fb.reset_depth();
    }

    /// Set the clear color from unit-range channels and repaint immediately
    pub fn set_clear_color(&mut self, r: f32, g: f32, b: f32) {
        self.config.clear_color = Color::from_unit(r, g, b);
        self.fb.clear(self.config.clear_color);
    }

    /// Set the point/line color from unit-range channels
    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.config.draw_color = Color::from_unit(r, g, b);
    }

    pub fn draw_color(&self) -> Color {
        self.config.draw_color
    }

    pub fn set_transform(&mut self, translate: Vec3, scale: Vec3) {
        self.config.translate = translate;
        self.config.scale = scale;
    }

    pub fn point(&mut self, x: i32, y: i32) {
        self.fb.set_pixel(x, y, self.config.draw_color);
    }

    pub fn line(&mut self, a: Point2, b: Point2) {
        self.fb.draw_line(a, b, self.config.draw_color);
    }

    pub fn triangle<S: Shader + ?Sized>(&mut self, tri: &Triangle, shader: &S) -> usize {
        fill_triangle(&mut self.fb, tri, 1.0, shader)
    }

    /// Draw a mesh using the session's transform, lighting and culling settings
    pub fn load_mesh<S: Shader + ?Sized>(&mut self, mesh: &Mesh, shader: &S) -> Result<RenderStats, RenderError> {
        render_mesh(&mut self.fb, mesh, &self.config, shader)
    }

    /// Load an OBJ file and draw it
    pub fn load_obj<P: AsRef<Path>, S: Shader + ?Sized>(
        &mut self,
        path: P,
        shader: &S,
    ) -> Result<RenderStats, RenderError> {
        let path = path.as_ref();
        let mesh = load_obj(path)?;
        log::info!(
            "Loaded {} ({} vertices, {} faces)",
            path.display(), mesh.vertices.len(), mesh.faces.len()
        );
        self.load_mesh(&mesh, shader)
    }

    /// Write the current image as a BMP file
    pub fn finish<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        write_bmp(&self.fb, path)
    }
}
