//! Core rendering functions
//! Triangle fill with z-buffer and the mesh walk that feeds it

use super::framebuffer::Framebuffer;
use super::math::{barycentric, bbox, Point2, Vec2, Vec3};
use super::shader::{Fragment, Shader};
use super::types::{PolygonMode, RenderConfig};
use crate::error::RenderError;
use crate::mesh::Mesh;

/// Screen-space triangle ready for rasterization
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub ta: Vec2,
    pub tb: Vec2,
    pub tc: Vec2,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            a,
            b,
            c,
            ta: Vec2::default(),
            tb: Vec2::default(),
            tc: Vec2::default(),
        }
    }

    pub fn with_uvs(mut self, ta: Vec2, tb: Vec2, tc: Vec2) -> Self {
        self.ta = ta;
        self.tb = tb;
        self.tc = tc;
        self
    }
}

/// Rasterize a single triangle. Returns the number of pixels that passed the depth test.
///
/// Pixels are kept only when every barycentric weight is non-negative and the
/// interpolated depth is strictly greater than what is already stored, so equal
/// depths keep the earlier write. The scan box is clipped to the framebuffer:
/// pixels outside it are skipped, so the wrap policy of `Framebuffer::set_pixel`
/// never applies to triangle pixels.
pub fn fill_triangle<S: Shader + ?Sized>(
    fb: &mut Framebuffer,
    tri: &Triangle,
    intensity: f32,
    shader: &S,
) -> usize {
    let (xmin, xmax, ymin, ymax) = bbox(tri.a, tri.b, tri.c);
    let xmin = xmin.max(0);
    let ymin = ymin.max(0);
    let xmax = xmax.min(fb.width() as i32 - 1);
    let ymax = ymax.min(fb.height() as i32 - 1);

    let mut written = 0;
    for y in ymin..=ymax {
        for x in xmin..=xmax {
            let Some((w, v, u)) = barycentric(tri.a, tri.b, tri.c, Point2::new(x, y)).inside() else {
                continue;
            };

            let z = tri.a.z * w + tri.b.z * v + tri.c.z * u;
            let uv = Vec2::new(
                tri.ta.x * w + tri.tb.x * v + tri.tc.x * u,
                tri.ta.y * w + tri.tb.y * v + tri.tc.y * u,
            );

            let color = shader.shade(&Fragment {
                x,
                y,
                depth: z,
                uv,
                intensity,
                width: fb.width(),
            });

            // Clipped to the buffer above, so both casts are in range
            let (ux, uy) = (x as usize, y as usize);
            if z > fb.depth_at(ux, uy) {
                fb.set_pixel(x, y, color);
                fb.set_depth(ux, uy, z);
                written += 1;
            }
        }
    }
    written
}

/// Model-space vertex to screen space: `round((v + translate) * scale)` per component
pub fn transform_vertex(v: Vec3, translate: Vec3, scale: Vec3) -> Vec3 {
    let t = (v + translate).mul_components(scale);
    Vec3::new(t.x.round_ties_even(), t.y.round_ties_even(), t.z.round_ties_even())
}

/// Counters from one mesh walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces_drawn: usize,
    pub faces_culled: usize,
    pub faces_skipped: usize,
    pub pixels_written: usize,
}

/// Render a mesh to the framebuffer
///
/// Each face is transformed, flat-lit against `config.light_dir` and culled when
/// its rounded grey level is negative. Only the first three vertices are used
/// unless `config.polygon_mode` asks for fan triangulation.
pub fn render_mesh<S: Shader + ?Sized>(
    fb: &mut Framebuffer,
    mesh: &Mesh,
    config: &RenderConfig,
    shader: &S,
) -> Result<RenderStats, RenderError> {
    let mut stats = RenderStats::default();

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        if face.vertices.len() < 3 {
            log::warn!("Face {} has {} vertices, skipping", face_idx, face.vertices.len());
            stats.faces_skipped += 1;
            continue;
        }

        let mut screen = Vec::with_capacity(face.vertices.len());
        let mut uvs = Vec::with_capacity(face.vertices.len());

        for fv in &face.vertices {
            let pos = lookup(&mesh.vertices, fv.vertex, face_idx, "vertex")?;
            screen.push(transform_vertex(pos, config.translate, config.scale));

            let uv = match fv.tex_coord {
                Some(t) => lookup(&mesh.tex_coords, t, face_idx, "texture coordinate")?,
                None => Vec2::default(),
            };
            uvs.push(uv);
        }

        let (a, b, c) = (screen[0], screen[1], screen[2]);
        let normal = (b - a).cross(c - a).normalize();
        let intensity = normal.dot(config.light_dir);
        let grey = (255.0 * intensity).round_ties_even();
        if config.backface_cull && grey < 0.0 {
            stats.faces_culled += 1;
            continue;
        }

        let last = match config.polygon_mode {
            PolygonMode::FirstTriangle => 2,
            PolygonMode::Fan => screen.len() - 1,
        };
        for i in 1..last {
            let tri = Triangle::new(screen[0], screen[i], screen[i + 1])
                .with_uvs(uvs[0], uvs[i], uvs[i + 1]);
            stats.pixels_written += fill_triangle(fb, &tri, intensity, shader);
        }
        stats.faces_drawn += 1;
    }

    log::debug!(
        "Rendered {} faces ({} culled, {} skipped), {} pixels written",
        stats.faces_drawn, stats.faces_culled, stats.faces_skipped, stats.pixels_written
    );
    Ok(stats)
}

/// Resolve a 1-based mesh index
fn lookup<T: Copy>(items: &[T], index: usize, face: usize, kind: &'static str) -> Result<T, RenderError> {
    index
        .checked_sub(1)
        .and_then(|i| items.get(i))
        .copied()
        .ok_or(RenderError::IndexOutOfRange { face, kind, index, len: items.len() })
}
