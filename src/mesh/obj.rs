//! Wavefront OBJ loading
//!
//! Reads `v`, `vt` and `f` statements. Normals, groups, materials and
//! smoothing are ignored; unknown directives are skipped with a warning.

use std::fs;
use std::path::Path;

use super::{Face, FaceVertex, Mesh};
use crate::rasterizer::{Vec2, Vec3};

/// Error type for mesh loading
#[derive(Debug)]
pub enum MeshError {
    IoError(std::io::Error),
    ParseError { line: usize, message: String },
}

impl From<std::io::Error> for MeshError {
    fn from(e: std::io::Error) -> Self {
        MeshError::IoError(e)
    }
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::IoError(e) => write!(f, "IO error: {}", e),
            MeshError::ParseError { line, message } => write!(f, "Line {}: {}", line, message),
        }
    }
}

impl std::error::Error for MeshError {}

/// Load a mesh from an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
    let contents = fs::read_to_string(path)?;
    parse_obj(&contents)
}

/// Parse OBJ text
pub fn parse_obj(s: &str) -> Result<Mesh, MeshError> {
    let mut mesh = Mesh::default();

    for (i, raw) in s.lines().enumerate() {
        let line = i + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        let mut parts = content.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&mut parts, line, "vertex")?;
                mesh.vertices.push(Vec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(&mut parts, line, "texture coordinate")?;
                mesh.tex_coords.push(Vec2::new(u, v));
            }
            "f" => {
                let vertices = parts
                    .map(|token| parse_face_vertex(token, line))
                    .collect::<Result<Vec<_>, _>>()?;
                if vertices.len() < 3 {
                    return Err(parse_error(line, format!("face needs 3 vertices, got {}", vertices.len())));
                }
                mesh.faces.push(Face { vertices });
            }
            // Valid OBJ that does not affect rasterization
            "vn" | "vp" | "g" | "o" | "s" | "l" | "usemtl" | "mtllib" => {}
            other => {
                log::warn!("Line {}: skipping unknown directive '{}'", line, other);
            }
        }
    }

    log::debug!(
        "Parsed mesh: {} vertices, {} texture coordinates, {} faces",
        mesh.vertices.len(), mesh.tex_coords.len(), mesh.faces.len()
    );
    Ok(mesh)
}

fn parse_error(line: usize, message: String) -> MeshError {
    MeshError::ParseError { line, message }
}

/// Read the first N numbers of a statement; trailing components (vt w, v weights) are ignored
fn parse_floats<const N: usize>(
    parts: &mut std::str::SplitWhitespace<'_>,
    line: usize,
    what: &str,
) -> Result<[f32; N], MeshError> {
    let mut out = [0.0; N];
    for slot in out.iter_mut() {
        let token = parts
            .next()
            .ok_or_else(|| parse_error(line, format!("{} needs {} components", what, N)))?;
        *slot = token
            .parse()
            .map_err(|_| parse_error(line, format!("invalid number '{}'", token)))?;
    }
    Ok(out)
}

/// `v`, `v/vt`, `v/vt/vn` or `v//vn`
fn parse_face_vertex(token: &str, line: usize) -> Result<FaceVertex, MeshError> {
    let mut fields = token.split('/');
    let index = |field: &str| -> Result<usize, MeshError> {
        match field.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(parse_error(line, format!("invalid index '{}' in '{}'", field, token))),
        }
    };

    let vertex = index(fields.next().unwrap_or(""))?;
    let tex_coord = match fields.next() {
        Some("") | None => None,
        Some(field) => Some(index(field)?),
    };

    Ok(FaceVertex { vertex, tex_coord })
}
