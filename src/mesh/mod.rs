//! Mesh input
//!
//! Plain indexed geometry plus a Wavefront OBJ reader. Face indices keep the
//! 1-based numbering of the file format; the renderer converts them on lookup.

mod obj;

pub use obj::*;

use crate::rasterizer::{Vec2, Vec3};

/// One corner of a face: 1-based vertex index and optional 1-based texcoord index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    pub vertex: usize,
    pub tex_coord: Option<usize>,
}

/// A polygon, at least three corners when well formed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Face {
    pub vertices: Vec<FaceVertex>,
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub faces: Vec<Face>,
}
