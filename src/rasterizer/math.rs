//! Vector math for 3D rendering

use std::ops::{Add, Sub, Mul};
use serde::{Serialize, Deserialize};

/// 3D Vector (positions, normals, directions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };
    /// Points out of the screen, towards the viewer
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero
    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Component-wise product
    pub fn mul_components(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// 2D Vector (for texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer screen-space pixel coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Result of locating a pixel against a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Barycentric {
    /// Weights for vertices A (`w`), B (`v`) and C (`u`). Any of them may be
    /// negative when the point lies outside the triangle.
    Contained { w: f32, v: f32, u: f32 },
    /// Triangle too thin at pixel scale to resolve
    NotContained,
}

impl Barycentric {
    /// Weights as (w, v, u) if the point lies inside or on the triangle
    pub fn inside(self) -> Option<(f32, f32, f32)> {
        match self {
            Barycentric::Contained { w, v, u } if w >= 0.0 && v >= 0.0 && u >= 0.0 => {
                Some((w, v, u))
            }
            _ => None,
        }
    }
}

/// Barycentric weights of pixel `p` in screen-space triangle (a, b, c).
/// Only the x/y components of the vertices are used.
pub fn barycentric(a: Vec3, b: Vec3, c: Vec3, p: Point2) -> Barycentric {
    let px = p.x as f32;
    let py = p.y as f32;
    let r = Vec3::new(c.x - a.x, b.x - a.x, a.x - px)
        .cross(Vec3::new(c.y - a.y, b.y - a.y, a.y - py));

    if r.z.abs() < 1.0 {
        return Barycentric::NotContained;
    }

    let u = r.x / r.z;
    let v = r.y / r.z;
    let w = 1.0 - (u + v);

    Barycentric::Contained { w, v, u }
}

/// Axis-aligned bounding box of three vertices as (xmin, xmax, ymin, ymax), inclusive
pub fn bbox(a: Vec3, b: Vec3, c: Vec3) -> (i32, i32, i32, i32) {
    let xmin = a.x.min(b.x).min(c.x).floor() as i32;
    let xmax = a.x.max(b.x).max(c.x).ceil() as i32;
    let ymin = a.y.min(b.y).min(c.y).floor() as i32;
    let ymax = a.y.max(b.y).max(c.y).ceil() as i32;
    (xmin, xmax, ymin, ymax)
}
