//! Framebuffer for software rendering
//!
//! Color grid plus a parallel depth grid, both row-major by y.
//! Color writes wrap out-of-range coordinates; depth access does not.

use super::math::Point2;
use super::types::Color;
use crate::error::RenderError;

pub struct Framebuffer {
    pixels: Vec<Color>,
    zbuffer: Vec<f32>, // Larger is closer
    width: usize,
    height: usize,
}

impl Framebuffer {
    /// Allocate a framebuffer filled with `clear` and depth at negative infinity
    pub fn new(width: usize, height: usize, clear: Color) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            pixels: vec![clear; width * height],
            zbuffer: vec![f32::NEG_INFINITY; width * height],
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major color grid, row 0 first
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Repaint every pixel. Depth is left untouched.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Start a fresh depth pass
    pub fn reset_depth(&mut self) {
        self.zbuffer.fill(f32::NEG_INFINITY);
    }

    /// Pixel-write policy: coordinates wrap modulo the buffer size.
    /// Returns None when no cell can be addressed, in which case the write is dropped.
    pub fn wrap_index(&self, x: i32, y: i32) -> Option<usize> {
        let w = i64::try_from(self.width).ok()?;
        let h = i64::try_from(self.height).ok()?;
        let wx = i64::from(x).checked_rem_euclid(w)? as usize;
        let wy = i64::from(y).checked_rem_euclid(h)? as usize;
        Some(wy * self.width + wx)
    }

    /// Write a pixel, wrapping out-of-range coordinates
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.wrap_index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Depth at (x, y). Panics if the coordinate is outside the buffer.
    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.zbuffer[self.depth_index(x, y)]
    }

    /// Store depth at (x, y). Panics if the coordinate is outside the buffer.
    pub fn set_depth(&mut self, x: usize, y: usize, z: f32) {
        let idx = self.depth_index(x, y);
        self.zbuffer[idx] = z;
    }

    fn depth_index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "depth index ({}, {}) outside {}x{} buffer",
            x, y, self.width, self.height
        );
        y * self.width + x
    }

    /// Draw a line from `a` to `b` (inclusive) using Bresenham's algorithm
    pub fn draw_line(&mut self, a: Point2, b: Point2, color: Color) {
        // i64 so long lines through the wrap policy cannot overflow the error terms
        let (mut x1, mut y1, mut x2, mut y2) =
            (i64::from(a.x), i64::from(a.y), i64::from(b.x), i64::from(b.y));

        let steep = (y2 - y1).abs() > (x2 - x1).abs();
        if steep {
            std::mem::swap(&mut x1, &mut y1);
            std::mem::swap(&mut x2, &mut y2);
        }

        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }

        let dy = (y2 - y1).abs();
        let dx = x2 - x1;
        let y_step = if y1 < y2 { 1 } else { -1 };

        let mut offset = 0;
        let mut threshold = dx;
        let mut y = y1;

        for x in x1..=x2 {
            // Both stay between the original i32 endpoints
            let (px, py) = (x as i32, y as i32);
            if steep {
                self.set_pixel(py, px, color);
            } else {
                self.set_pixel(px, py, color);
            }

            offset += dy * 2;
            if offset >= threshold {
                y += y_step;
                threshold += dx * 2;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn lit(fb: &Framebuffer) -> BTreeSet<(usize, usize)> {
        let mut set = BTreeSet::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get_pixel(x, y) == Some(Color::WHITE) {
                    set.insert((x, y));
                }
            }
        }
        set
    }

    fn line(a: Point2, b: Point2) -> BTreeSet<(usize, usize)> {
        let mut fb = Framebuffer::new(32, 32, Color::BLACK).unwrap();
        fb.draw_line(a, b, Color::WHITE);
        lit(&fb)
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(matches!(
            Framebuffer::new(0, 10, Color::BLACK),
            Err(RenderError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(Framebuffer::new(10, 0, Color::BLACK).is_err());
    }

    #[test]
    fn test_new_fills_clear_and_depth() {
        let fb = Framebuffer::new(4, 3, Color::RED).unwrap();
        assert!(fb.pixels().iter().all(|&c| c == Color::RED));
        assert_eq!(fb.depth_at(3, 2), f32::NEG_INFINITY);
    }

    #[test]
    fn test_set_pixel_wraps() {
        let mut fb = Framebuffer::new(4, 3, Color::BLACK).unwrap();
        fb.set_pixel(5, 4, Color::WHITE);
        assert_eq!(fb.get_pixel(1, 1), Some(Color::WHITE));
        fb.set_pixel(-1, -1, Color::BLUE);
        assert_eq!(fb.get_pixel(3, 2), Some(Color::BLUE));
    }

    #[test]
    fn test_clear_keeps_depth() {
        let mut fb = Framebuffer::new(2, 2, Color::BLACK).unwrap();
        fb.set_depth(1, 1, 4.0);
        fb.clear(Color::GREEN);
        assert_eq!(fb.get_pixel(0, 0), Some(Color::GREEN));
        assert_eq!(fb.depth_at(1, 1), 4.0);
        fb.reset_depth();
        assert_eq!(fb.depth_at(1, 1), f32::NEG_INFINITY);
    }

    #[test]
    #[should_panic]
    fn test_depth_out_of_range_panics() {
        let fb = Framebuffer::new(2, 2, Color::BLACK).unwrap();
        fb.depth_at(2, 0);
    }

    #[test]
    fn test_horizontal_line() {
        let expected: BTreeSet<_> = (0..=5).map(|x| (x, 0)).collect();
        assert_eq!(line(Point2::new(0, 0), Point2::new(5, 0)), expected);
    }

    #[test]
    fn test_vertical_line() {
        let expected: BTreeSet<_> = (2..=9).map(|y| (7, y)).collect();
        assert_eq!(line(Point2::new(7, 9), Point2::new(7, 2)), expected);
    }

    #[test]
    fn test_single_point_line() {
        let expected: BTreeSet<_> = [(3, 4)].into_iter().collect();
        assert_eq!(line(Point2::new(3, 4), Point2::new(3, 4)), expected);
    }

    #[test]
    fn test_line_symmetric_all_octants() {
        let center = Point2::new(15, 15);
        let ends = [
            (28, 20), (20, 28), (10, 29), (2, 19),
            (1, 10), (11, 2), (19, 1), (29, 9), (28, 28), (2, 2),
        ];
        for (x, y) in ends {
            let end = Point2::new(x, y);
            assert_eq!(line(center, end), line(end, center), "line to ({}, {})", x, y);
        }
    }

    #[test]
    fn test_long_line_wraps_without_overflow() {
        let mut fb = Framebuffer::new(64, 64, Color::BLACK).unwrap();
        fb.draw_line(Point2::new(0, 0), Point2::new(40000, 30000), Color::WHITE);
        // (64, 48) lies exactly on the line and wraps to column 0
        assert_eq!(fb.get_pixel(0, 48), Some(Color::WHITE));
        // (128, 96) wraps to (0, 32)
        assert_eq!(fb.get_pixel(0, 32), Some(Color::WHITE));
    }

    #[test]
    fn test_line_at_i32_extremes() {
        let mut fb = Framebuffer::new(8, 8, Color::BLACK).unwrap();
        fb.draw_line(Point2::new(i32::MAX, 3), Point2::new(i32::MAX - 4, 3), Color::WHITE);
        fb.draw_line(Point2::new(0, i32::MIN), Point2::new(0, i32::MIN + 2), Color::WHITE);
        assert_eq!(fb.get_pixel((i32::MAX % 8) as usize, 3), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(0, i32::MIN.rem_euclid(8) as usize), Some(Color::WHITE));
    }

    #[test]
    fn test_line_connected() {
        let ends = [(30, 4), (4, 30), (0, 29), (31, 0), (9, 10)];
        for (x, y) in ends {
            let a = Point2::new(0, 0);
            let b = Point2::new(x, y);
            let pixels = line(a, b);
            let major = x.max(y) as usize;
            // One pixel per step along the major axis, endpoints included
            assert_eq!(pixels.len(), major + 1);
            assert!(pixels.contains(&(0, 0)));
            assert!(pixels.contains(&(x as usize, y as usize)));
            for &(px, py) in &pixels {
                if (px, py) == (0, 0) {
                    continue;
                }
                let has_neighbor = pixels.iter().any(|&(qx, qy)| {
                    (qx, qy) != (px, py)
                        && (qx as i64 - px as i64).abs() <= 1
                        && (qy as i64 - py as i64).abs() <= 1
                });
                assert!(has_neighbor, "gap at ({}, {})", px, py);
            }
        }
    }
}
