//! Typed drawing surface used by the renderer
//!
//! Primitives take signed pixel coordinates and clip against the canvas, so
//! shapes that extend past an edge are drawn partially and shapes entirely
//! off-canvas are skipped.

use crate::config::Color;
use image::{Rgb, RgbImage};

/// Integer pixel coordinate; may lie outside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        PixelPoint { x, y }
    }
}

pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fill the axis-aligned rectangle starting at `origin`
    fn fill_rect(&mut self, origin: PixelPoint, width: u32, height: u32, color: Color);

    /// Fill every pixel whose center is within `radius + 0.5` of `center`.
    /// A radius of zero paints the single center pixel; a negative radius
    /// paints nothing.
    fn fill_circle(&mut self, center: PixelPoint, radius: i32, color: Color);
}

/// Inclusive pixel range of `[start, end]` clipped to `0..len`
fn clip_span(start: i64, end: i64, len: u32) -> Option<(u32, u32)> {
    let lo = start.max(0);
    let hi = end.min(len as i64 - 1);
    (lo <= hi).then(|| (lo as u32, hi as u32))
}

impl Surface for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn fill_rect(&mut self, origin: PixelPoint, width: u32, height: u32, color: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let x0 = origin.x as i64;
        let y0 = origin.y as i64;
        let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (
            clip_span(x0, x0 + width as i64 - 1, Surface::width(self)),
            clip_span(y0, y0 + height as i64 - 1, Surface::height(self)),
        ) else {
            return;
        };

        let pixel: Rgb<u8> = color.into();
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                self.put_pixel(x, y, pixel);
            }
        }
    }

    fn fill_circle(&mut self, center: PixelPoint, radius: i32, color: Color) {
        if radius < 0 {
            return;
        }
        let r = radius as i64;
        let cx = center.x as i64;
        let cy = center.y as i64;
        let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (
            clip_span(cx - r, cx + r, Surface::width(self)),
            clip_span(cy - r, cy + r, Surface::height(self)),
        ) else {
            return;
        };

        // dx² + dy² <= (r + 0.5)² - 0.25, kept in integers
        let limit = r * r + r;
        let pixel: Rgb<u8> = color.into();
        for y in y_lo..=y_hi {
            let dy = y as i64 - cy;
            for x in x_lo..=x_hi {
                let dx = x as i64 - cx;
                if dx * dx + dy * dy <= limit {
                    self.put_pixel(x, y, pixel);
                }
            }
        }
    }
}
