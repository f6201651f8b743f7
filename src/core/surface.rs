//! Drawing surfaces
//!
//! The field paints through the [`Surface`] trait so the same frame logic
//! drives an HTML canvas, a software raster (native viewer/CLI) and a
//! recording double in tests.

use super::color::{Hsl, Rgba};

pub trait Surface {
    /// Alpha-blend a filled rectangle
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);
    /// Draw an opaque filled circle
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsl);
}

// ============================================================================
// RecordingSurface - test double
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum PaintCall {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Hsl,
    },
}

/// Records every paint call in order
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<PaintCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = &PaintCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, PaintCall::Circle { .. }))
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.calls.push(PaintCall::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsl) {
        self.calls.push(PaintCall::Circle {
            x,
            y,
            radius,
            color,
        });
    }
}

// ============================================================================
// RasterSurface - software RGBA framebuffer
// ============================================================================

/// Row-major RGBA8 framebuffer. Pixels persist between frames, which is
/// what makes the translucent trail fill work.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterSurface {
    pub fn new(width: usize, height: usize, background: Rgba) -> Self {
        let mut surface = Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        };
        surface.clear(background);
        surface
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA8 bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Reallocate to a new size, discarding contents
    pub fn resize(&mut self, width: usize, height: usize, background: Rgba) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width * height * 4];
        self.clear(background);
    }

    pub fn clear(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    /// Clip a float span to pixel indices whose centers fall inside it
    fn span(start: f64, end: f64, limit: usize) -> std::ops::Range<usize> {
        let lo = (start - 0.5).ceil().max(0.0) as usize;
        let hi = ((end - 0.5).floor() + 1.0).clamp(0.0, limit as f64) as usize;
        lo.min(hi)..hi
    }

    #[inline]
    fn blend(&mut self, x: usize, y: usize, rgb: [u8; 3], alpha: f64) {
        let i = (y * self.width + x) * 4;
        for (c, &src) in rgb.iter().enumerate() {
            let dst = self.pixels[i + c] as f64;
            self.pixels[i + c] = (src as f64 * alpha + dst * (1.0 - alpha)).round() as u8;
        }
        self.pixels[i + 3] = 255;
    }
}

impl Surface for RasterSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        let alpha = color.a.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        let rgb = [color.r, color.g, color.b];
        for py in Self::span(y, y + height, self.height) {
            for px in Self::span(x, x + width, self.width) {
                self.blend(px, py, rgb, alpha);
            }
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsl) {
        if !(radius > 0.0) {
            return;
        }
        let rgb = color.to_rgb();
        let r2 = radius * radius;
        for py in Self::span(y - radius, y + radius, self.height) {
            let dy = py as f64 + 0.5 - y;
            for px in Self::span(x - radius, x + radius, self.width) {
                let dx = px as f64 + 0.5 - x;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, rgb, 1.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba = Rgba::new(0, 0, 0, 1.0);
    const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    #[test]
    fn new_surface_is_background() {
        let surface = RasterSurface::new(4, 3, WHITE);
        assert_eq!(surface.pixels().len(), 4 * 3 * 4);
        assert_eq!(surface.pixel(3, 2), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn circle_fills_center_not_corners() {
        let mut surface = RasterSurface::new(20, 20, BLACK);
        surface.fill_circle(10.0, 10.0, 4.0, Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(surface.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(13, 13), Some([0, 0, 0, 255]));
    }

    #[test]
    fn offscreen_circle_is_clipped() {
        let mut surface = RasterSurface::new(10, 10, BLACK);
        surface.fill_circle(-100.0, 500.0, 30.0, Hsl::new(0.0, 100.0, 50.0));
        assert!(surface.pixels().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn trail_fill_fades_toward_background() {
        let mut surface = RasterSurface::new(8, 8, WHITE);
        let trail = Rgba::new(0, 0, 0, 0.2);
        surface.fill_rect(0.0, 0.0, 8.0, 8.0, trail);
        assert_eq!(surface.pixel(0, 0), Some([204, 204, 204, 255]));

        for _ in 0..60 {
            surface.fill_rect(0.0, 0.0, 8.0, 8.0, trail);
        }
        // 8-bit rounding leaves a faint residue, same as a browser canvas
        let [r, g, b, _] = surface.pixel(5, 5).unwrap();
        assert!(r <= 2 && g <= 2 && b <= 2, "expected near black, got {} {} {}", r, g, b);
    }

    #[test]
    fn resize_discards_contents() {
        let mut surface = RasterSurface::new(4, 4, BLACK);
        surface.fill_circle(2.0, 2.0, 2.0, Hsl::new(0.0, 100.0, 50.0));
        surface.resize(6, 2, WHITE);
        assert_eq!((surface.width(), surface.height()), (6, 2));
        assert!(surface.pixels().chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn recording_surface_keeps_order() {
        let mut surface = RecordingSurface::new();
        surface.fill_rect(0.0, 0.0, 1.0, 1.0, BLACK);
        surface.fill_circle(0.5, 0.5, 0.1, Hsl::new(1.0, 2.0, 3.0));
        assert_eq!(surface.len(), 2);
        assert!(matches!(surface.calls[0], PaintCall::Rect { .. }));
        assert_eq!(surface.circles().count(), 1);
    }
}
