//! Core framebuffer for pixel rendering.
//!
//! Provides a row-aligned RGB pixel buffer. The alpha composite used for
//! translucent fills is SIMD-accelerated through trueno.

use crate::color::Color;
use crate::error::{Error, Result};
use trueno::Vector;

/// Row alignment in bytes (64 bytes for AVX-512).
const SIMD_ALIGNMENT: usize = 64;

/// Bytes per pixel.
const CHANNELS: usize = 3;

/// Opaque RGB framebuffer.
///
/// Rows are padded to a 64-byte stride so row slices line up with wide SIMD
/// registers during compositing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGB pixels in row-major order, `stride` bytes per row.
    pixels: Vec<u8>,
    /// Stride in bytes (includes alignment padding).
    stride: usize,
}

impl Framebuffer {
    /// Create a new black framebuffer with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_figure::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * CHANNELS;
        let stride = (row_bytes + SIMD_ALIGNMENT - 1) & !(SIMD_ALIGNMENT - 1);
        let pixels = vec![0; stride * (height as usize)];

        Ok(Self { width, height, pixels, stride })
    }

    /// Create a framebuffer cleared to `color`.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let mut fb = Self::new(width, height)?;
        fb.clear(color);
        Ok(fb)
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the stride (row width in bytes, including any padding).
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Get a row of pixels as a slice (without padding).
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * self.stride;
        Some(&self.pixels[start..start + self.row_bytes()])
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Color) {
        let [r, g, b] = color.to_array();
        let row_bytes = self.row_bytes();

        for row in self.pixels.chunks_exact_mut(self.stride) {
            for chunk in row[..row_bytes].chunks_exact_mut(CHANNELS) {
                chunk[0] = r;
                chunk[1] = g;
                chunk[2] = b;
            }
        }
    }

    /// Fill a rectangular region with a solid color.
    ///
    /// Coordinates may be negative or exceed the buffer; the region is clipped.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x1 = x.clamp(0, self.width as i32);
        let y1 = y.clamp(0, self.height as i32);
        let x2 = x.saturating_add(w).clamp(0, self.width as i32);
        let y2 = y.saturating_add(h).clamp(0, self.height as i32);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let [r, g, b] = color.to_array();
        let span = (x2 - x1) as usize;

        for row_y in y1..y2 {
            let start = (row_y as usize) * self.stride + (x1 as usize) * CHANNELS;
            for chunk in self.pixels[start..start + span * CHANNELS].chunks_exact_mut(CHANNELS) {
                chunk[0] = r;
                chunk[1] = g;
                chunk[2] = b;
            }
        }
    }

    /// Fill the inclusive horizontal span `[x0, x1]` on row `y`, clipped.
    pub fn fill_span(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32 - 1);
        if x1 < x0 {
            return;
        }
        self.fill_rect(x0, y, x1 - x0 + 1, 1, color);
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(Color::rgb(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if !self.in_bounds(x, y) {
            return;
        }

        let idx = self.pixel_index(x as u32, y as u32);
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
    }

    /// Mix `color` into a pixel with the given coverage in `[0, 1]`.
    ///
    /// Used by the anti-aliased line rasterizer.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if !self.in_bounds(x, y) || coverage <= 0.0 {
            return;
        }

        let idx = self.pixel_index(x as u32, y as u32);
        let dst = Color::rgb(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]);
        let out = dst.lerp(color, coverage);
        self.pixels[idx] = out.r;
        self.pixels[idx + 1] = out.g;
        self.pixels[idx + 2] = out.b;
    }

    /// Composite another framebuffer over this one with a uniform weight.
    ///
    /// `self = other * alpha + self * (1 - alpha)`, channel-wise, rounded to
    /// the nearest level so pixels that agree in both buffers are unchanged.
    /// Uses trueno's Vector operations for the per-row arithmetic.
    ///
    /// # Errors
    ///
    /// Returns an error if the framebuffers have different dimensions.
    pub fn blend_over(&mut self, other: &Framebuffer, alpha: f32) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::InvalidDimensions { width: other.width, height: other.height });
        }

        let alpha = alpha.clamp(0.0, 1.0);
        let row_bytes = self.row_bytes();
        let alpha_vec = Vector::from_vec(vec![alpha; row_bytes]);
        let inv_alpha_vec = Vector::from_vec(vec![1.0 - alpha; row_bytes]);

        for y in 0..self.height as usize {
            let row_start = y * self.stride;
            let src = &other.pixels[row_start..row_start + row_bytes];
            let dst = &self.pixels[row_start..row_start + row_bytes];
            if src == dst {
                continue;
            }

            let src_vec = Vector::from_vec(src.iter().map(|&b| f32::from(b)).collect());
            let dst_vec = Vector::from_vec(dst.iter().map(|&b| f32::from(b)).collect());

            let blended = src_vec
                .mul(&alpha_vec)
                .and_then(|s| dst_vec.mul(&inv_alpha_vec).and_then(|d| s.add(&d)))
                .map_err(|e| Error::Rendering(format!("alpha composite failed: {e:?}")))?;

            let row = &mut self.pixels[row_start..row_start + row_bytes];
            for (out, &v) in row.iter_mut().zip(blended.as_slice()) {
                *out = v.round().clamp(0.0, 255.0) as u8;
            }
        }

        Ok(())
    }

    /// Return a copy rotated 90 degrees counter-clockwise.
    #[must_use]
    pub fn rotate_ccw(&self) -> Framebuffer {
        let mut out = Framebuffer {
            width: self.height,
            height: self.width,
            pixels: Vec::new(),
            stride: 0,
        };
        let row_bytes = (out.width as usize) * CHANNELS;
        out.stride = (row_bytes + SIMD_ALIGNMENT - 1) & !(SIMD_ALIGNMENT - 1);
        out.pixels = vec![0; out.stride * (out.height as usize)];

        for y in 0..self.height {
            for x in 0..self.width {
                let src = self.pixel_index(x, y);
                let dst = out.pixel_index(y, self.width - 1 - x);
                out.pixels[dst..dst + CHANNELS].copy_from_slice(&self.pixels[src..src + CHANNELS]);
            }
        }

        out
    }

    /// Copy `src` into this buffer with its top-left corner at `(x, y)`.
    ///
    /// Nothing is copied unless `src` fits entirely; returns whether it did.
    pub fn blit(&mut self, src: &Framebuffer, x: i32, y: i32) -> bool {
        if x < 0
            || y < 0
            || x as u32 + src.width > self.width
            || y as u32 + src.height > self.height
        {
            return false;
        }

        let src_row_bytes = src.row_bytes();
        for sy in 0..src.height {
            let s = (sy as usize) * src.stride;
            let d = self.pixel_index(x as u32, y as u32 + sy);
            self.pixels[d..d + src_row_bytes].copy_from_slice(&src.pixels[s..s + src_row_bytes]);
        }
        true
    }

    /// Get pixel data as a compact buffer without stride padding.
    ///
    /// This is the layout PNG and the terminal encoders expect.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = self.row_bytes();
        let mut compact = Vec::with_capacity(row_bytes * (self.height as usize));
        for row in self.pixels.chunks_exact(self.stride) {
            compact.extend_from_slice(&row[..row_bytes]);
        }
        compact
    }

    /// Count pixels equal to `color`.
    #[must_use]
    pub fn count_color(&self, color: Color) -> usize {
        (0..self.height)
            .filter_map(|y| self.row(y))
            .flat_map(|row| row.chunks_exact(CHANNELS))
            .filter(|px| px[0] == color.r && px[1] == color.g && px[2] == color.b)
            .count()
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn row_bytes(&self) -> usize {
        (self.width as usize) * CHANNELS
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * CHANNELS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_framebuffer() {
        let fb = Framebuffer::new(100, 50).unwrap();
        assert_eq!(fb.width(), 100);
        assert_eq!(fb.height(), 50);
        assert_eq!(fb.pixel_count(), 5000);
        assert!(fb.stride() >= 300);
        assert_eq!(fb.stride() % SIMD_ALIGNMENT, 0);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Framebuffer::new(0, 100).is_err());
        assert!(Framebuffer::new(100, 0).is_err());
        assert!(Framebuffer::new(0, 0).is_err());
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Color::RED);

        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(fb.get_pixel(x, y), Some(Color::RED));
            }
        }
    }

    #[test]
    fn test_clear_large() {
        let mut fb = Framebuffer::new(1920, 1080).unwrap();
        fb.clear(Color::BLUE);

        assert_eq!(fb.get_pixel(0, 0), Some(Color::BLUE));
        assert_eq!(fb.get_pixel(1919, 1079), Some(Color::BLUE));
        assert_eq!(fb.count_color(Color::BLUE), 1920 * 1080);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::filled(100, 100, Color::WHITE).unwrap();
        fb.fill_rect(-10, -10, 20, 20, Color::RED);

        assert_eq!(fb.get_pixel(0, 0), Some(Color::RED));
        assert_eq!(fb.get_pixel(9, 9), Some(Color::RED));
        assert_eq!(fb.get_pixel(10, 10), Some(Color::WHITE));
        assert_eq!(fb.count_color(Color::RED), 100);
    }

    #[test]
    fn test_fill_span_inclusive() {
        let mut fb = Framebuffer::filled(10, 3, Color::WHITE).unwrap();
        fb.fill_span(2, 4, 1, Color::BLACK);
        assert_eq!(fb.count_color(Color::BLACK), 3);
        fb.fill_span(5, 4, 1, Color::RED);
        assert_eq!(fb.count_color(Color::RED), 0);
    }

    #[test]
    fn test_fill_span_extreme_ends() {
        let mut fb = Framebuffer::filled(10, 3, Color::WHITE).unwrap();
        fb.fill_span(i32::MIN, i32::MAX, 2, Color::GREEN);
        assert_eq!(fb.count_color(Color::GREEN), 10);
        fb.fill_span(i32::MIN, -1, 0, Color::RED);
        fb.fill_span(10, i32::MAX, 0, Color::RED);
        assert_eq!(fb.count_color(Color::RED), 0);
    }

    #[test]
    fn test_set_get_pixel_out_of_bounds() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.set_pixel(5, 5, Color::BLUE);
        fb.set_pixel(-1, 5, Color::BLUE);
        fb.set_pixel(5, 10, Color::BLUE);
        assert_eq!(fb.get_pixel(5, 5), Some(Color::BLUE));
        assert_eq!(fb.get_pixel(100, 100), None);
        assert_eq!(fb.count_color(Color::BLUE), 1);
    }

    #[test]
    fn test_blend_pixel_coverage() {
        let mut fb = Framebuffer::filled(4, 4, Color::WHITE).unwrap();
        fb.blend_pixel(1, 1, Color::BLACK, 0.5);
        let px = fb.get_pixel(1, 1).unwrap();
        assert!((i32::from(px.r) - 128).abs() <= 1);

        fb.blend_pixel(2, 2, Color::BLACK, 0.0);
        assert_eq!(fb.get_pixel(2, 2), Some(Color::WHITE));
    }

    #[test]
    fn test_blend_over_half() {
        let mut base = Framebuffer::filled(100, 100, Color::BLACK).unwrap();
        let top = Framebuffer::filled(100, 100, Color::WHITE).unwrap();

        base.blend_over(&top, 0.5).unwrap();

        let result = base.get_pixel(50, 50).unwrap();
        assert!((i32::from(result.r) - 128).abs() <= 1);
        assert_eq!(result.r, result.g);
        assert_eq!(result.g, result.b);
    }

    #[test]
    fn test_blend_over_identical_rows_unchanged() {
        let mut base = Framebuffer::filled(16, 4, Color::rgb(200, 100, 7)).unwrap();
        let top = base.clone();
        base.blend_over(&top, 0.3).unwrap();
        assert_eq!(base, top);
    }

    #[test]
    fn test_blend_over_dimension_mismatch() {
        let mut a = Framebuffer::new(10, 10).unwrap();
        let b = Framebuffer::new(10, 11).unwrap();
        assert!(a.blend_over(&b, 0.5).is_err());
    }

    #[test]
    fn test_rotate_ccw() {
        let mut fb = Framebuffer::filled(3, 2, Color::WHITE).unwrap();
        fb.set_pixel(2, 0, Color::RED);
        fb.set_pixel(0, 0, Color::BLUE);

        let rot = fb.rotate_ccw();
        assert_eq!(rot.width(), 2);
        assert_eq!(rot.height(), 3);
        assert_eq!(rot.get_pixel(0, 0), Some(Color::RED));
        assert_eq!(rot.get_pixel(0, 2), Some(Color::BLUE));
    }

    #[test]
    fn test_blit_requires_fit() {
        let mut dst = Framebuffer::filled(10, 10, Color::WHITE).unwrap();
        let src = Framebuffer::filled(3, 3, Color::GREEN).unwrap();

        assert!(dst.blit(&src, 7, 7));
        assert_eq!(dst.get_pixel(9, 9), Some(Color::GREEN));
        assert!(!dst.blit(&src, 8, 0));
        assert!(!dst.blit(&src, -1, 0));
        assert_eq!(dst.count_color(Color::GREEN), 9);
    }

    #[test]
    fn test_compact_pixels_len() {
        let fb = Framebuffer::new(7, 5).unwrap();
        assert_eq!(fb.to_compact_pixels().len(), 7 * 5 * 3);
    }
}
