//! Terminal output encoder (ASCII/Unicode/ANSI).
//!
//! Downsamples a rendered figure into text:
//! - ASCII: grayscale ramp ` .:-=+*#%@`, plain text suitable for files
//! - Unicode: half blocks (▀) with 24-bit color, two pixel rows per line
//! - ANSI: colored cells, one pixel row per line

use crate::color::Color;
use crate::framebuffer::Framebuffer;
use std::fmt::Write as FmtWrite;
use std::io;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    Ascii,
    /// Unicode half-block characters (2x vertical resolution)
    #[default]
    UnicodeHalfBlock,
    /// Colored cells with ANSI 24-bit background
    AnsiTrueColor,
}

/// Terminal encoder configuration.
#[derive(Debug, Clone)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    width: Option<u32>,
    height: Option<u32>,
    invert: bool,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// ASCII grayscale ramp from dark to light (10 levels).
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Default output width in characters.
    const DEFAULT_COLUMNS: u32 = 80;

    /// Create a new terminal encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { mode: TerminalMode::default(), width: None, height: None, invert: false }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the target width in characters.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the target height in lines; derived from the width when unset.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Invert the output (light on dark vs dark on light).
    #[must_use]
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// The configured mode.
    #[must_use]
    pub fn current_mode(&self) -> TerminalMode {
        self.mode
    }

    /// Render a framebuffer to a string.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        match self.mode {
            TerminalMode::Ascii => self.render_ascii(fb),
            TerminalMode::UnicodeHalfBlock => self.render_half_block(fb),
            TerminalMode::AnsiTrueColor => self.render_true_color(fb),
        }
    }

    /// Render and write to `out`.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to<W: io::Write>(&self, fb: &Framebuffer, out: &mut W) -> io::Result<()> {
        out.write_all(self.render(fb).as_bytes())?;
        out.flush()
    }

    fn render_ascii(&self, fb: &Framebuffer) -> String {
        let grid = Grid::new(fb, self.dimensions(fb, 2.0));
        let mut output = String::with_capacity((grid.cols + 1) as usize * grid.rows as usize);

        for y in 0..grid.rows {
            for x in 0..grid.cols {
                let luma = self.sample(fb, &grid, x, y).luminance();
                output.push(Self::ASCII_RAMP[Self::ramp_index(luma)]);
            }
            output.push('\n');
        }

        output
    }

    /// ▀ (U+2580) with the top pixel as foreground and the bottom as background.
    fn render_half_block(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.dimensions(fb, 1.0);
        // Round up to even height for half-blocks
        let grid = Grid::new(fb, (cols, (rows + 1) & !1));
        let mut output = String::with_capacity((grid.cols * 40 + 6) as usize * (grid.rows / 2) as usize);

        for y in (0..grid.rows).step_by(2) {
            for x in 0..grid.cols {
                let top = self.sample(fb, &grid, x, y);
                let bottom = self.sample(fb, &grid, x, y + 1);
                let _ = write!(
                    output,
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                    top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                );
            }
            output.push_str("\x1b[0m\n");
        }

        output
    }

    fn render_true_color(&self, fb: &Framebuffer) -> String {
        let grid = Grid::new(fb, self.dimensions(fb, 2.0));
        let mut output = String::with_capacity((grid.cols * 20 + 6) as usize * grid.rows as usize);

        for y in 0..grid.rows {
            for x in 0..grid.cols {
                let c = self.sample(fb, &grid, x, y);
                let _ = write!(output, "\x1b[48;2;{};{};{}m ", c.r, c.g, c.b);
            }
            output.push_str("\x1b[0m\n");
        }

        output
    }

    /// Output size in cells, preserving aspect ratio. `char_aspect` is the
    /// height/width ratio of one character cell.
    fn dimensions(&self, fb: &Framebuffer, char_aspect: f32) -> (u32, u32) {
        let fb_aspect = fb.width() as f32 / fb.height() as f32;

        match (self.width, self.height) {
            (Some(w), Some(h)) => (w.max(1), h.max(1)),
            (Some(w), None) => {
                let h = (w as f32 / fb_aspect / char_aspect).round() as u32;
                (w.max(1), h.max(1))
            }
            (None, Some(h)) => {
                let w = (h as f32 * fb_aspect * char_aspect).round() as u32;
                (w.max(1), h.max(1))
            }
            (None, None) => {
                let w = Self::DEFAULT_COLUMNS.min(fb.width());
                let h = (w as f32 / fb_aspect / char_aspect).round() as u32;
                (w, h.max(1))
            }
        }
    }

    /// Nearest-pixel sample for cell `(x, y)`.
    fn sample(&self, fb: &Framebuffer, grid: &Grid, x: u32, y: u32) -> Color {
        let fx = (x as f32 * grid.scale_x).min((fb.width() - 1) as f32);
        let fy = (y as f32 * grid.scale_y).min((fb.height() - 1) as f32);
        let pixel = fb.get_pixel(fx as u32, fy as u32).unwrap_or(Color::BLACK);

        if self.invert {
            Color::rgb(255 - pixel.r, 255 - pixel.g, 255 - pixel.b)
        } else {
            pixel
        }
    }

    fn ramp_index(luma: f32) -> usize {
        let idx = (luma * (Self::ASCII_RAMP.len() - 1) as f32).round() as usize;
        idx.min(Self::ASCII_RAMP.len() - 1)
    }
}

/// Cell grid and the pixel step per cell.
struct Grid {
    cols: u32,
    rows: u32,
    scale_x: f32,
    scale_y: f32,
}

impl Grid {
    fn new(fb: &Framebuffer, (cols, rows): (u32, u32)) -> Self {
        Self {
            cols,
            rows,
            scale_x: fb.width() as f32 / cols as f32,
            scale_y: fb.height() as f32 / rows as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, color: Color) -> Framebuffer {
        Framebuffer::filled(w, h, color).expect("framebuffer creation should succeed")
    }

    #[test]
    fn test_ascii_render_white() {
        let fb = solid(10, 10, Color::WHITE);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(5).render(&fb);

        assert!(output.contains('@'));
        assert!(!output.contains(' '));
    }

    #[test]
    fn test_ascii_render_black() {
        let fb = solid(10, 10, Color::BLACK);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(5).render(&fb);

        assert!(output.chars().filter(|&c| c != '\n').all(|c| c == ' '));
    }

    #[test]
    fn test_unicode_half_block_contains_ansi() {
        let fb = solid(10, 10, Color::RED);
        let output = TerminalEncoder::new().mode(TerminalMode::UnicodeHalfBlock).width(5).render(&fb);

        assert!(output.contains("\x1b[38;2;255;0;0m"));
        assert!(output.contains('▀'));
        assert!(output.contains("\x1b[0m"));
    }

    #[test]
    fn test_ansi_true_color_contains_escapes() {
        let fb = solid(10, 10, Color::BLUE);
        let output = TerminalEncoder::new().mode(TerminalMode::AnsiTrueColor).width(5).render(&fb);

        assert!(output.contains("48;2;0;0;255"));
    }

    #[test]
    fn test_invert_mode() {
        let fb = solid(10, 10, Color::WHITE);
        let output =
            TerminalEncoder::new().mode(TerminalMode::Ascii).width(5).invert(true).render(&fb);

        assert!(output.chars().filter(|&c| c != '\n').all(|c| c == ' '));
    }

    #[test]
    fn test_aspect_ratio_preservation() {
        let fb = solid(200, 100, Color::WHITE);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(40).render(&fb);

        // 2:1 image with 2:1 cells: 40 columns give 10 lines
        assert_eq!(output.lines().count(), 10);
    }

    #[test]
    fn test_custom_dimensions() {
        let fb = solid(100, 100, Color::WHITE);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(20).height(10).render(&fb);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0].len(), 20);
    }

    #[test]
    fn test_default_width_capped_at_80() {
        let fb = solid(1000, 100, Color::WHITE);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).render(&fb);
        let first_line = output.lines().next().expect("output should have a line");

        assert!(first_line.len() <= 80);
    }

    #[test]
    fn test_write_to_buffer() {
        let fb = solid(8, 8, Color::WHITE);
        let mut out = Vec::new();
        TerminalEncoder::new().mode(TerminalMode::Ascii).width(4).write_to(&fb, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "@@@@\n@@@@\n");
    }
}
