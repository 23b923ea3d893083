//! Data-to-pixel mapping.
//!
//! A [`Layout`] reserves fixed pixel margins around the plot area; a
//! [`CoordinateMapper`] maps data space into that area for one resolved
//! [`AxisRect`], flipping Y so larger values sit higher on the canvas.

use crate::axis::AxisRect;
use crate::error::{Error, Result};
use crate::geometry::{PixelPoint, PixelRect};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale. The domain must have non-zero extent.
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 }
    }

    /// Range units per domain unit.
    #[must_use]
    pub fn factor(&self) -> f64 {
        (self.range_max - self.range_min) / (self.domain_max - self.domain_min)
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Pixel insets around the plot area and related layout constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    /// Space left of the plot area (y tick labels, y label).
    pub margin_left: i32,
    /// Space right of the plot area.
    pub margin_right: i32,
    /// Space above the plot area (title).
    pub margin_top: i32,
    /// Space below the plot area (x tick labels, x label).
    pub margin_bottom: i32,
    /// Tick mark length in pixels.
    pub tick_length: i32,
    /// Horizontal inset of the title from the left edge.
    pub title_offset: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            margin_left: 60,
            margin_right: 20,
            margin_top: 40,
            margin_bottom: 60,
            tick_length: 5,
            title_offset: 50,
        }
    }
}

impl Layout {
    /// Create the default layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all four margins.
    #[must_use]
    pub fn margins(mut self, left: i32, right: i32, top: i32, bottom: i32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    /// Set the tick mark length.
    #[must_use]
    pub fn tick_length(mut self, length: i32) -> Self {
        self.tick_length = length;
        self
    }

    /// Set the title inset.
    #[must_use]
    pub fn title_offset(mut self, offset: i32) -> Self {
        self.title_offset = offset;
        self
    }

    /// Plot area width for a canvas `width` pixels wide.
    #[must_use]
    pub fn plot_width(&self, width: u32) -> i32 {
        width as i32 - self.margin_left - self.margin_right
    }

    /// Plot area height for a canvas `height` pixels tall.
    #[must_use]
    pub fn plot_height(&self, height: u32) -> i32 {
        height as i32 - self.margin_top - self.margin_bottom
    }

    /// Check that a canvas of this size leaves a positive plot area.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] otherwise.
    pub fn validate(&self, width: u32, height: u32) -> Result<()> {
        let fits = width > 0
            && height > 0
            && width <= i32::MAX as u32
            && height <= i32::MAX as u32
            && self.margin_left >= 0
            && self.margin_right >= 0
            && self.margin_top >= 0
            && self.margin_bottom >= 0
            && self.plot_width(width) > 0
            && self.plot_height(height) > 0;
        if fits {
            Ok(())
        } else {
            Err(Error::InvalidDimensions { width, height })
        }
    }
}

// ============================================================================
// Coordinate Mapper
// ============================================================================

/// Maps data space into the plot area of a canvas for one axis rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    rect: AxisRect,
    layout: Layout,
    width: i32,
    height: i32,
    x: LinearScale,
    y: LinearScale,
}

impl CoordinateMapper {
    /// Build a mapper for a `width x height` canvas.
    ///
    /// A zero-width axis in `rect` is widened first so the mapping is always
    /// finite.
    #[must_use]
    pub fn new(rect: AxisRect, layout: Layout, width: u32, height: u32) -> Self {
        let rect = rect.non_degenerate();
        let plot_w = f64::from(layout.plot_width(width));
        let plot_h = f64::from(layout.plot_height(height));
        Self {
            rect,
            layout,
            width: width as i32,
            height: height as i32,
            x: LinearScale::new((rect.xmin, rect.xmax), (0.0, plot_w)),
            y: LinearScale::new((rect.ymin, rect.ymax), (0.0, plot_h)),
        }
    }

    /// The axis rectangle this mapper was built for.
    #[must_use]
    pub fn rect(&self) -> AxisRect {
        self.rect
    }

    /// The margin layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Plot area in pixel space.
    #[must_use]
    pub fn plot_rect(&self) -> PixelRect {
        PixelRect::new(
            self.layout.margin_left,
            self.layout.margin_top,
            self.width - self.layout.margin_left - self.layout.margin_right,
            self.height - self.layout.margin_top - self.layout.margin_bottom,
        )
    }

    /// Map a data point to a pixel, rounding half up.
    #[must_use]
    pub fn to_pixel(&self, x: f64, y: f64) -> PixelPoint {
        PixelPoint::new(
            self.layout.margin_left + round_half_up(self.x.scale(x)),
            self.height - self.layout.margin_bottom - round_half_up(self.y.scale(y)),
        )
    }

    /// Pixels per data unit along x.
    #[must_use]
    pub fn x_factor(&self) -> f64 {
        self.x.factor()
    }

    /// Pixels per data unit along y.
    #[must_use]
    pub fn y_factor(&self) -> f64 {
        self.y.factor()
    }

    /// Map a data-space length along x to pixels.
    #[must_use]
    pub fn x_len(&self, len: f64) -> f64 {
        len * self.x_factor()
    }

    /// Map a data-space length along y to pixels.
    #[must_use]
    pub fn y_len(&self, len: f64) -> f64 {
        len * self.y_factor()
    }
}

fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}
