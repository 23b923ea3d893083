//! Legend collection, placement and drawing.

use crate::color::Color;
use crate::command::{Command, Swatch};
use crate::framebuffer::Framebuffer;
use crate::geometry::{PixelPoint, PixelRect, Point};
use crate::render::{draw_circle, draw_rect_outline, draw_text, draw_thick_line, measure_text, Drawable};
use crate::scale::Layout;
use log::warn;

/// Font scale for legend labels.
pub const LEGEND_FONT_SCALE: f64 = 0.4;
/// Width of the swatch column.
const SWATCH_W: i32 = 20;
/// Gap between swatch and label.
const TEXT_GAP: i32 = 8;
/// Space right of the widest label.
const RIGHT_PAD: i32 = 10;
/// Inset of the swatch from the box edge, and half the vertical padding.
const INSET: i32 = 5;
/// Extra height per row beyond the text height.
const ROW_PAD: i32 = 6;
/// Radius of the dot swatch.
const DOT_RADIUS: i32 = 4;
/// Half height of the block swatch.
const BLOCK_HALF_H: i32 = 4;

/// Where the legend box sits inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegendLocation {
    /// Top-left corner.
    NorthWest,
    /// Top edge, centered.
    North,
    /// Top-right corner.
    #[default]
    NorthEast,
    /// Left edge, centered.
    West,
    /// Center of the plot area.
    Center,
    /// Right edge, centered.
    East,
    /// Bottom-left corner.
    SouthWest,
    /// Bottom edge, centered.
    South,
    /// Bottom-right corner.
    SouthEast,
}

impl LegendLocation {
    /// Location used when a keyword is not recognised.
    pub const FALLBACK: Self = Self::SouthEast;

    /// Every location, row by row from the top-left.
    pub const ALL: [Self; 9] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::West,
        Self::Center,
        Self::East,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
    ];

    /// Parse a keyword such as `"northEast"`, ignoring ASCII case.
    #[must_use]
    pub fn parse(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|loc| loc.keyword().eq_ignore_ascii_case(keyword.trim()))
    }

    /// Parse a keyword, falling back to [`Self::FALLBACK`] with a warning.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        Self::parse(keyword).unwrap_or_else(|| {
            warn!("unknown legend location {keyword:?}, using {}", Self::FALLBACK.keyword());
            Self::FALLBACK
        })
    }

    /// Canonical keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::NorthWest => "northWest",
            Self::North => "north",
            Self::NorthEast => "northEast",
            Self::West => "west",
            Self::Center => "center",
            Self::East => "east",
            Self::SouthWest => "southWest",
            Self::South => "south",
            Self::SouthEast => "southEast",
        }
    }
}

/// One legend row, derived from a labelled command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry<'a> {
    /// Label text.
    pub label: &'a str,
    /// Glyph shape.
    pub swatch: Swatch,
    /// Glyph color.
    pub color: Color,
}

/// Entries for every command with a non-empty label, in command order.
///
/// Duplicate labels are kept.
#[must_use]
pub fn collect_entries(commands: &[Command]) -> Vec<LegendEntry<'_>> {
    commands
        .iter()
        .filter(|c| !c.label().is_empty())
        .map(|c| LegendEntry { label: c.label(), swatch: c.swatch(), color: c.legend_color() })
        .collect()
}

/// Pixel placement of the legend box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendBox {
    /// Outer rectangle.
    pub rect: PixelRect,
    /// Height of one row.
    pub line_height: i32,
}

impl LegendBox {
    /// Vertical center of row `i`.
    #[must_use]
    pub fn row_center(&self, i: usize) -> i32 {
        self.rect.y + INSET + (i as i32) * self.line_height + self.line_height / 2
    }
}

/// Box size `(width, height, line_height)` needed for `entries`.
#[must_use]
pub fn measure(entries: &[LegendEntry<'_>]) -> (i32, i32, i32) {
    let mut max_w = 0;
    let mut text_h = 0;
    for e in entries {
        let m = measure_text(e.label, LEGEND_FONT_SCALE, 1);
        max_w = max_w.max(m.width);
        text_h = text_h.max(m.height);
    }
    let line_height = text_h + ROW_PAD;
    let width = SWATCH_W + TEXT_GAP + max_w + RIGHT_PAD;
    let height = line_height * entries.len() as i32 + 2 * INSET;
    (width, height, line_height)
}

/// Top-left corner of a `box_w x box_h` legend at `location`.
#[must_use]
pub fn anchor(
    location: LegendLocation,
    box_w: i32,
    box_h: i32,
    layout: &Layout,
    width: u32,
    height: u32,
) -> PixelPoint {
    let left = layout.margin_left;
    let right = width as i32 - layout.margin_right - box_w;
    let top = layout.margin_top;
    let bottom = height as i32 - layout.margin_bottom - box_h;
    let hmid = left + (layout.plot_width(width) - box_w) / 2;
    let vmid = top + (layout.plot_height(height) - box_h) / 2;

    let (x, y) = match location {
        LegendLocation::NorthWest => (left, top),
        LegendLocation::North => (hmid, top),
        LegendLocation::NorthEast => (right, top),
        LegendLocation::West => (left, vmid),
        LegendLocation::Center => (hmid, vmid),
        LegendLocation::East => (right, vmid),
        LegendLocation::SouthWest => (left, bottom),
        LegendLocation::South => (hmid, bottom),
        LegendLocation::SouthEast => (right, bottom),
    };
    PixelPoint::new(x, y)
}

/// Compute the legend box, or `None` when there is nothing to show.
#[must_use]
pub fn place(
    entries: &[LegendEntry<'_>],
    location: LegendLocation,
    layout: &Layout,
    width: u32,
    height: u32,
) -> Option<LegendBox> {
    if entries.is_empty() {
        return None;
    }
    let (box_w, box_h, line_height) = measure(entries);
    let origin = anchor(location, box_w, box_h, layout, width, height);
    Some(LegendBox { rect: PixelRect::new(origin.x, origin.y, box_w, box_h), line_height })
}

/// Draw the box, swatches and labels.
pub fn draw(fb: &mut Framebuffer, entries: &[LegendEntry<'_>], lbox: &LegendBox) {
    let r = lbox.rect;
    r.draw(fb, Color::WHITE);
    draw_rect_outline(fb, r.x, r.y, r.width, r.height, Color::BLACK, 1);

    let sx = r.x + INSET;
    for (i, entry) in entries.iter().enumerate() {
        let y = lbox.row_center(i);
        match entry.swatch {
            Swatch::Segment => draw_thick_line(
                fb,
                Point::new(f64::from(sx), f64::from(y)),
                Point::new(f64::from(sx + SWATCH_W), f64::from(y)),
                2.0,
                entry.color,
            ),
            Swatch::Dot => draw_circle(fb, sx + SWATCH_W / 2, y, DOT_RADIUS, entry.color),
            Swatch::Block => PixelRect::from_corners(
                PixelPoint::new(sx, y - BLOCK_HALF_H),
                PixelPoint::new(sx + SWATCH_W, y + BLOCK_HALF_H),
            )
            .draw(fb, entry.color),
        }
        draw_text(fb, entry.label, sx + SWATCH_W + TEXT_GAP, y + 4, LEGEND_FONT_SCALE, 1, Color::BLACK);
    }
}
