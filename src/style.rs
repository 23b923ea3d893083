//! Stroke, fill and text styling.

use crate::color::Color;

/// Stroke and fill styling shared by the filled-shape commands.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeStyle {
    /// Outline color.
    pub stroke_color: Color,
    /// Outline width in pixels. `0` disables the outline.
    pub stroke_width: f32,
    /// Fill color.
    pub fill_color: Color,
    /// Fill opacity. `<= 0` skips the fill, `>= 1` fills opaquely,
    /// anything in between is alpha-composited.
    pub fill_alpha: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            stroke_width: 1.0,
            fill_color: Color::WHITE,
            fill_alpha: 1.0,
        }
    }
}

impl ShapeStyle {
    /// Create the default style: 1 px black outline, opaque white fill.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline-only style.
    #[must_use]
    pub fn outline(color: Color, width: f32) -> Self {
        Self { stroke_color: color, stroke_width: width, fill_alpha: 0.0, ..Self::default() }
    }

    /// Fill-only style.
    #[must_use]
    pub fn filled(color: Color, alpha: f32) -> Self {
        Self { fill_color: color, fill_alpha: alpha, stroke_width: 0.0, ..Self::default() }
    }

    /// Set the outline color.
    #[must_use]
    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    /// Set the outline width in pixels.
    #[must_use]
    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set the fill color.
    #[must_use]
    pub fn fill(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Set the fill opacity.
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.fill_alpha = alpha;
        self
    }

    /// How the fill of this style is painted.
    #[must_use]
    pub fn fill_mode(&self) -> FillMode {
        if self.fill_alpha >= 1.0 {
            FillMode::Opaque
        } else if self.fill_alpha > 0.0 {
            FillMode::Translucent(self.fill_alpha)
        } else {
            FillMode::None
        }
    }

    /// Whether an outline is drawn.
    #[must_use]
    pub fn has_stroke(&self) -> bool {
        self.stroke_width > 0.0
    }
}

/// Fill treatment derived from [`ShapeStyle::fill_alpha`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillMode {
    /// No fill.
    None,
    /// Fill rendered into a scratch buffer and composited with this weight.
    Translucent(f32),
    /// Fill drawn directly onto the canvas.
    Opaque,
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HAlign {
    /// Anchor at the left edge of the text box.
    #[default]
    Left,
    /// Anchor at the horizontal center.
    Center,
    /// Anchor at the right edge.
    Right,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VAlign {
    /// Anchor is the text baseline.
    #[default]
    Baseline,
    /// Anchor is the vertical center of the glyph box.
    Center,
    /// Anchor is the top of the glyph box.
    Top,
    /// Anchor is the bottom of the descenders.
    Bottom,
}

/// Styling for text annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font scale; `0.4` is the regular annotation size.
    pub font_scale: f64,
    /// Stroke thickness in pixels.
    pub thickness: u32,
    /// Horizontal alignment.
    pub halign: HAlign,
    /// Vertical alignment.
    pub valign: VAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font_scale: 0.4,
            thickness: 1,
            halign: HAlign::Left,
            valign: VAlign::Baseline,
        }
    }
}

impl TextStyle {
    /// Create the default text style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the font scale.
    #[must_use]
    pub fn font_scale(mut self, scale: f64) -> Self {
        self.font_scale = scale;
        self
    }

    /// Set the stroke thickness.
    #[must_use]
    pub fn thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set both alignments.
    #[must_use]
    pub fn align(mut self, halign: HAlign, valign: VAlign) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }
}
