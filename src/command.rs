//! Retained drawing commands.
//!
//! A figure keeps an append-only list of [`Command`]s in data space. Each
//! carries its own geometry, style and legend label (empty means no legend
//! entry); the list order is the draw order.

use crate::bounds::Bounds;
use crate::color::Color;
use crate::style::{FillMode, ShapeStyle, TextStyle};
use log::debug;

/// One retained drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Polyline through consecutive points.
    Line {
        /// X coordinates.
        xs: Vec<f64>,
        /// Y coordinates.
        ys: Vec<f64>,
        /// Stroke color.
        color: Color,
        /// Stroke width in pixels.
        thickness: f32,
        /// Legend label.
        label: String,
    },
    /// One filled marker per point.
    Scatter {
        /// X coordinates.
        xs: Vec<f64>,
        /// Y coordinates.
        ys: Vec<f64>,
        /// Marker color.
        color: Color,
        /// Marker radius in pixels, independent of the axis scale.
        marker_size: f64,
        /// Legend label.
        label: String,
    },
    /// Text anchored at a data point.
    Text {
        /// Anchor x.
        x: f64,
        /// Anchor y.
        y: f64,
        /// The string to draw.
        text: String,
        /// Font, color and alignment.
        style: TextStyle,
        /// Legend label.
        label: String,
    },
    /// Circle with a data-space radius.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius (mapped with the x-axis factor).
        radius: f64,
        /// Stroke and fill.
        style: ShapeStyle,
        /// Legend label.
        label: String,
    },
    /// Axis-aligned rectangle given by two opposite corners.
    RectByCorners {
        /// First corner x.
        x1: f64,
        /// First corner y.
        y1: f64,
        /// Opposite corner x.
        x2: f64,
        /// Opposite corner y.
        y2: f64,
        /// Stroke and fill.
        style: ShapeStyle,
        /// Legend label.
        label: String,
    },
    /// Axis-aligned rectangle given by its lower-left corner and size.
    RectByOriginSize {
        /// Origin x.
        x: f64,
        /// Origin y.
        y: f64,
        /// Width.
        w: f64,
        /// Height.
        h: f64,
        /// Stroke and fill.
        style: ShapeStyle,
        /// Legend label.
        label: String,
    },
    /// Rectangle rotated about its center.
    RotatedRect {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Width before rotation.
        w: f64,
        /// Height before rotation.
        h: f64,
        /// Counter-clockwise rotation in degrees.
        angle_deg: f64,
        /// Stroke and fill.
        style: ShapeStyle,
        /// Legend label.
        label: String,
    },
    /// Closed polygon.
    Polygon {
        /// Vertex x coordinates.
        xs: Vec<f64>,
        /// Vertex y coordinates.
        ys: Vec<f64>,
        /// Stroke and fill.
        style: ShapeStyle,
        /// Legend label.
        label: String,
    },
    /// Ellipse rotated about its center.
    Ellipse {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Full width (x diameter before rotation).
        w: f64,
        /// Full height (y diameter before rotation).
        h: f64,
        /// Counter-clockwise rotation in degrees.
        angle_deg: f64,
        /// Stroke and fill.
        style: ShapeStyle,
        /// Legend label.
        label: String,
    },
}

/// Legend glyph for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    /// Short horizontal stroke.
    Segment,
    /// Filled dot.
    Dot,
    /// Filled rectangle.
    Block,
}

impl Command {
    /// Short variant name for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Scatter { .. } => "scatter",
            Self::Text { .. } => "text",
            Self::Circle { .. } => "circle",
            Self::RectByCorners { .. } | Self::RectByOriginSize { .. } => "rect",
            Self::RotatedRect { .. } => "rotated_rect",
            Self::Polygon { .. } => "polygon",
            Self::Ellipse { .. } => "ellipse",
        }
    }

    /// Legend label; empty when the command has no legend entry.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Line { label, .. }
            | Self::Scatter { label, .. }
            | Self::Text { label, .. }
            | Self::Circle { label, .. }
            | Self::RectByCorners { label, .. }
            | Self::RectByOriginSize { label, .. }
            | Self::RotatedRect { label, .. }
            | Self::Polygon { label, .. }
            | Self::Ellipse { label, .. } => label,
        }
    }

    /// Replace the legend label.
    #[must_use]
    pub fn with_label(mut self, new_label: impl Into<String>) -> Self {
        match &mut self {
            Self::Line { label, .. }
            | Self::Scatter { label, .. }
            | Self::Text { label, .. }
            | Self::Circle { label, .. }
            | Self::RectByCorners { label, .. }
            | Self::RectByOriginSize { label, .. }
            | Self::RotatedRect { label, .. }
            | Self::Polygon { label, .. }
            | Self::Ellipse { label, .. } => *label = new_label.into(),
        }
        self
    }

    /// Legend glyph shape.
    #[must_use]
    pub fn swatch(&self) -> Swatch {
        match self {
            Self::Line { .. } => Swatch::Segment,
            Self::Scatter { .. } | Self::Circle { .. } => Swatch::Dot,
            _ => Swatch::Block,
        }
    }

    /// Color used for the legend glyph.
    ///
    /// Shapes use their fill when it is painted, otherwise their stroke.
    #[must_use]
    pub fn legend_color(&self) -> Color {
        match self {
            Self::Line { color, .. } | Self::Scatter { color, .. } => *color,
            Self::Text { style, .. } => style.color,
            Self::Circle { style, .. }
            | Self::RectByCorners { style, .. }
            | Self::RectByOriginSize { style, .. }
            | Self::RotatedRect { style, .. }
            | Self::Polygon { style, .. }
            | Self::Ellipse { style, .. } => {
                if style.fill_mode() == FillMode::None {
                    style.stroke_color
                } else {
                    style.fill_color
                }
            }
        }
    }

    /// Whether the geometry is usable; malformed commands are never stored.
    ///
    /// Coordinate sequences must have equal lengths and a polygon needs at
    /// least one vertex.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Line { xs, ys, .. } | Self::Scatter { xs, ys, .. } => xs.len() == ys.len(),
            Self::Polygon { xs, ys, .. } => !xs.is_empty() && xs.len() == ys.len(),
            _ => true,
        }
    }

    /// Widen `bounds` by every point this command can touch.
    ///
    /// Rotated shapes use their circumscribing circle, which over-covers
    /// elongated shapes but holds for every angle. Text never moves the
    /// bounds.
    pub fn expand_bounds(&self, bounds: &mut Bounds) {
        match self {
            Self::Line { xs, ys, .. } | Self::Scatter { xs, ys, .. } | Self::Polygon { xs, ys, .. } => {
                bounds.expand_all(xs, ys);
            }
            Self::Text { .. } => {}
            Self::Circle { cx, cy, radius, .. } => bounds.expand_radius(*cx, *cy, *radius),
            Self::RectByCorners { x1, y1, x2, y2, .. } => {
                bounds.expand(*x1, *y1);
                bounds.expand(*x2, *y2);
            }
            Self::RectByOriginSize { x, y, w, h, .. } => {
                bounds.expand(*x, *y);
                bounds.expand(x + w, y + h);
            }
            Self::RotatedRect { cx, cy, w, h, .. } => {
                bounds.expand_radius(*cx, *cy, 0.5 * w.hypot(*h));
            }
            Self::Ellipse { cx, cy, w, h, .. } => {
                bounds.expand_radius(*cx, *cy, 0.5 * w.abs().max(h.abs()));
            }
        }
        debug!("bounds after {}: {:?}", self.kind(), bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle(label: &str) -> Command {
        Command::Circle {
            cx: 1.0,
            cy: 2.0,
            radius: 0.5,
            style: ShapeStyle::default(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_label_and_with_label() {
        let c = circle("");
        assert_eq!(c.label(), "");
        let c = c.with_label("disc");
        assert_eq!(c.label(), "disc");
        assert_eq!(c.kind(), "circle");
    }

    #[test]
    fn test_swatch_by_kind() {
        let line = Command::Line {
            xs: vec![],
            ys: vec![],
            color: Color::BLUE,
            thickness: 1.0,
            label: String::new(),
        };
        assert_eq!(line.swatch(), Swatch::Segment);
        assert_eq!(circle("").swatch(), Swatch::Dot);
        let poly = Command::Polygon {
            xs: vec![0.0],
            ys: vec![0.0],
            style: ShapeStyle::default(),
            label: String::new(),
        };
        assert_eq!(poly.swatch(), Swatch::Block);
    }

    #[test]
    fn test_legend_color_prefers_fill() {
        let filled = Command::RectByCorners {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
            style: ShapeStyle::filled(Color::GREEN, 0.5),
            label: String::new(),
        };
        assert_eq!(filled.legend_color(), Color::GREEN);

        let outline = Command::RectByCorners {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
            style: ShapeStyle::outline(Color::RED, 2.0),
            label: String::new(),
        };
        assert_eq!(outline.legend_color(), Color::RED);
    }

    #[test]
    fn test_well_formed() {
        let bad = Command::Scatter {
            xs: vec![1.0, 2.0],
            ys: vec![1.0],
            color: Color::RED,
            marker_size: 4.0,
            label: String::new(),
        };
        assert!(!bad.is_well_formed());

        let empty_poly = Command::Polygon {
            xs: vec![],
            ys: vec![],
            style: ShapeStyle::default(),
            label: String::new(),
        };
        assert!(!empty_poly.is_well_formed());
        assert!(circle("").is_well_formed());
    }

    #[test]
    fn test_rotated_rect_uses_circumscribing_circle() {
        let cmd = Command::RotatedRect {
            cx: 0.0,
            cy: 0.0,
            w: 6.0,
            h: 8.0,
            angle_deg: 30.0,
            style: ShapeStyle::default(),
            label: String::new(),
        };
        let mut b = Bounds::new();
        cmd.expand_bounds(&mut b);
        assert_relative_eq!(b.xmax, 5.0);
        assert_relative_eq!(b.ymin, -5.0);
    }

    #[test]
    fn test_ellipse_bounds_use_larger_axis() {
        let cmd = Command::Ellipse {
            cx: 1.0,
            cy: 1.0,
            w: 4.0,
            h: 2.0,
            angle_deg: 90.0,
            style: ShapeStyle::default(),
            label: String::new(),
        };
        let mut b = Bounds::new();
        cmd.expand_bounds(&mut b);
        assert_eq!((b.xmin, b.xmax, b.ymin, b.ymax), (-1.0, 3.0, -1.0, 3.0));
    }

    #[test]
    fn test_text_does_not_expand_bounds() {
        let cmd = Command::Text {
            x: 100.0,
            y: 100.0,
            text: "note".to_string(),
            style: TextStyle::default(),
            label: String::new(),
        };
        let mut b = Bounds::new();
        cmd.expand_bounds(&mut b);
        assert!(!b.valid());
    }

    #[test]
    fn test_rect_by_origin_size_bounds() {
        let cmd = Command::RectByOriginSize {
            x: 1.0,
            y: 2.0,
            w: 3.0,
            h: -4.0,
            style: ShapeStyle::default(),
            label: String::new(),
        };
        let mut b = Bounds::new();
        cmd.expand_bounds(&mut b);
        assert_eq!((b.xmin, b.xmax, b.ymin, b.ymax), (1.0, 4.0, -2.0, 2.0));
    }
}
