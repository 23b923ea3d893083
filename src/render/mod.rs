//! Rasterization of primitives and text.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: thin polylines with sub-pixel accuracy
//! - **Bresenham's Line**: one-pixel strokes, axes and tick marks
//! - **Capsule segments**: thick strokes with round caps and joins
//! - **Midpoint Circle**: filled discs and outlines
//! - **Even-odd scanline fill**: polygons, rotated rectangles, ellipses
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;
pub mod text;

pub use primitives::{
    draw_circle, draw_circle_outline, draw_line, draw_line_aa, draw_polyline, draw_rect,
    draw_rect_outline, draw_ring, draw_thick_line, ellipse_vertices, fill_polygon,
    rotated_rect_vertices, stroke_polygon, Drawable,
};
pub use text::{draw_text, measure_text, render_label, TextMetrics};
