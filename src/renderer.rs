//! The deferred render pass.
//!
//! [`Renderer::render`] turns a [`Frame`] (commands, axis state, labels) into
//! pixels in a fixed order: resolve the axis rectangle, generate ticks,
//! clear, grid, axes and ticks, commands, legend, then title and axis labels.

use crate::axis::{Axis, AxisRect};
use crate::bounds::Bounds;
use crate::color::Color;
use crate::command::Command;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::{PixelPoint, PixelRect, Point};
use crate::legend::{self, LegendLocation};
use crate::render::{
    draw_circle, draw_line, draw_polyline, draw_rect_outline, draw_ring, draw_text,
    ellipse_vertices, fill_polygon, measure_text, render_label, rotated_rect_vertices,
    stroke_polygon,
};
use crate::scale::{CoordinateMapper, Layout};
use crate::style::{FillMode, HAlign, ShapeStyle, TextStyle, VAlign};
use crate::ticks::{make_ticks, TickSet, DEFAULT_TICK_TARGET};
use log::trace;
use std::time::Instant;

/// Font scale of tick labels.
const TICK_FONT_SCALE: f64 = 0.4;
/// Font scale of the title.
const TITLE_FONT_SCALE: f64 = 0.6;
/// Font scale of the axis labels.
const LABEL_FONT_SCALE: f64 = 0.5;
/// Baseline of the title.
const TITLE_BASELINE: i32 = 25;
/// Distance of the x-label baseline from the bottom edge.
const XLABEL_BOTTOM: i32 = 10;
/// Distance of the rotated y-label from the left edge of the plot area.
const YLABEL_LEFT: i32 = 55;
/// Offset of x tick label baselines below the axis.
const XTICK_LABEL_DY: i32 = 18;
/// Gap between a y tick mark and its label.
const YTICK_LABEL_GAP: i32 = 3;

/// Everything the render pass reads.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Retained commands in draw order.
    pub commands: &'a [Command],
    /// Base rectangle and policy.
    pub axis: &'a Axis,
    /// Accumulated data bounds.
    pub bounds: &'a Bounds,
    /// Title drawn above the plot.
    pub title: &'a str,
    /// Label under the x axis.
    pub xlabel: &'a str,
    /// Label left of the y axis, drawn rotated.
    pub ylabel: &'a str,
    /// Legend position, `None` when the legend is off.
    pub legend: Option<LegendLocation>,
}

/// Derived state of one completed pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    /// Mapper built from the resolved rectangle.
    pub mapper: CoordinateMapper,
    /// Ticks along x.
    pub xticks: TickSet,
    /// Ticks along y.
    pub yticks: TickSet,
}

impl RenderPass {
    /// The resolved axis rectangle.
    #[must_use]
    pub fn rect(&self) -> AxisRect {
        self.mapper.rect()
    }
}

/// Rotated y-label bitmap, recomputed only after invalidation.
#[derive(Debug, Clone, Default)]
struct RotatedLabel {
    text: String,
    image: Option<Framebuffer>,
    valid: bool,
    rotations: usize,
}

impl RotatedLabel {
    fn get(&mut self, text: &str) -> Option<&Framebuffer> {
        if !self.valid || self.text != text {
            self.image = render_label(text, LABEL_FONT_SCALE, Color::BLACK, Color::WHITE)
                .map(|fb| fb.rotate_ccw());
            self.text = text.to_string();
            self.valid = true;
            self.rotations += 1;
            trace!("y-label rotated ({} chars)", text.len());
        }
        self.image.as_ref()
    }
}

/// Render pass driver carrying the layout and cached label bitmaps.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    layout: Layout,
    ylabel: RotatedLabel,
}

impl Renderer {
    /// Create a renderer with the given layout.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self { layout, ylabel: RotatedLabel::default() }
    }

    /// The margin layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Drop the cached rotated y-label.
    pub fn invalidate_ylabel(&mut self) {
        self.ylabel.valid = false;
    }

    /// Number of times the y-label bitmap has been rotated.
    #[must_use]
    pub fn ylabel_rotations(&self) -> usize {
        self.ylabel.rotations
    }

    /// Run one full pass into `fb`.
    ///
    /// # Errors
    ///
    /// Returns an error if compositing a translucent fill fails.
    pub fn render(&mut self, fb: &mut Framebuffer, frame: &Frame<'_>) -> Result<RenderPass> {
        let start = Instant::now();
        let (width, height) = (fb.width(), fb.height());

        let rect = frame.axis.resolve(
            frame.bounds,
            f64::from(self.layout.plot_width(width)),
            f64::from(self.layout.plot_height(height)),
        );
        let mapper = CoordinateMapper::new(rect, self.layout, width, height);
        let pass = RenderPass {
            mapper,
            xticks: make_ticks(rect.xmin, rect.xmax, DEFAULT_TICK_TARGET),
            yticks: make_ticks(rect.ymin, rect.ymax, DEFAULT_TICK_TARGET),
        };

        fb.clear(Color::WHITE);
        if frame.axis.policy().grid {
            self.draw_grid(fb, &pass);
        }
        self.draw_axes(fb, &pass);

        for cmd in frame.commands {
            draw_command(fb, &pass.mapper, cmd)?;
        }

        if let Some(location) = frame.legend {
            let entries = legend::collect_entries(frame.commands);
            if let Some(lbox) = legend::place(&entries, location, &self.layout, width, height) {
                legend::draw(fb, &entries, &lbox);
            }
        }

        self.draw_labels(fb, frame, &pass.mapper.plot_rect());

        trace!(
            "render: {} commands into {}x{} in {:?}, rect {:?}",
            frame.commands.len(),
            width,
            height,
            start.elapsed(),
            rect
        );
        Ok(pass)
    }

    fn draw_grid(&self, fb: &mut Framebuffer, pass: &RenderPass) {
        let plot = pass.mapper.plot_rect();
        for x in pass.xticks.values() {
            let px = pass.mapper.to_pixel(x, 0.0).x;
            draw_line(fb, px, plot.y, px, plot.bottom(), Color::GRID_GRAY);
        }
        for y in pass.yticks.values() {
            let py = pass.mapper.to_pixel(0.0, y).y;
            draw_line(fb, plot.x, py, plot.right(), py, Color::GRID_GRAY);
        }
    }

    fn draw_axes(&self, fb: &mut Framebuffer, pass: &RenderPass) {
        let plot = pass.mapper.plot_rect();
        let (left, bottom) = (plot.x, plot.bottom());
        let tick = self.layout.tick_length;

        draw_line(fb, left, bottom, plot.right(), bottom, Color::BLACK);
        draw_line(fb, left, plot.y, left, bottom, Color::BLACK);

        for t in &pass.xticks.ticks {
            let px = pass.mapper.to_pixel(t.value, 0.0).x;
            draw_line(fb, px, bottom, px, bottom + tick, Color::BLACK);
            let w = measure_text(&t.label, TICK_FONT_SCALE, 1).width;
            draw_text(fb, &t.label, px - w / 2, bottom + XTICK_LABEL_DY, TICK_FONT_SCALE, 1, Color::BLACK);
        }

        for t in &pass.yticks.ticks {
            let py = pass.mapper.to_pixel(0.0, t.value).y;
            draw_line(fb, left - tick, py, left, py, Color::BLACK);
            let m = measure_text(&t.label, TICK_FONT_SCALE, 1);
            let x = left - tick - YTICK_LABEL_GAP - m.width;
            draw_text(fb, &t.label, x, py + m.height / 2, TICK_FONT_SCALE, 1, Color::BLACK);
        }
    }

    fn draw_labels(&mut self, fb: &mut Framebuffer, frame: &Frame<'_>, plot: &PixelRect) {
        if !frame.title.is_empty() {
            draw_text(
                fb,
                frame.title,
                self.layout.title_offset,
                TITLE_BASELINE,
                TITLE_FONT_SCALE,
                1,
                Color::BLACK,
            );
        }

        if !frame.xlabel.is_empty() {
            let w = measure_text(frame.xlabel, LABEL_FONT_SCALE, 1).width;
            let x = plot.x + (plot.width - w) / 2;
            let baseline = fb.height() as i32 - XLABEL_BOTTOM;
            draw_text(fb, frame.xlabel, x, baseline, LABEL_FONT_SCALE, 1, Color::BLACK);
        }

        if !frame.ylabel.is_empty() {
            if let Some(img) = self.ylabel.get(frame.ylabel) {
                let x = plot.x - YLABEL_LEFT;
                let y = plot.y + (plot.height - img.height() as i32) / 2;
                if !fb.blit(img, x, y) {
                    trace!("y-label does not fit at ({x}, {y}), skipped");
                }
            }
        }
    }
}

// ============================================================================
// Command dispatch
// ============================================================================

fn draw_command(fb: &mut Framebuffer, mapper: &CoordinateMapper, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Line { xs, ys, color, thickness, .. } => {
            for run in finite_runs(mapper, xs, ys) {
                draw_polyline(fb, &run, *thickness, *color, true);
            }
        }
        Command::Scatter { xs, ys, color, marker_size, .. } => {
            let radius = marker_size.round() as i32;
            for run in finite_runs(mapper, xs, ys) {
                for p in run {
                    draw_circle(fb, p.x as i32, p.y as i32, radius, *color);
                }
            }
        }
        Command::Text { x, y, text, style, .. } => {
            if x.is_finite() && y.is_finite() {
                draw_aligned_text(fb, mapper.to_pixel(*x, *y), text, style);
            }
        }
        Command::Circle { cx, cy, radius, style, .. } => {
            let c = mapper.to_pixel(*cx, *cy);
            let r = mapper.x_len(*radius).abs().round() as i32;
            paint(
                fb,
                style,
                |fb, color| draw_circle(fb, c.x, c.y, r, color),
                |fb, color, width| draw_ring(fb, c.x, c.y, r, width, color),
            )?;
        }
        Command::RectByCorners { x1, y1, x2, y2, style, .. } => {
            let r = PixelRect::from_corners(mapper.to_pixel(*x1, *y1), mapper.to_pixel(*x2, *y2));
            paint_rect(fb, style, r)?;
        }
        Command::RectByOriginSize { x, y, w, h, style, .. } => {
            let r = PixelRect::from_corners(mapper.to_pixel(*x, *y), mapper.to_pixel(x + w, y + h));
            paint_rect(fb, style, r)?;
        }
        Command::RotatedRect { cx, cy, w, h, angle_deg, style, .. } => {
            let c = Point::from(mapper.to_pixel(*cx, *cy));
            // the Y flip turns counter-clockwise data angles clockwise
            let verts = rotated_rect_vertices(c, mapper.x_len(*w), mapper.y_len(*h), -angle_deg.to_radians());
            paint_polygon(fb, style, &verts)?;
        }
        Command::Polygon { xs, ys, style, .. } => {
            let verts: Vec<Point> = xs
                .iter()
                .zip(ys)
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|(&x, &y)| Point::from(mapper.to_pixel(x, y)))
                .collect();
            paint_polygon(fb, style, &verts)?;
        }
        Command::Ellipse { cx, cy, w, h, angle_deg, style, .. } => {
            let c = Point::from(mapper.to_pixel(*cx, *cy));
            let verts = ellipse_vertices(
                c,
                0.5 * mapper.x_len(*w),
                0.5 * mapper.y_len(*h),
                -angle_deg.to_radians(),
            );
            paint_polygon(fb, style, &verts)?;
        }
    }
    Ok(())
}

/// Pixel positions of consecutive finite points; a non-finite point splits
/// the sequence.
fn finite_runs(mapper: &CoordinateMapper, xs: &[f64], ys: &[f64]) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (&x, &y) in xs.iter().zip(ys) {
        if x.is_finite() && y.is_finite() {
            current.push(Point::from(mapper.to_pixel(x, y)));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn draw_aligned_text(fb: &mut Framebuffer, anchor: PixelPoint, text: &str, style: &TextStyle) {
    let m = measure_text(text, style.font_scale, style.thickness);
    let x = match style.halign {
        HAlign::Left => anchor.x,
        HAlign::Center => anchor.x - m.width / 2,
        HAlign::Right => anchor.x - m.width,
    };
    let y = match style.valign {
        VAlign::Baseline => anchor.y,
        VAlign::Center => anchor.y + m.height / 2,
        VAlign::Top => anchor.y + m.height,
        VAlign::Bottom => anchor.y - m.descent,
    };
    draw_text(fb, text, x, y, style.font_scale, style.thickness, style.color);
}

/// Fill, then stroke on top at full opacity.
///
/// Translucent fills are drawn into a copy of the canvas and composited
/// back so the outline stays exactly `stroke_color`.
fn paint<F, S>(fb: &mut Framebuffer, style: &ShapeStyle, fill: F, stroke: S) -> Result<()>
where
    F: Fn(&mut Framebuffer, Color),
    S: Fn(&mut Framebuffer, Color, f32),
{
    match style.fill_mode() {
        FillMode::None => {}
        FillMode::Opaque => fill(fb, style.fill_color),
        FillMode::Translucent(alpha) => {
            let mut scratch = fb.clone();
            fill(&mut scratch, style.fill_color);
            fb.blend_over(&scratch, alpha)?;
        }
    }
    if style.has_stroke() {
        stroke(fb, style.stroke_color, style.stroke_width);
    }
    Ok(())
}

fn paint_rect(fb: &mut Framebuffer, style: &ShapeStyle, r: PixelRect) -> Result<()> {
    paint(
        fb,
        style,
        |fb, color| fb.fill_rect(r.x, r.y, r.width, r.height, color),
        |fb, color, width| {
            draw_rect_outline(fb, r.x, r.y, r.width, r.height, color, width.round().max(1.0) as i32);
        },
    )
}

fn paint_polygon(fb: &mut Framebuffer, style: &ShapeStyle, verts: &[Point]) -> Result<()> {
    if verts.is_empty() {
        return Ok(());
    }
    paint(
        fb,
        style,
        |fb, color| fill_polygon(fb, verts, color),
        |fb, color, width| stroke_polygon(fb, verts, width, color),
    )
}
