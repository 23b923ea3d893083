//! The figure facade.
//!
//! A [`Figure`] owns the retained command list, the data bounds, the axis
//! state and the pixel buffer. Mutations are cheap and only mark the figure
//! dirty; [`Figure::render`] redraws lazily, and `show`/`save` hand the
//! buffer to a sink.
//!
//! # Example
//!
//! ```
//! use trueno_figure::prelude::*;
//!
//! let mut fig = Figure::new(640, 480).unwrap();
//! fig.plot(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0], Color::BLUE, 2.0, "y = x^2");
//! fig.scatter(vec![1.0], vec![1.0], Color::RED, 4.0, "");
//! fig.title("demo");
//! fig.legend(true, "northWest");
//! fig.render().unwrap();
//! assert!(!fig.is_dirty());
//! ```

use crate::axis::{Axis, AxisPolicy, AxisRect};
use crate::bounds::Bounds;
use crate::color::Color;
use crate::command::Command;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::legend::{self, LegendEntry, LegendLocation};
use crate::output::{encode_to_file, Display, TerminalDisplay};
use crate::renderer::{Frame, RenderPass, Renderer};
use crate::scale::{CoordinateMapper, Layout};
use crate::style::{ShapeStyle, TextStyle};
use crate::ticks::TickSet;
use batuta_common::display::WithDimensions;
use log::{debug, trace, warn};
use std::path::Path;

/// Default canvas width.
pub const DEFAULT_WIDTH: u32 = 640;
/// Default canvas height.
pub const DEFAULT_HEIGHT: u32 = 480;
/// Default polyline color.
pub const DEFAULT_LINE_COLOR: Color = Color::BLUE;
/// Default marker color.
pub const DEFAULT_MARKER_COLOR: Color = Color::RED;
/// Default marker radius in pixels.
pub const DEFAULT_MARKER_SIZE: f64 = 4.0;

/// Retained-mode 2-D plotting canvas.
#[derive(Debug, Clone)]
pub struct Figure {
    fb: Framebuffer,
    commands: Vec<Command>,
    bounds: Bounds,
    axis: Axis,
    title: String,
    xlabel: String,
    ylabel: String,
    legend: Option<LegendLocation>,
    renderer: Renderer,
    last_pass: Option<RenderPass>,
    dirty: bool,
}

impl Figure {
    /// Create a figure with the default margin layout.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the margins leave no plot
    /// area.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_layout(width, height, Layout::default())
    }

    /// Create a figure with a custom margin layout.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or the margins leave no plot
    /// area.
    pub fn with_layout(width: u32, height: u32, layout: Layout) -> Result<Self> {
        layout.validate(width, height)?;
        Ok(Self {
            fb: Framebuffer::filled(width, height, Color::WHITE)?,
            commands: Vec::new(),
            bounds: Bounds::new(),
            axis: Axis::new(),
            title: String::new(),
            xlabel: String::new(),
            ylabel: String::new(),
            legend: None,
            renderer: Renderer::new(layout),
            last_pass: None,
            dirty: true,
        })
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Append a command.
    ///
    /// Malformed geometry (mismatched coordinate lengths, an empty polygon)
    /// is dropped; returns whether the command was kept.
    pub fn add(&mut self, command: Command) -> bool {
        if !command.is_well_formed() {
            debug!("ignoring malformed {} command", command.kind());
            return false;
        }
        command.expand_bounds(&mut self.bounds);
        self.commands.push(command);
        self.dirty = true;
        true
    }

    /// Polyline through `(xs[i], ys[i])`.
    pub fn plot(
        &mut self,
        xs: impl Into<Vec<f64>>,
        ys: impl Into<Vec<f64>>,
        color: Color,
        thickness: f32,
        label: &str,
    ) {
        self.add(Command::Line {
            xs: xs.into(),
            ys: ys.into(),
            color,
            thickness,
            label: label.to_string(),
        });
    }

    /// Filled marker of `marker_size` pixels radius at each point.
    pub fn scatter(
        &mut self,
        xs: impl Into<Vec<f64>>,
        ys: impl Into<Vec<f64>>,
        color: Color,
        marker_size: f64,
        label: &str,
    ) {
        self.add(Command::Scatter {
            xs: xs.into(),
            ys: ys.into(),
            color,
            marker_size,
            label: label.to_string(),
        });
    }

    /// Text annotation anchored at a data point. Does not affect autoscale.
    pub fn text(&mut self, x: f64, y: f64, text: &str, style: TextStyle, label: &str) {
        self.add(Command::Text { x, y, text: text.to_string(), style, label: label.to_string() });
    }

    /// Circle with a data-space radius.
    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64, style: ShapeStyle, label: &str) {
        self.add(Command::Circle { cx, cy, radius, style, label: label.to_string() });
    }

    /// Rectangle between two opposite corners.
    pub fn rect_ltrb(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: ShapeStyle, label: &str) {
        self.add(Command::RectByCorners { x1, y1, x2, y2, style, label: label.to_string() });
    }

    /// Rectangle from its lower-left corner and size.
    pub fn rect_xywh(&mut self, x: f64, y: f64, w: f64, h: f64, style: ShapeStyle, label: &str) {
        self.add(Command::RectByOriginSize { x, y, w, h, style, label: label.to_string() });
    }

    /// Rectangle centered on `(cx, cy)`, rotated counter-clockwise by
    /// `angle_deg`.
    pub fn rotated_rect(
        &mut self,
        cx: f64,
        cy: f64,
        w: f64,
        h: f64,
        angle_deg: f64,
        style: ShapeStyle,
        label: &str,
    ) {
        self.add(Command::RotatedRect { cx, cy, w, h, angle_deg, style, label: label.to_string() });
    }

    /// Closed polygon through `(xs[i], ys[i])`.
    pub fn polygon(
        &mut self,
        xs: impl Into<Vec<f64>>,
        ys: impl Into<Vec<f64>>,
        style: ShapeStyle,
        label: &str,
    ) {
        self.add(Command::Polygon { xs: xs.into(), ys: ys.into(), style, label: label.to_string() });
    }

    /// Ellipse of full width `w` and height `h`, rotated counter-clockwise by
    /// `angle_deg`.
    pub fn ellipse(
        &mut self,
        cx: f64,
        cy: f64,
        w: f64,
        h: f64,
        angle_deg: f64,
        style: ShapeStyle,
        label: &str,
    ) {
        self.add(Command::Ellipse { cx, cy, w, h, angle_deg, style, label: label.to_string() });
    }

    // ========================================================================
    // Axis policy and labels
    // ========================================================================

    /// Fix the x range and disable autoscale.
    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        if self.axis.set_xlim(lo, hi, &self.bounds) {
            self.dirty = true;
        }
    }

    /// Fix the y range and disable autoscale.
    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        if self.axis.set_ylim(lo, hi, &self.bounds) {
            self.dirty = true;
        }
    }

    /// Toggle autoscale.
    pub fn autoscale(&mut self, on: bool) {
        self.axis.set_autoscale(on, &self.bounds);
        self.dirty = true;
    }

    /// Toggle equal data units per pixel on both axes.
    pub fn equal_scale(&mut self, on: bool) {
        self.axis.set_equal_scale(on);
        self.dirty = true;
    }

    /// Set the padding fraction (negative values become zero).
    pub fn axis_pad(&mut self, frac: f64) {
        self.axis.set_pad(frac);
        self.dirty = true;
    }

    /// Fit the data without padding.
    pub fn axis_tight(&mut self) {
        self.axis_pad(0.0);
    }

    /// Toggle grid lines.
    pub fn grid(&mut self, on: bool) {
        self.axis.set_grid(on);
        self.dirty = true;
    }

    /// Set the title.
    pub fn title(&mut self, text: &str) {
        self.title = text.to_string();
        self.dirty = true;
    }

    /// Set the x-axis label.
    pub fn xlabel(&mut self, text: &str) {
        self.xlabel = text.to_string();
        self.dirty = true;
    }

    /// Set the y-axis label.
    pub fn ylabel(&mut self, text: &str) {
        self.ylabel = text.to_string();
        self.renderer.invalidate_ylabel();
        self.dirty = true;
    }

    /// Toggle the legend, placed by keyword (`"northEast"`, `"south"`, ...).
    ///
    /// Unknown keywords fall back to `southEast`.
    pub fn legend(&mut self, on: bool, location: &str) {
        let location = on.then(|| LegendLocation::from_keyword(location));
        self.set_legend(location);
    }

    /// Toggle the legend at a typed location.
    pub fn legend_at(&mut self, on: bool, location: LegendLocation) {
        self.set_legend(on.then_some(location));
    }

    fn set_legend(&mut self, location: Option<LegendLocation>) {
        self.legend = location;
        self.dirty = true;
    }

    // ========================================================================
    // Rendering and sinks
    // ========================================================================

    /// Redraw the buffer if anything changed since the last render.
    ///
    /// # Errors
    ///
    /// Returns an error if the render pass fails; the figure stays dirty.
    pub fn render(&mut self) -> Result<()> {
        if !self.dirty {
            trace!("render skipped, figure is clean");
            return Ok(());
        }

        let frame = Frame {
            commands: &self.commands,
            axis: &self.axis,
            bounds: &self.bounds,
            title: &self.title,
            xlabel: &self.xlabel,
            ylabel: &self.ylabel,
            legend: self.legend,
        };
        let pass = self.renderer.render(&mut self.fb, &frame)?;
        self.last_pass = Some(pass);
        self.dirty = false;
        Ok(())
    }

    /// Render and show on the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing to stdout fails.
    pub fn show(&mut self, name: &str) -> Result<()> {
        self.show_on(&mut TerminalDisplay::stdout(), name)
    }

    /// Render and hand the buffer to `display`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or the display fails; retained state is
    /// unaffected either way.
    pub fn show_on<D: Display + ?Sized>(&mut self, display: &mut D, name: &str) -> Result<()> {
        self.render()?;
        display.show(name, &self.fb)
    }

    /// Render and encode to `path`; the extension picks the format.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, encoding or writing fails; the figure
    /// is left clean and can be saved again.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.render()?;
        encode_to_file(path.as_ref(), &self.fb)?;
        debug!("saved figure to {}", path.as_ref().display());
        Ok(())
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Canvas width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.fb.width()
    }

    /// Canvas height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.fb.height()
    }

    /// The pixel buffer as of the last render.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    /// Whether the figure changed since the last successful render.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Retained commands in draw order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Accumulated data bounds.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Current axis policy.
    #[must_use]
    pub fn policy(&self) -> &AxisPolicy {
        self.axis.policy()
    }

    /// Margin layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        self.renderer.layout()
    }

    /// Axis rectangle of the last render, if any.
    #[must_use]
    pub fn axis_rect(&self) -> Option<AxisRect> {
        self.last_pass.as_ref().map(RenderPass::rect)
    }

    /// Coordinate mapper of the last render, if any.
    #[must_use]
    pub fn mapper(&self) -> Option<&CoordinateMapper> {
        self.last_pass.as_ref().map(|p| &p.mapper)
    }

    /// `(x, y)` ticks of the last render, if any.
    #[must_use]
    pub fn ticks(&self) -> Option<(&TickSet, &TickSet)> {
        self.last_pass.as_ref().map(|p| (&p.xticks, &p.yticks))
    }

    /// Legend rows derived from the labelled commands.
    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry<'_>> {
        legend::collect_entries(&self.commands)
    }

    /// Legend location, `None` while the legend is off.
    #[must_use]
    pub fn legend_location(&self) -> Option<LegendLocation> {
        self.legend
    }

    /// Number of times the y-label bitmap was rebuilt.
    #[must_use]
    pub fn ylabel_rotations(&self) -> usize {
        self.renderer.ylabel_rotations()
    }
}

impl WithDimensions for Figure {
    /// Reallocate the canvas; sizes that leave no plot area are ignored.
    fn set_dimensions(&mut self, width: u32, height: u32) {
        if let Err(e) = self.layout().validate(width, height) {
            warn!("ignoring resize to {width}x{height}: {e}");
            return;
        }
        match Framebuffer::filled(width, height, Color::WHITE) {
            Ok(fb) => {
                self.fb = fb;
                self.last_pass = None;
                self.dirty = true;
            }
            Err(e) => warn!("ignoring resize to {width}x{height}: {e}"),
        }
    }
}
