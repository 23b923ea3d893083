//! Primitive rendering functions.
//!
//! Implements rasterization algorithms for the shapes a figure draws. All
//! coordinates are pixel space; anything outside the framebuffer is clipped.

use crate::color::Color;
use crate::framebuffer::Framebuffer;
use crate::geometry::{PixelPoint, PixelRect, Point};

/// Trait for drawable primitives.
pub trait Drawable {
    /// Draw this primitive to a framebuffer.
    fn draw(&self, fb: &mut Framebuffer, color: Color);
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm (non-antialiased).
///
/// Segments reaching outside the framebuffer are clipped first, so the cost
/// is bounded by the visible part.
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `x0`, `y0` - Start coordinates
/// * `x1`, `y1` - End coordinates
/// * `color` - Line color
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let (w, h) = (fb.width() as i32, fb.height() as i32);
    let inside = |x: i32, y: i32| (0..w).contains(&x) && (0..h).contains(&y);
    if inside(x0, y0) && inside(x1, y1) {
        bresenham(fb, x0, y0, x1, y1, color);
        return;
    }

    let p0 = Point::new(f64::from(x0), f64::from(y0));
    let p1 = Point::new(f64::from(x1), f64::from(y1));
    let hi = Point::new(f64::from(w - 1), f64::from(h - 1));
    if let Some((a, b)) = clip_segment(p0, p1, Point::ORIGIN, hi) {
        bresenham(
            fb,
            a.x.round() as i32,
            a.y.round() as i32,
            b.x.round() as i32,
            b.y.round() as i32,
            color,
        );
    }
}

fn bresenham(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        fb.set_pixel(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Clip the segment `p0`-`p1` to the rectangle spanned by `lo` and `hi`
/// (Liang-Barsky).
///
/// Returns `None` when the segment misses the rectangle or a coordinate is
/// not finite.
fn clip_segment(p0: Point, p1: Point, lo: Point, hi: Point) -> Option<(Point, Point)> {
    if ![p0.x, p0.y, p1.x, p1.y].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, p0.x - lo.x), (dx, hi.x - p0.x), (-dy, p0.y - lo.y), (dy, hi.y - p0.y)] {
        if p == 0.0 {
            // parallel to this edge
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    Some((Point::new(p0.x + t0 * dx, p0.y + t0 * dy), Point::new(p0.x + t1 * dx, p0.y + t1 * dy)))
}

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Two pixels are plotted at each step along the major axis, weighted by
/// the fractional distance from the ideal line position. The segment is
/// clipped to a one-pixel border around the framebuffer before stepping.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
    let lo = Point::new(-1.0, -1.0);
    let hi = Point::new(f64::from(fb.width()), f64::from(fb.height()));
    let p0 = Point::new(f64::from(x0), f64::from(y0));
    let p1 = Point::new(f64::from(x1), f64::from(y1));
    let Some((a, b)) = clip_segment(p0, p1, lo, hi) else {
        return;
    };
    let (x0, y0, x1, y1) = (a.x as f32, a.y as f32, b.x as f32, b.y as f32);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };

    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { dy / dx };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i32;
    let ypxl1 = yend.floor() as i32;

    if steep {
        plot(fb, ypxl1, xpxl1, color, rfpart(yend) * xgap);
        plot(fb, ypxl1 + 1, xpxl1, color, fpart(yend) * xgap);
    } else {
        plot(fb, xpxl1, ypxl1, color, rfpart(yend) * xgap);
        plot(fb, xpxl1, ypxl1 + 1, color, fpart(yend) * xgap);
    }

    let mut intery = yend + gradient;

    // Second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i32;
    let ypxl2 = yend.floor() as i32;

    if steep {
        plot(fb, ypxl2, xpxl2, color, rfpart(yend) * xgap);
        plot(fb, ypxl2 + 1, xpxl2, color, fpart(yend) * xgap);
    } else {
        plot(fb, xpxl2, ypxl2, color, rfpart(yend) * xgap);
        plot(fb, xpxl2, ypxl2 + 1, color, fpart(yend) * xgap);
    }

    if steep {
        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            plot(fb, ipart, x, color, rfpart(intery));
            plot(fb, ipart + 1, x, color, fpart(intery));
            intery += gradient;
        }
    } else {
        for x in (xpxl1 + 1)..xpxl2 {
            let ipart = intery.floor() as i32;
            plot(fb, x, ipart, color, rfpart(intery));
            plot(fb, x, ipart + 1, color, fpart(intery));
            intery += gradient;
        }
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Color, intensity: f32) {
    fb.blend_pixel(x, y, color, intensity);
}

/// Fractional part of a float.
#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// Reverse fractional part.
#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

/// Draw a solid segment of the given width with round caps.
///
/// Widths of one pixel or less fall back to Bresenham. Wider segments are
/// rasterized as capsules, so consecutive segments of a polyline meet in
/// round joins and every covered pixel carries exactly `color`.
pub fn draw_thick_line(fb: &mut Framebuffer, p0: Point, p1: Point, width: f32, color: Color) {
    if width <= 1.0 {
        draw_line(
            fb,
            p0.x.round() as i32,
            p0.y.round() as i32,
            p1.x.round() as i32,
            p1.y.round() as i32,
            color,
        );
        return;
    }

    if ![p0.x, p0.y, p1.x, p1.y].iter().all(|v| v.is_finite()) {
        return;
    }

    let half = f64::from(width) / 2.0;
    let x_lo = (p0.x.min(p1.x) - half).floor().max(0.0) as i32;
    let x_hi = (p0.x.max(p1.x) + half).ceil().min(f64::from(fb.width()) - 1.0) as i32;
    let y_lo = (p0.y.min(p1.y) - half).floor().max(0.0) as i32;
    let y_hi = (p0.y.max(p1.y) + half).ceil().min(f64::from(fb.height()) - 1.0) as i32;

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let p = Point::new(f64::from(x), f64::from(y));
            if distance_to_segment(p, p0, p1) <= half {
                fb.set_pixel(x, y, color);
            }
        }
    }
}

/// Draw an open polyline through `points`.
///
/// With `antialias` set and a width of at most one pixel, segments use Wu's
/// algorithm; otherwise they are solid.
pub fn draw_polyline(fb: &mut Framebuffer, points: &[Point], width: f32, color: Color, antialias: bool) {
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if antialias && width <= 1.0 {
            draw_line_aa(fb, a.x as f32, a.y as f32, b.x as f32, b.y as f32, color);
        } else {
            draw_thick_line(fb, a, b, width, color);
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len_sq = abx * abx + aby * aby;
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * abx, a.y + t * aby))
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: i32, height: i32, color: Color) {
    fb.fill_rect(x, y, width, height, color);
}

/// Draw a rectangle outline.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    color: Color,
    thickness: i32,
) {
    if width <= 0 || height <= 0 {
        return;
    }
    let thickness = thickness.max(1);

    // Top edge
    fb.fill_rect(x, y, width, thickness, color);
    // Bottom edge
    if height > thickness {
        fb.fill_rect(x, y + height - thickness, width, thickness, color);
    }
    // Left edge
    if height > 2 * thickness {
        fb.fill_rect(x, y + thickness, thickness, height - 2 * thickness, color);
    }
    // Right edge
    if width > thickness && height > 2 * thickness {
        fb.fill_rect(x + width - thickness, y + thickness, thickness, height - 2 * thickness, color);
    }
}

impl Drawable for PixelRect {
    fn draw(&self, fb: &mut Framebuffer, color: Color) {
        draw_rect(fb, self.x, self.y, self.width, self.height, color);
    }
}

impl Drawable for PixelPoint {
    fn draw(&self, fb: &mut Framebuffer, color: Color) {
        fb.set_pixel(self.x, self.y, color);
    }
}

// ============================================================================
// Circle Drawing
// ============================================================================

/// Draw a filled circle covering every pixel within `radius` of the center.
///
/// Only rows inside the framebuffer are visited, so circles far larger than
/// the canvas cost no more than filling it.
///
/// # Arguments
///
/// * `fb` - Target framebuffer
/// * `cx`, `cy` - Center coordinates
/// * `radius` - Circle radius in pixels
/// * `color` - Fill color
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Color) {
    if radius < 0 {
        return;
    }
    let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(radius));
    let Some((y_lo, y_hi)) = visible_rows(fb, cx, cy, r) else {
        return;
    };

    let r_sq = (r * r) as f64;
    for y in y_lo..=y_hi {
        let dy = y - cy;
        let rem = r_sq - (dy * dy) as f64;
        if rem >= 0.0 {
            let half = rem.sqrt().floor() as i64;
            clipped_span(fb, cx - half, cx + half, y, color);
        }
    }
}

/// Draw a one-pixel circle outline.
pub fn draw_circle_outline(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Color) {
    if radius <= 0 {
        if radius == 0 {
            fb.set_pixel(cx, cy, color);
        }
        return;
    }
    if visible_rows(fb, cx.into(), cy.into(), radius.into()).is_none() {
        return;
    }
    // past the canvas size the midpoint walk would mostly step off-screen
    if i64::from(radius) > i64::from(fb.width()) + i64::from(fb.height()) {
        let r = f64::from(radius);
        fill_annulus(fb, cx.into(), cy.into(), r - 0.5, r + 0.5, color);
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        // 8 octant points
        fb.set_pixel(cx + x, cy + y, color);
        fb.set_pixel(cx - x, cy + y, color);
        fb.set_pixel(cx + x, cy - y, color);
        fb.set_pixel(cx - x, cy - y, color);
        fb.set_pixel(cx + y, cy + x, color);
        fb.set_pixel(cx - y, cy + x, color);
        fb.set_pixel(cx + y, cy - x, color);
        fb.set_pixel(cx - y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a circle outline of the given stroke width.
///
/// The ring covers every pixel whose distance from the center is within
/// `width / 2` of `radius`.
pub fn draw_ring(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, width: f32, color: Color) {
    if width <= 1.0 {
        draw_circle_outline(fb, cx, cy, radius, color);
        return;
    }

    let half = f64::from(width) / 2.0;
    let r = f64::from(radius.max(0));
    fill_annulus(fb, cx.into(), cy.into(), (r - half).max(0.0), r + half, color);
}

/// Fill the pixels whose distance from `(cx, cy)` lies in `[inner, outer]`,
/// one or two spans per visible row.
fn fill_annulus(fb: &mut Framebuffer, cx: i64, cy: i64, inner: f64, outer: f64, color: Color) {
    let Some((y_lo, y_hi)) = visible_rows(fb, cx, cy, outer.ceil() as i64) else {
        return;
    };
    let (inner_sq, outer_sq) = (inner * inner, outer * outer);

    for y in y_lo..=y_hi {
        let dy_sq = ((y - cy) * (y - cy)) as f64;
        if dy_sq > outer_sq {
            continue;
        }
        let xo = (outer_sq - dy_sq).sqrt().floor() as i64;
        let rem = inner_sq - dy_sq;
        if rem <= 0.0 {
            clipped_span(fb, cx - xo, cx + xo, y, color);
        } else {
            let xi = rem.sqrt().ceil() as i64;
            if xi <= xo {
                clipped_span(fb, cx - xo, cx - xi, y, color);
                clipped_span(fb, cx + xi, cx + xo, y, color);
            }
        }
    }
}

/// Rows of the framebuffer touched by a circle of pixel radius `reach`, or
/// `None` if its bounding box misses the canvas.
fn visible_rows(fb: &Framebuffer, cx: i64, cy: i64, reach: i64) -> Option<(i64, i64)> {
    let (w, h) = (i64::from(fb.width()), i64::from(fb.height()));
    if cx + reach < 0 || cx - reach >= w || cy + reach < 0 || cy - reach >= h {
        return None;
    }
    Some(((cy - reach).max(0), (cy + reach).min(h - 1)))
}

/// `fill_span` for 64-bit coordinates, clipped to the canvas first.
fn clipped_span(fb: &mut Framebuffer, x0: i64, x1: i64, y: i64, color: Color) {
    let x0 = x0.max(0);
    let x1 = x1.min(i64::from(fb.width()) - 1);
    if x0 <= x1 && (0..i64::from(fb.height())).contains(&y) {
        fb.fill_span(x0 as i32, x1 as i32, y as i32, color);
    }
}

// ============================================================================
// Polygon Drawing
// ============================================================================

/// Fill a simple or self-intersecting polygon with the even-odd rule.
///
/// Pixel centers are sampled on each scanline; fewer than three vertices
/// fill nothing.
pub fn fill_polygon(fb: &mut Framebuffer, vertices: &[Point], color: Color) {
    if vertices.len() < 3 {
        return;
    }

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in vertices {
        y_min = y_min.min(v.y);
        y_max = y_max.max(v.y);
    }
    let row_lo = y_min.floor().max(0.0) as i32;
    let row_hi = y_max.ceil().min(f64::from(fb.height()) - 1.0) as i32;

    let mut crossings: Vec<f64> = Vec::with_capacity(vertices.len());
    for row in row_lo..=row_hi {
        let sy = f64::from(row);
        crossings.clear();

        for (i, a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            if (a.y <= sy && b.y > sy) || (b.y <= sy && a.y > sy) {
                let t = (sy - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }

        crossings.sort_by(f64::total_cmp);
        for span in crossings.chunks_exact(2) {
            let x0 = span[0].ceil() as i32;
            let x1 = span[1].floor() as i32;
            fb.fill_span(x0, x1, row, color);
        }
    }
}

/// Stroke the closed outline through `vertices`.
pub fn stroke_polygon(fb: &mut Framebuffer, vertices: &[Point], width: f32, color: Color) {
    match vertices {
        [] => {}
        [only] => draw_thick_line(fb, *only, *only, width, color),
        _ => {
            draw_polyline(fb, vertices, width, color, false);
            if let (Some(&first), Some(&last)) = (vertices.first(), vertices.last()) {
                draw_thick_line(fb, last, first, width, color);
            }
        }
    }
}

/// Corners of a rectangle of size `w` x `h` centered on `center` and rotated
/// by `angle` radians (positive turns from +x toward +y).
#[must_use]
pub fn rotated_rect_vertices(center: Point, w: f64, h: f64, angle: f64) -> [Point; 4] {
    let (sin, cos) = angle.sin_cos();
    let (hw, hh) = (w / 2.0, h / 2.0);
    [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(dx, dy)| {
        Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
    })
}

/// Polygon approximation of an ellipse with semi-axes `rx`, `ry`, rotated by
/// `angle` radians.
///
/// The segment count grows with the larger semi-axis so large ellipses stay
/// smooth.
#[must_use]
pub fn ellipse_vertices(center: Point, rx: f64, ry: f64, angle: f64) -> Vec<Point> {
    let segments = ((rx.abs().max(ry.abs()) * 0.75).ceil() as usize).clamp(16, 360);
    let (sin, cos) = angle.sin_cos();

    (0..segments)
        .map(|i| {
            let t = std::f64::consts::TAU * (i as f64) / (segments as f64);
            let (ex, ey) = (rx * t.cos(), ry * t.sin());
            Point::new(center.x + ex * cos - ey * sin, center.y + ex * sin + ey * cos)
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn white(w: u32, h: u32) -> Framebuffer {
        Framebuffer::filled(w, h, Color::WHITE).expect("framebuffer creation should succeed")
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = white(100, 100);

        draw_line(&mut fb, 10, 50, 90, 50, Color::BLACK);

        assert_eq!(fb.get_pixel(10, 50), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(90, 50), Some(Color::BLACK));
        assert_eq!(fb.count_color(Color::BLACK), 81);
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut fb = white(100, 100);

        draw_line(&mut fb, 10, 10, 90, 90, Color::BLACK);

        assert_eq!(fb.get_pixel(10, 10), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(90, 90), Some(Color::BLACK));
    }

    #[test]
    fn test_line_out_of_bounds() {
        let mut fb = white(100, 100);

        draw_line(&mut fb, -10, -10, 110, 110, Color::BLACK);

        assert_eq!(fb.get_pixel(50, 50), Some(Color::BLACK));
    }

    #[test]
    fn test_draw_line_aa_darkens_path() {
        let mut fb = white(100, 100);

        draw_line_aa(&mut fb, 10.0, 10.0, 90.0, 50.0, Color::BLACK);

        let px = fb.get_pixel(50, 30).unwrap();
        assert!(px.r < 255);
        assert_eq!(fb.get_pixel(50, 80), Some(Color::WHITE));
    }

    #[test]
    fn test_thick_line_exact_color() {
        let mut fb = white(50, 50);

        draw_thick_line(&mut fb, Point::new(10.0, 25.0), Point::new(40.0, 25.0), 4.0, Color::RED);

        for y in 23..=27 {
            assert_eq!(fb.get_pixel(25, y), Some(Color::RED), "row {y}");
        }
        assert_eq!(fb.get_pixel(25, 20), Some(Color::WHITE));
        // round cap extends past the endpoint
        assert_eq!(fb.get_pixel(8, 25), Some(Color::RED));
    }

    #[test]
    fn test_polyline_needs_two_points() {
        let mut fb = white(20, 20);
        draw_polyline(&mut fb, &[Point::new(5.0, 5.0)], 1.0, Color::BLACK, true);
        assert_eq!(fb.count_color(Color::WHITE), 400);
    }

    #[test]
    fn test_draw_rect() {
        let mut fb = white(100, 100);

        draw_rect(&mut fb, 20, 20, 30, 30, Color::RED);

        assert_eq!(fb.get_pixel(25, 25), Some(Color::RED));
        assert_eq!(fb.get_pixel(10, 10), Some(Color::WHITE));
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut fb = white(100, 100);

        draw_rect_outline(&mut fb, 20, 20, 30, 30, Color::RED, 2);

        assert_eq!(fb.get_pixel(20, 20), Some(Color::RED));
        assert_eq!(fb.get_pixel(49, 49), Some(Color::RED));
        assert_eq!(fb.get_pixel(35, 35), Some(Color::WHITE));
    }

    #[test]
    fn test_drawable_pixel_rect() {
        let mut fb = white(40, 40);
        PixelRect::new(5, 5, 10, 4).draw(&mut fb, Color::GREEN);
        assert_eq!(fb.count_color(Color::GREEN), 40);
    }

    #[test]
    fn test_draw_circle() {
        let mut fb = white(100, 100);

        draw_circle(&mut fb, 50, 50, 20, Color::BLUE);

        assert_eq!(fb.get_pixel(50, 50), Some(Color::BLUE));
        assert_eq!(fb.get_pixel(70, 50), Some(Color::BLUE));
        assert_eq!(fb.get_pixel(5, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_draw_circle_outline() {
        let mut fb = white(100, 100);

        draw_circle_outline(&mut fb, 50, 50, 20, Color::GREEN);

        assert_eq!(fb.get_pixel(70, 50), Some(Color::GREEN));
        assert_eq!(fb.get_pixel(50, 50), Some(Color::WHITE));
    }

    #[test]
    fn test_circle_zero_radius() {
        let mut fb = white(10, 10);
        draw_circle(&mut fb, 5, 5, 0, Color::RED);
        assert_eq!(fb.count_color(Color::RED), 1);
    }

    #[test]
    fn test_ring_covers_circle_edge() {
        let mut fb = white(100, 100);
        draw_circle(&mut fb, 50, 50, 20, Color::BLUE);
        draw_ring(&mut fb, 50, 50, 20, 2.0, Color::BLACK);

        assert_eq!(fb.get_pixel(70, 50), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(30, 50), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Color::BLUE));
    }

    #[test]
    fn test_huge_ring_only_touches_visible_arc() {
        let mut fb = white(100, 100);
        // top of the ring passes through row 50
        draw_ring(&mut fb, 50, 100_050, 100_000, 2.0, Color::BLACK);

        assert_eq!(fb.get_pixel(50, 50), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(50, 10), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(50, 90), Some(Color::WHITE));

        draw_ring(&mut fb, 0, 0, i32::MAX, 4.0, Color::RED);
        draw_ring(&mut fb, i32::MIN, i32::MAX, i32::MAX, 4.0, Color::RED);
        assert_eq!(fb.count_color(Color::RED), 0);
    }

    #[test]
    fn test_circle_larger_than_canvas_fills_it() {
        let mut fb = white(64, 48);
        draw_circle(&mut fb, 32, 24, i32::MAX, Color::RED);
        assert_eq!(fb.count_color(Color::RED), 64 * 48);

        let mut fb = white(64, 48);
        draw_circle(&mut fb, i32::MAX, i32::MIN, 1_000, Color::RED);
        assert_eq!(fb.count_color(Color::RED), 0);
    }

    #[test]
    fn test_huge_thin_outline_is_clipped() {
        let mut fb = white(100, 100);
        draw_circle_outline(&mut fb, 50, 1_000_050, 1_000_000, Color::GREEN);
        assert_eq!(fb.get_pixel(50, 50), Some(Color::GREEN));
        assert!(fb.count_color(Color::GREEN) < 300);
    }

    #[test]
    fn test_far_offscreen_lines_are_clipped() {
        let mut fb = white(100, 100);
        draw_line(&mut fb, -2_000_000_000, 10, 2_000_000_000, 10, Color::BLACK);
        assert_eq!(fb.count_color(Color::BLACK), 100);

        draw_line(&mut fb, -5_000, -5_000, -10, 3_000, Color::RED);
        assert_eq!(fb.count_color(Color::RED), 0);

        draw_line_aa(&mut fb, -1.0e9, 50.0, 1.0e9, 50.0, Color::BLUE);
        assert_eq!(fb.get_pixel(0, 50), Some(Color::BLUE));
        assert_eq!(fb.get_pixel(99, 50), Some(Color::BLUE));

        draw_line_aa(&mut fb, f32::NAN, 0.0, 50.0, 50.0, Color::RED);
        assert_eq!(fb.count_color(Color::RED), 0);
    }

    #[test]
    fn test_clip_segment() {
        let (lo, hi) = (Point::ORIGIN, Point::new(10.0, 10.0));

        let (a, b) = clip_segment(Point::new(-10.0, 5.0), Point::new(30.0, 5.0), lo, hi).unwrap();
        assert_eq!((a, b), (Point::new(0.0, 5.0), Point::new(10.0, 5.0)));

        let inside = (Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        assert_eq!(clip_segment(inside.0, inside.1, lo, hi), Some(inside));

        assert!(clip_segment(Point::new(-5.0, -1.0), Point::new(20.0, -1.0), lo, hi).is_none());
        assert!(clip_segment(Point::new(-5.0, 20.0), Point::new(20.0, 12.0), lo, hi).is_none());
    }

    #[test]
    fn test_fill_polygon_triangle() {
        let mut fb = white(50, 50);
        let tri = [Point::new(10.0, 40.0), Point::new(40.0, 40.0), Point::new(25.0, 10.0)];

        fill_polygon(&mut fb, &tri, Color::MAGENTA);

        assert_eq!(fb.get_pixel(25, 30), Some(Color::MAGENTA));
        assert_eq!(fb.get_pixel(12, 12), Some(Color::WHITE));
    }

    #[test]
    fn test_fill_polygon_degenerate() {
        let mut fb = white(20, 20);
        fill_polygon(&mut fb, &[Point::new(1.0, 1.0), Point::new(10.0, 10.0)], Color::RED);
        assert_eq!(fb.count_color(Color::RED), 0);
    }

    #[test]
    fn test_stroke_polygon_closes() {
        let mut fb = white(30, 30);
        let square = [
            Point::new(5.0, 5.0),
            Point::new(20.0, 5.0),
            Point::new(20.0, 20.0),
            Point::new(5.0, 20.0),
        ];
        stroke_polygon(&mut fb, &square, 1.0, Color::BLACK);

        // closing edge from (5,20) back to (5,5)
        assert_eq!(fb.get_pixel(5, 12), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(12, 12), Some(Color::WHITE));
    }

    #[test]
    fn test_rotated_rect_vertices_quarter_turn() {
        let v = rotated_rect_vertices(Point::ORIGIN, 4.0, 2.0, std::f64::consts::FRAC_PI_2);
        // the 4-wide side now runs along y
        let max_y = v.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        let max_x = v.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert!((max_y - 2.0).abs() < 1e-9);
        assert!((max_x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ellipse_vertices_on_curve() {
        let c = Point::new(10.0, 10.0);
        for p in ellipse_vertices(c, 8.0, 3.0, 0.0) {
            let u = (p.x - c.x) / 8.0;
            let v = (p.y - c.y) / 3.0;
            assert!((u * u + v * v - 1.0).abs() < 1e-9);
        }
    }
}
