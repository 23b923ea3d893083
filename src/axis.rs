//! Axis model and per-render axis resolution.
//!
//! [`Axis`] keeps the caller's base rectangle and the policy flags. The
//! rectangle actually drawn is produced fresh on each render by
//! [`resolve`], so padding never compounds across renders.

use crate::bounds::Bounds;
use log::debug;

/// Relative perturbation applied to a zero-width axis.
const SPAN_EPS: f64 = 1e-3;

/// Visible data-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisRect {
    /// Left edge.
    pub xmin: f64,
    /// Right edge.
    pub xmax: f64,
    /// Bottom edge.
    pub ymin: f64,
    /// Top edge.
    pub ymax: f64,
}

impl Default for AxisRect {
    fn default() -> Self {
        Self::UNIT
    }
}

impl AxisRect {
    /// The unit square `[0, 1] x [0, 1]`, used when there is no data.
    pub const UNIT: Self = Self::new(0.0, 1.0, 0.0, 1.0);

    /// Create a rectangle from its edges.
    #[must_use]
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self { xmin, xmax, ymin, ymax }
    }

    /// Rectangle of valid bounds, `None` while no data was absorbed.
    #[must_use]
    pub fn from_bounds(bounds: &Bounds) -> Option<Self> {
        bounds.valid().then(|| Self::new(bounds.xmin, bounds.xmax, bounds.ymin, bounds.ymax))
    }

    /// Horizontal extent.
    #[must_use]
    pub fn x_span(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Vertical extent.
    #[must_use]
    pub fn y_span(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Whether both spans are strictly positive.
    #[must_use]
    pub fn is_non_degenerate(&self) -> bool {
        self.xmax > self.xmin && self.ymax > self.ymin
    }

    /// Widen each axis by `frac * span` on both sides.
    #[must_use]
    pub fn padded(self, frac: f64) -> Self {
        let dx = frac * self.x_span();
        let dy = frac * self.y_span();
        Self::new(self.xmin - dx, self.xmax + dx, self.ymin - dy, self.ymax + dy)
    }

    /// Perturb any zero-width axis to a small positive span.
    #[must_use]
    pub fn non_degenerate(self) -> Self {
        let (xmin, xmax) = ensure_nonzero_span(self.xmin, self.xmax);
        let (ymin, ymax) = ensure_nonzero_span(self.ymin, self.ymax);
        Self::new(xmin, xmax, ymin, ymax)
    }

    /// Widen one axis about its midpoint so a data unit covers the same
    /// number of pixels horizontally and vertically.
    ///
    /// For a square plot area both spans become `max(x_span, y_span)`.
    #[must_use]
    pub fn equalized(self, plot_w: f64, plot_h: f64) -> Self {
        if plot_w <= 0.0 || plot_h <= 0.0 {
            return self;
        }
        let units_per_px = (self.x_span() / plot_w).max(self.y_span() / plot_h);
        let half_x = 0.5 * units_per_px * plot_w;
        let half_y = 0.5 * units_per_px * plot_h;
        let cx = 0.5 * (self.xmin + self.xmax);
        let cy = 0.5 * (self.ymin + self.ymax);
        Self::new(cx - half_x, cx + half_x, cy - half_y, cy + half_y)
    }
}

/// Return `(lo, hi)` unchanged unless they are equal, in which case they are
/// pushed apart by `max(|lo| * 1e-3, 1e-3)` each way.
#[must_use]
pub fn ensure_nonzero_span(lo: f64, hi: f64) -> (f64, f64) {
    if hi != lo {
        return (lo, hi);
    }
    let eps = (lo.abs() * SPAN_EPS).max(SPAN_EPS);
    (lo - eps, hi + eps)
}

/// Axis behaviour flags.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisPolicy {
    /// Derive the visible rectangle from the data bounds.
    pub autoscale: bool,
    /// Force equal data units per pixel on both axes.
    pub equal_scale: bool,
    /// Fraction of the span added on each side; never negative.
    pub pad_frac: f64,
    /// Draw grid lines at the ticks.
    pub grid: bool,
}

impl Default for AxisPolicy {
    fn default() -> Self {
        Self { autoscale: true, equal_scale: false, pad_frac: 0.05, grid: false }
    }
}

/// Resolve the rectangle to draw for one render pass.
///
/// Steps run in a fixed order: choose the source (bounds, unit square or the
/// caller's `base`), pad, repair zero spans, equalize, repair again.
#[must_use]
pub fn resolve(
    base: AxisRect,
    bounds: &Bounds,
    policy: &AxisPolicy,
    plot_w: f64,
    plot_h: f64,
) -> AxisRect {
    let mut rect = if policy.autoscale { autoscale_source(bounds) } else { base };

    if policy.pad_frac > 0.0 {
        rect = rect.padded(policy.pad_frac);
    }

    rect = rect.non_degenerate();

    if policy.equal_scale {
        rect = rect.equalized(plot_w, plot_h).non_degenerate();
    }

    rect
}

/// Bounds if any data was absorbed, otherwise the unit square.
#[must_use]
pub fn autoscale_source(bounds: &Bounds) -> AxisRect {
    AxisRect::from_bounds(bounds).unwrap_or(AxisRect::UNIT)
}

/// Caller-controlled axis state: the base rectangle and the policy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Axis {
    base: AxisRect,
    policy: AxisPolicy,
}

impl Axis {
    /// Axis with default policy and the unit square as base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base rectangle used while autoscale is off.
    #[must_use]
    pub fn base(&self) -> AxisRect {
        self.base
    }

    /// Current policy flags.
    #[must_use]
    pub fn policy(&self) -> &AxisPolicy {
        &self.policy
    }

    /// Fix the x range and turn autoscale off.
    ///
    /// Returns `false` (and changes nothing) for non-finite limits.
    pub fn set_xlim(&mut self, lo: f64, hi: f64, bounds: &Bounds) -> bool {
        let Some((lo, hi)) = ordered_limits(lo, hi) else {
            return false;
        };
        self.freeze(bounds);
        self.base.xmin = lo;
        self.base.xmax = hi;
        true
    }

    /// Fix the y range and turn autoscale off.
    ///
    /// Returns `false` (and changes nothing) for non-finite limits.
    pub fn set_ylim(&mut self, lo: f64, hi: f64, bounds: &Bounds) -> bool {
        let Some((lo, hi)) = ordered_limits(lo, hi) else {
            return false;
        };
        self.freeze(bounds);
        self.base.ymin = lo;
        self.base.ymax = hi;
        true
    }

    /// Toggle autoscale. Turning it off keeps the current autoscaled view.
    pub fn set_autoscale(&mut self, on: bool, bounds: &Bounds) {
        if on {
            self.policy.autoscale = true;
        } else {
            self.freeze(bounds);
        }
    }

    /// Toggle equal scaling.
    pub fn set_equal_scale(&mut self, on: bool) {
        self.policy.equal_scale = on;
    }

    /// Set the padding fraction; negative or NaN becomes zero.
    pub fn set_pad(&mut self, frac: f64) {
        self.policy.pad_frac = if frac > 0.0 { frac } else { 0.0 };
    }

    /// Toggle grid lines.
    pub fn set_grid(&mut self, on: bool) {
        self.policy.grid = on;
    }

    /// Resolve the rectangle to draw for a plot area of the given size.
    #[must_use]
    pub fn resolve(&self, bounds: &Bounds, plot_w: f64, plot_h: f64) -> AxisRect {
        resolve(self.base, bounds, &self.policy, plot_w, plot_h)
    }

    fn freeze(&mut self, bounds: &Bounds) {
        if self.policy.autoscale {
            self.base = autoscale_source(bounds);
            self.policy.autoscale = false;
        }
    }
}

fn ordered_limits(lo: f64, hi: f64) -> Option<(f64, f64)> {
    if !lo.is_finite() || !hi.is_finite() {
        debug!("axis: ignoring non-finite limits ({lo}, {hi})");
        return None;
    }
    Some(if lo <= hi { (lo, hi) } else { (hi, lo) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn bounds_of(points: &[(f64, f64)]) -> Bounds {
        let mut b = Bounds::new();
        for &(x, y) in points {
            b.expand(x, y);
        }
        b
    }

    #[test]
    fn test_ensure_nonzero_span() {
        assert_eq!(ensure_nonzero_span(1.0, 2.0), (1.0, 2.0));
        assert_eq!(ensure_nonzero_span(0.0, 0.0), (-1e-3, 1e-3));
        let (lo, hi) = ensure_nonzero_span(1000.0, 1000.0);
        assert_relative_eq!(lo, 999.0);
        assert_relative_eq!(hi, 1001.0);
    }

    #[test]
    fn test_empty_autoscale_is_padded_unit_square() {
        let rect = resolve(AxisRect::UNIT, &Bounds::new(), &AxisPolicy::default(), 560.0, 380.0);
        assert_relative_eq!(rect.xmin, -0.05);
        assert_relative_eq!(rect.xmax, 1.05);
        assert_relative_eq!(rect.ymin, -0.05);
        assert_relative_eq!(rect.ymax, 1.05);
    }

    #[test]
    fn test_padding_applies_to_bounds() {
        let b = bounds_of(&[(0.0, 0.0), (10.0, 20.0)]);
        let rect = resolve(AxisRect::UNIT, &b, &AxisPolicy::default(), 100.0, 100.0);
        assert_relative_eq!(rect.xmin, -0.5);
        assert_relative_eq!(rect.xmax, 10.5);
        assert_relative_eq!(rect.ymin, -1.0);
        assert_relative_eq!(rect.ymax, 21.0);
    }

    #[test]
    fn test_single_point_is_perturbed() {
        let b = bounds_of(&[(3.0, 3.0)]);
        let rect = resolve(AxisRect::UNIT, &b, &AxisPolicy::default(), 100.0, 100.0);
        assert!(rect.is_non_degenerate());
        assert!(rect.xmin < 3.0 && rect.xmax > 3.0);
    }

    #[test]
    fn test_equal_scale_square_plot() {
        let b = bounds_of(&[(0.0, 0.0), (4.0, 1.0)]);
        let policy = AxisPolicy { equal_scale: true, pad_frac: 0.0, ..AxisPolicy::default() };
        let rect = resolve(AxisRect::UNIT, &b, &policy, 200.0, 200.0);
        assert_relative_eq!(rect.x_span(), 4.0);
        assert_relative_eq!(rect.y_span(), 4.0);
        assert_relative_eq!(rect.ymin, -1.5);
        assert_relative_eq!(rect.ymax, 2.5);
    }

    #[test]
    fn test_equal_scale_wide_plot() {
        let b = bounds_of(&[(0.0, 0.0), (1.0, 1.0)]);
        let policy = AxisPolicy { equal_scale: true, pad_frac: 0.0, ..AxisPolicy::default() };
        let rect = resolve(AxisRect::UNIT, &b, &policy, 400.0, 200.0);
        assert_relative_eq!(rect.x_span() / 400.0, rect.y_span() / 200.0);
        assert_relative_eq!(rect.y_span(), 1.0);
    }

    #[test]
    fn test_manual_base_used_without_autoscale() {
        let policy = AxisPolicy { autoscale: false, pad_frac: 0.0, ..AxisPolicy::default() };
        let base = AxisRect::new(-2.0, 2.0, 5.0, 5.0);
        let rect = resolve(base, &Bounds::new(), &policy, 100.0, 100.0);
        assert_eq!((rect.xmin, rect.xmax), (-2.0, 2.0));
        assert!(rect.ymax > rect.ymin);
    }

    #[test]
    fn test_set_xlim_freezes_other_axis() {
        let b = bounds_of(&[(0.0, -4.0), (1.0, 4.0)]);
        let mut axis = Axis::new();
        assert!(axis.set_xlim(10.0, -10.0, &b));

        assert!(!axis.policy().autoscale);
        assert_eq!(axis.base(), AxisRect::new(-10.0, 10.0, -4.0, 4.0));

        // a second call keeps the frozen y range
        assert!(axis.set_ylim(0.0, 1.0, &Bounds::new()));
        assert_eq!(axis.base(), AxisRect::new(-10.0, 10.0, 0.0, 1.0));
    }

    #[test]
    fn test_set_xlim_rejects_nan() {
        let mut axis = Axis::new();
        assert!(!axis.set_xlim(f64::NAN, 1.0, &Bounds::new()));
        assert!(axis.policy().autoscale);
    }

    #[test]
    fn test_autoscale_off_keeps_view() {
        let b = bounds_of(&[(2.0, 3.0), (4.0, 9.0)]);
        let mut axis = Axis::new();
        axis.set_autoscale(false, &b);
        assert_eq!(axis.base(), AxisRect::new(2.0, 4.0, 3.0, 9.0));
        axis.set_autoscale(true, &b);
        assert!(axis.policy().autoscale);
    }

    #[test]
    fn test_set_pad_clamps() {
        let mut axis = Axis::new();
        axis.set_pad(-1.0);
        assert_eq!(axis.policy().pad_frac, 0.0);
        axis.set_pad(f64::NAN);
        assert_eq!(axis.policy().pad_frac, 0.0);
        axis.set_pad(0.1);
        assert_eq!(axis.policy().pad_frac, 0.1);
    }

    mod proptests {
        use super::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn resolved_rect_is_never_degenerate(
                x0 in -1e6f64..1e6, x1 in -1e6f64..1e6,
                y0 in -1e6f64..1e6, y1 in -1e6f64..1e6,
                pad in 0.0f64..0.5,
                equal in any::<bool>(),
                autoscale in any::<bool>(),
            ) {
                let b = bounds_of(&[(x0, y0), (x1, y1)]);
                let policy = AxisPolicy { autoscale, equal_scale: equal, pad_frac: pad, grid: false };
                let base = AxisRect::new(x0, x0, y1, y1);
                let rect = resolve(base, &b, &policy, 560.0, 380.0);
                prop_assert!(rect.is_non_degenerate());
            }

            #[test]
            fn equal_scale_matches_units_per_pixel(
                x1 in 0.01f64..1e4, y1 in 0.01f64..1e4,
                w in 50.0f64..2000.0, h in 50.0f64..2000.0,
            ) {
                let b = bounds_of(&[(0.0, 0.0), (x1, y1)]);
                let policy = AxisPolicy { equal_scale: true, ..AxisPolicy::default() };
                let rect = resolve(AxisRect::UNIT, &b, &policy, w, h);
                let ux = rect.x_span() / w;
                let uy = rect.y_span() / h;
                prop_assert!((ux - uy).abs() <= 1e-9 * ux.max(uy));
            }
        }
    }
}
