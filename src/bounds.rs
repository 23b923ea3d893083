//! Running data-space bounding box.
//!
//! Every geometry-bearing command widens the box as it is appended, so
//! autoscale at render time is a constant-time read.

use log::debug;

/// Minimal axis-aligned box enclosing all absorbed points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest x seen.
    pub xmin: f64,
    /// Largest x seen.
    pub xmax: f64,
    /// Smallest y seen.
    pub ymin: f64,
    /// Largest y seen.
    pub ymax: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    /// Empty bounds seeded to `{+inf, -inf, +inf, -inf}`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            xmin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymin: f64::INFINITY,
            ymax: f64::NEG_INFINITY,
        }
    }

    /// Whether at least one point has been absorbed.
    #[must_use]
    pub fn valid(&self) -> bool {
        self.xmin.is_finite()
    }

    /// Widen the box to include `(x, y)`.
    ///
    /// Points with a non-finite coordinate are skipped.
    pub fn expand(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            debug!("bounds: skipping non-finite point ({x}, {y})");
            return;
        }
        self.xmin = self.xmin.min(x);
        self.xmax = self.xmax.max(x);
        self.ymin = self.ymin.min(y);
        self.ymax = self.ymax.max(y);
    }

    /// Absorb every pair of two parallel coordinate slices.
    pub fn expand_all(&mut self, xs: &[f64], ys: &[f64]) {
        for (&x, &y) in xs.iter().zip(ys) {
            self.expand(x, y);
        }
    }

    /// Absorb the square `center +- radius` on both axes.
    pub fn expand_radius(&mut self, cx: f64, cy: f64, radius: f64) {
        let r = radius.abs();
        self.expand(cx - r, cy - r);
        self.expand(cx + r, cy + r);
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
