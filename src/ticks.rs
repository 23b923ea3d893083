//! "Nice" tick placement.
//!
//! Ticks land on multiples of 1, 2 or 5 times a power of ten, the spacing
//! people expect on a chart axis regardless of data scale.

/// Default number of ticks aimed for per axis.
pub const DEFAULT_TICK_TARGET: usize = 6;

/// Tolerance for keeping ticks that sit on the interval ends.
const CLIP_EPS: f64 = 1e-12;

/// Round `range` to a nice number.
///
/// With `round` set the mantissa goes to the nearest of 1, 2, 5, 10 using the
/// 1.5/3/7 breakpoints; otherwise it snaps up to the next one. A
/// non-positive `range` is treated as `1.0`.
#[must_use]
pub fn nice_num(range: f64, round: bool) -> f64 {
    let range = if range > 0.0 { range } else { 1.0 };
    let exponent = range.log10().floor();
    let decade = 10f64.powf(exponent);
    let fraction = range / decade;

    let nice = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * decade
}

/// A single tick: position in data space plus its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Data-space location.
    pub value: f64,
    /// Formatted label.
    pub label: String,
}

/// Ascending ticks for one axis, clipped to the visible interval.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickSet {
    /// Spacing between consecutive ticks.
    pub step: f64,
    /// Ticks in ascending order.
    pub ticks: Vec<Tick>,
}

impl TickSet {
    /// Number of ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Whether no tick fell inside the interval.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Iterate over tick locations.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.ticks.iter().map(|t| t.value)
    }

    /// Iterate over tick labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.ticks.iter().map(|t| t.label.as_str())
    }
}

/// Generate ticks for `[lo, hi]` aiming for about `target` of them.
///
/// Values on the snapped grid outside `[lo, hi]` are dropped.
#[must_use]
pub fn make_ticks(lo: f64, hi: f64, target: usize) -> TickSet {
    if !lo.is_finite() || !hi.is_finite() {
        return TickSet::default();
    }

    let target = target.max(2);
    let range = nice_num(hi - lo, false);
    let step = nice_num(range / (target - 1) as f64, true);
    let graph_lo = (lo / step).floor() * step;
    let graph_hi = (hi / step).ceil() * step;
    let decimals = if step >= 1.0 { 0 } else { 1 };

    // the nice step keeps the count near `target`; the cap only matters when
    // `step` is below the precision of `lo`
    let mut ticks = Vec::new();
    for i in 0..3 * target + 3 {
        let v = graph_lo + i as f64 * step;
        if v > graph_hi + 0.5 * step {
            break;
        }
        if v >= lo - CLIP_EPS && v <= hi + CLIP_EPS {
            ticks.push(Tick { value: v, label: format_tick(v, decimals) });
        }
    }

    TickSet { step, ticks }
}

/// Fixed-point label; negative zero prints as `0`.
fn format_tick(value: f64, decimals: usize) -> String {
    let label = format!("{value:.decimals$}");
    if label.starts_with('-') && label[1..].chars().all(|c| c == '0' || c == '.') {
        label[1..].to_string()
    } else {
        label
    }
}
