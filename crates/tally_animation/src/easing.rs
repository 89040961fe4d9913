//! Easing functions for animations

use serde::{Deserialize, Serialize};

/// Easing function type
///
/// Every curve maps `0.0` to `0.0` and `1.0` to exactly `1.0`, so a finished
/// animation lands on its target without rounding drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseInQuad,
    /// Fast start, decelerating approach. Used by KPI counters.
    #[default]
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }

    /// Whether the curve never decreases and stays within `[0, 1]`.
    ///
    /// Built-in curves always do. A cubic bezier does only when all four
    /// control coordinates lie in `[0, 1]`; overshooting "back" or "elastic"
    /// curves would make a counter dip below zero or run past its target.
    pub fn is_monotonic(&self) -> bool {
        match self {
            Easing::CubicBezier(x1, y1, x2, y2) => [x1, y1, x2, y2]
                .iter()
                .all(|c| (0.0..=1.0).contains(*c)),
            _ => true,
        }
    }
}

/// Solve a CSS `cubic-bezier()` curve at progress `t`.
///
/// With control points inside the unit square `x(p)` is non-decreasing, so
/// bisection on `p` always brackets the answer and `y(p)` never leaves
/// `[0, 1]`.
fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..BEZIER_ITERATIONS {
        let mid = (lo + hi) * 0.5;
        if bezier_axis(mid, x1, x2) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    bezier_axis((lo + hi) * 0.5, y1, y2).clamp(0.0, 1.0)
}

/// Halvings needed to pin `p` well below display precision.
const BEZIER_ITERATIONS: usize = 48;

/// One coordinate of a unit cubic bezier with endpoints 0 and 1.
#[inline]
fn bezier_axis(p: f64, c1: f64, c2: f64) -> f64 {
    let q = 1.0 - p;
    3.0 * q * q * p * c1 + 3.0 * q * p * p * c2 + p * p * p
}
