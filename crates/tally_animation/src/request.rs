//! Animation requests

use crate::easing::Easing;
use crate::format::{format_fixed, MAX_DECIMALS};

/// Parameters of one counter animation run.
///
/// A new request is issued whenever the target, duration, or precision
/// changes. `prefix` and `suffix` are concatenated around the formatted
/// number verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationRequest {
    pub target_value: f64,
    /// Run length in milliseconds. Zero or negative snaps to the target.
    pub duration_ms: i64,
    /// Digits after the decimal point, capped at [`MAX_DECIMALS`].
    pub decimals: usize,
    pub prefix: String,
    pub suffix: String,
    pub easing: Easing,
}

impl AnimationRequest {
    pub const DEFAULT_DURATION_MS: i64 = 1000;

    pub fn new(target_value: f64) -> Self {
        Self {
            target_value,
            duration_ms: Self::DEFAULT_DURATION_MS,
            decimals: 0,
            prefix: String::new(),
            suffix: String::new(),
            easing: Easing::default(),
        }
    }

    /// Builder: set duration in milliseconds
    pub fn with_duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Builder: set display precision
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Builder: set text rendered before the number
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Builder: set text rendered after the number
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Builder: set the easing curve
    ///
    /// The curve must satisfy [`Easing::is_monotonic`]; a cubic bezier with a
    /// control point outside `[0, 1]` would overshoot the target.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        debug_assert!(easing.is_monotonic(), "non-monotonic easing {easing:?}");
        self.easing = easing;
        self
    }

    /// Duration with negative values clamped to zero.
    pub fn effective_duration_ms(&self) -> i64 {
        self.duration_ms.max(0)
    }

    pub fn effective_decimals(&self) -> usize {
        self.decimals.min(MAX_DECIMALS)
    }

    /// Render `value` as display text for this request.
    pub fn render(&self, value: f64) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            format_fixed(value, self.effective_decimals()),
            self.suffix
        )
    }
}
