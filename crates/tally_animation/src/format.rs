//! Fixed-decimal number formatting for counter display.
//!
//! Rounding follows Rust's `{:.N}` formatting: the exact binary value of the
//! `f64` is rounded to `N` places, with exact midpoints going to the even
//! digit. Most decimal literals that look like midpoints are not exact in
//! binary; `9.995` is stored as `9.99499999…` and therefore renders as
//! `"9.99"` at two places.

/// Largest precision accepted for display.
pub const MAX_DECIMALS: usize = 100;

/// Format `value` with exactly `decimals` digits after the point.
///
/// A result that rounds to zero never carries a minus sign.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    let decimals = decimals.min(MAX_DECIMALS);
    let text = format!("{value:.decimals$}");
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => {
            magnitude.to_string()
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_to_requested_precision() {
        assert_eq!(format_fixed(0.0, 0), "0");
        assert_eq!(format_fixed(0.0, 2), "0.00");
        assert_eq!(format_fixed(150.0, 0), "150");
        assert_eq!(format_fixed(12.5, 3), "12.500");
    }

    #[test]
    fn test_rounds_from_the_binary_value() {
        assert_eq!(format_fixed(9.995, 2), "9.99");
        assert_eq!(format_fixed(9.996, 2), "10.00");
        assert_eq!(format_fixed(1.005, 2), "1.00");
        assert_eq!(format_fixed(0.1 + 0.2, 2), "0.30");
    }

    #[test]
    fn test_drops_sign_of_negative_zero() {
        assert_eq!(format_fixed(-0.0, 0), "0");
        assert_eq!(format_fixed(-0.0, 2), "0.00");
        assert_eq!(format_fixed(-0.001, 2), "0.00");
        assert_eq!(format_fixed(-0.4, 0), "0");
    }

    #[test]
    fn test_keeps_sign_of_negative_values() {
        assert_eq!(format_fixed(-42.0, 0), "-42");
        assert_eq!(format_fixed(-0.006, 2), "-0.01");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_fixed(f64::NAN, 2), "NaN");
        assert_eq!(format_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(format_fixed(f64::NEG_INFINITY, 0), "-Infinity");
    }

    #[test]
    fn test_clamps_excess_precision() {
        let text = format_fixed(1.0, MAX_DECIMALS + 50);
        assert_eq!(text.len(), 2 + MAX_DECIMALS);
    }
}
