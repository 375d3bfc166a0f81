//! Assertion utilities for testing.
//!
//! This module provides helper functions for floating-point comparisons on
//! temperature values returned by the API.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a daily summary is ordered: TMIN <= TAVG <= TMAX.
pub fn assert_ordered_summary(entry: &serde_json::Value) {
    let tmin = entry["TMIN"].as_f64().expect("TMIN is a number");
    let tavg = entry["TAVG"].as_f64().expect("TAVG is a number");
    let tmax = entry["TMAX"].as_f64().expect("TMAX is a number");

    assert!(
        tmin <= tavg && tavg <= tmax,
        "Summary out of order on {}: TMIN = {}, TAVG = {}, TMAX = {}",
        entry["date"],
        tmin,
        tavg,
        tmax
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(65.0, 65.0, None);
        assert_approx_eq(65.0, 65.004, Some(0.005));
    }

    #[test]
    fn test_assert_ordered_summary() {
        assert_ordered_summary(&serde_json::json!({
            "date": "2017-01-01", "TMIN": 60.0, "TAVG": 65.0, "TMAX": 70.0
        }));
    }
}
