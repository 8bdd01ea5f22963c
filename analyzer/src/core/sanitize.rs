//! Numeric sanitization for fixed-precision storage
//!
//! Every numeric destined for the persisted assessment shape passes
//! through `clamp` exactly once, after normalization and before the
//! result is considered final. Persisted fractional values carry 3
//! decimal digits with magnitude below `SCORE_CEILING`, and this module
//! guarantees both regardless of upstream provider behavior.

/// Storage ceiling for fractional fields (3 decimal digits, < 10)
pub const SCORE_CEILING: f64 = 9.999;

/// Clamp `value` into `[min, max]`; non-finite input maps to `default`.
///
/// Total function: never fails, never returns NaN or infinity.
pub fn clamp(value: f64, min: f64, max: f64, default: f64) -> f64 {
    if !value.is_finite() {
        return default;
    }
    value.clamp(min, max)
}

/// Round to the 3 decimal digits the storage format carries
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Sanitize a domain score: finite, in [0,1], storage precision
pub fn unit_score(value: f64) -> f64 {
    round3(clamp(value, 0.0, 1.0, 0.0))
}
