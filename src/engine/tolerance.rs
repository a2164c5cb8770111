//! Shared comparison tolerance and rounding policy.
//!
//! Every compliance comparison goes through [`within_limit`] or
//! [`meets_minimum`] so that all checks agree on the boundary.

/// Floating-point slack for every `≤` / `≥` compliance comparison.
pub const EPSILON: f64 = 1e-9;

/// Smallest average unit size the program accepts.
pub const MIN_UNIT_AREA_M2: f64 = 10.0;

/// Floor for garage efficiency in divisions.
pub const MIN_EFFICIENCY: f64 = 0.01;

/// Reserve (m²) at or below which a satisfied limit is reported as tight.
pub const TIGHT_RESERVE_M2: f64 = 20.0;

/// `value ≤ limit`, inclusive within [`EPSILON`].
#[must_use]
pub fn within_limit(value: f64, limit: f64) -> bool {
    value <= limit + EPSILON
}

/// `value ≥ minimum`, inclusive within [`EPSILON`].
#[must_use]
pub fn meets_minimum(value: f64, minimum: f64) -> bool {
    value >= minimum - EPSILON
}

/// `value > limit` beyond [`EPSILON`].
#[must_use]
pub fn exceeds(value: f64, limit: f64) -> bool {
    value > limit + EPSILON
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
#[must_use]
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Unit counts round down.
#[must_use]
pub fn floor_count(value: f64) -> u32 {
    value.max(0.0).floor() as u32
}

/// Stall counts round up.
#[must_use]
pub fn ceil_count(value: f64) -> u32 {
    value.max(0.0).ceil() as u32
}
