//! Range enforcement shared by every setter.
//!
//! Out-of-range input is never an error: values saturate to the nearest bound.

use std::ops::RangeInclusive;

/// Cap the game treats as unlimited. It is the signed 32-bit wrap point
/// (2^31), not `i32::MAX`.
pub const UNLIMITED: i64 = 2_147_483_648;

pub const SPECIAL: RangeInclusive<i64> = 0..=10;
pub const HAPPINESS: RangeInclusive<i64> = 0..=100;
pub const RADIATION: RangeInclusive<i64> = 0..=100;
pub const LEVEL: RangeInclusive<i64> = 1..=50;

/// Saturate `value` into `[min, max]`.
///
/// When `min > max` the upper bound wins.
pub fn clamp(value: i64, min: i64, max: i64) -> i64 {
    value.max(min).min(max)
}

/// Saturate `value` into an inclusive range
pub fn clamp_to(value: i64, range: &RangeInclusive<i64>) -> i64 {
    clamp(value, *range.start(), *range.end())
}

/// Float variant used for values read from the document
pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}
