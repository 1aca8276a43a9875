//! Utility functions for chart-ta.
//!
//! Tolerance-based float comparison and NaN bookkeeping helpers shared by the
//! transforms and exposed for callers that zip outputs back onto bars.
//!
//! # Example
//!
//! ```
//! use chart_ta::utils::{approx_eq, count_nan_prefix, EPSILON};
//!
//! assert!(approx_eq(1.0 / 3.0, 0.333333333333333, EPSILON));
//! assert_eq!(count_nan_prefix(&[f64::NAN, f64::NAN, 1.0]), 2);
//! ```

use crate::traits::SeriesElement;

/// Standard epsilon for high-precision floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for results that went through long recursive chains.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Approximate equality check for floating-point values.
///
/// Returns `true` if `a` and `b` are within `tolerance` of each other,
/// or if both are NaN (for testing convenience).
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < tolerance
}

/// Counts NaN values anywhere in the slice.
#[inline]
#[must_use]
pub fn count_nans<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}

/// Counts the leading run of NaN values (the observed warmup).
#[inline]
#[must_use]
pub fn count_nan_prefix<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().take_while(|x| x.is_nan()).count()
}

/// Index of the first non-NaN value, if any.
#[inline]
#[must_use]
pub fn first_defined<T: SeriesElement>(data: &[T]) -> Option<usize> {
    data.iter().position(|x| !x.is_nan())
}

/// Number of defined outputs a window transform yields over `len` bars.
///
/// This is `len - lookback` when enough bars exist, else zero.
#[inline]
#[must_use]
pub const fn defined_len(len: usize, lookback: usize) -> usize {
    len.saturating_sub(lookback)
}
