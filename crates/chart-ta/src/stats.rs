//! Rolling statistics.
//!
//! - [`stdev`] - Standard deviation (population)
//! - [`linreg`] - Least-squares line evaluated inside the window
//! - [`linreg_slope`] / [`linreg_intercept`] - The fitted line's parameters
//! - [`correlation`] - Pearson correlation coefficient
//! - [`rolling_sum`] - Sum over the trailing window
//! - [`change`] - Difference from `n` bars ago
//!
//! # Conventions
//!
//! - **Population formulas**: variance divides by `n`, not `n - 1`.
//! - **Regression axis**: `x = 0` is the oldest bar of the window and
//!   `x = period - 1` the current bar.
//! - A window containing NaN yields NaN.

use crate::error::Result;
use crate::traits::{validate_output, validate_period, validate_same_len, SeriesElement};

fn window<T: SeriesElement>(data: &[T], end: usize, period: usize) -> Option<&[T]> {
    if end + 1 < period {
        return None;
    }
    let slice = &data[end + 1 - period..=end];
    if slice.iter().any(|v| v.is_nan()) {
        None
    } else {
        Some(slice)
    }
}

/// Returns the lookback period for the rolling statistics (`period - 1`).
#[inline]
#[must_use]
pub const fn stats_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Computes the population standard deviation over a rolling window.
///
/// Variance is computed two-pass per window (mean first, then squared
/// deviations), so it is never negative.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
///
/// # Example
///
/// ```
/// use chart_ta::stats::stdev;
///
/// let data = vec![2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// let result = stdev(&data, 8).unwrap();
/// assert!((result[7] - 2.0).abs() < 1e-12);
/// ```
pub fn stdev<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    stdev_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes [`stdev`] into a pre-allocated buffer, returning the number of
/// defined values written.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::BufferTooSmall` if `output` is shorter than `data`.
pub fn stdev_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<usize> {
    validate_period(period)?;
    validate_output(output, data.len(), "stdev")?;

    let period_t = T::from_usize(period)?;
    let mut defined = 0usize;

    for i in 0..data.len() {
        output[i] = match window(data, i, period) {
            Some(values) => {
                let mean = values.iter().fold(T::zero(), |acc, &v| acc + v) / period_t;
                let variance = values
                    .iter()
                    .fold(T::zero(), |acc, &v| acc + (v - mean) * (v - mean))
                    / period_t;
                defined += 1;
                variance.sqrt()
            }
            None => T::nan(),
        };
    }

    Ok(defined)
}

/// Per-bar `(slope, intercept)` of the least-squares line over each window.
fn linear_regression_core<T: SeriesElement>(data: &[T], period: usize) -> Result<(Vec<T>, Vec<T>)> {
    validate_period(period)?;

    let n = data.len();
    let period_t = T::from_usize(period)?;

    // Σx = p(p-1)/2, Σx² = p(p-1)(2p-1)/6 for x = 0..p-1
    let sum_x = T::from_usize(period * (period - 1) / 2)?;
    let sum_x2 = T::from_usize(period * (period - 1) * (2 * period - 1) / 6)?;
    #[allow(clippy::suspicious_operation_groupings)]
    let denom = period_t * sum_x2 - sum_x * sum_x;

    let mut slopes = vec![T::nan(); n];
    let mut intercepts = vec![T::nan(); n];

    for i in 0..n {
        let Some(values) = window(data, i, period) else {
            continue;
        };
        let mut sum_y = T::zero();
        let mut sum_xy = T::zero();
        for (x, &y) in values.iter().enumerate() {
            let x = T::from_usize(x)?;
            sum_y = sum_y + y;
            sum_xy = sum_xy + x * y;
        }
        // A single-point window has no slope.
        let slope = if denom == T::zero() {
            T::zero()
        } else {
            (period_t * sum_xy - sum_x * sum_y) / denom
        };
        slopes[i] = slope;
        intercepts[i] = (sum_y - slope * sum_x) / period_t;
    }

    Ok((slopes, intercepts))
}

/// Linear regression value: the fitted line evaluated at
/// `x = period - 1 - offset`. With `offset = 0` this is the least-squares
/// moving average (LSMA).
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
///
/// # Example
///
/// ```
/// use chart_ta::stats::linreg;
///
/// let data = vec![1.0_f64, 3.0, 5.0, 7.0];
/// let result = linreg(&data, 4, 0).unwrap();
/// assert!((result[3] - 7.0).abs() < 1e-12);
///
/// let lagged = linreg(&data, 4, 1).unwrap();
/// assert!((lagged[3] - 5.0).abs() < 1e-12);
/// ```
pub fn linreg<T: SeriesElement>(data: &[T], period: usize, offset: usize) -> Result<Vec<T>> {
    let (slopes, intercepts) = linear_regression_core(data, period)?;
    let x = T::from_f64(period as f64 - 1.0 - offset as f64)?;
    Ok(slopes
        .iter()
        .zip(&intercepts)
        .map(|(&slope, &intercept)| intercept + slope * x)
        .collect())
}

/// Slope of the least-squares line per window (price units per bar).
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn linreg_slope<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    Ok(linear_regression_core(data, period)?.0)
}

/// Intercept of the least-squares line per window, at the oldest bar.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn linreg_intercept<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    Ok(linear_regression_core(data, period)?.1)
}

/// Rolling Pearson correlation of two series.
///
/// NaN where either window has zero variance.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::LengthMismatch` if the series differ in length.
pub fn correlation<T: SeriesElement>(a: &[T], b: &[T], period: usize) -> Result<Vec<T>> {
    validate_period(period)?;
    validate_same_len(a, "a", b, "b")?;

    let period_t = T::from_usize(period)?;
    let mut output = vec![T::nan(); a.len()];

    for i in 0..a.len() {
        let (Some(wa), Some(wb)) = (window(a, i, period), window(b, i, period)) else {
            continue;
        };
        let mean_a = wa.iter().fold(T::zero(), |acc, &v| acc + v) / period_t;
        let mean_b = wb.iter().fold(T::zero(), |acc, &v| acc + v) / period_t;

        let (mut cov, mut var_a, mut var_b) = (T::zero(), T::zero(), T::zero());
        for (&x, &y) in wa.iter().zip(wb) {
            let dx = x - mean_a;
            let dy = y - mean_b;
            cov = cov + dx * dy;
            var_a = var_a + dx * dx;
            var_b = var_b + dy * dy;
        }

        if var_a > T::zero() && var_b > T::zero() {
            let r = cov / (var_a * var_b).sqrt();
            output[i] = r.max(-T::one()).min(T::one());
        }
    }

    Ok(output)
}

/// Sum of the trailing `period` values.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn rolling_sum<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    rolling_sum_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes [`rolling_sum`] into a pre-allocated buffer, returning the number
/// of defined values written.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::BufferTooSmall` if `output` is shorter than `data`.
pub fn rolling_sum_into<T: SeriesElement>(
    data: &[T],
    period: usize,
    output: &mut [T],
) -> Result<usize> {
    validate_period(period)?;
    validate_output(output, data.len(), "rolling_sum")?;

    let mut defined = 0usize;
    for i in 0..data.len() {
        output[i] = match window(data, i, period) {
            Some(values) => {
                defined += 1;
                values.iter().fold(T::zero(), |acc, &v| acc + v)
            }
            None => T::nan(),
        };
    }
    Ok(defined)
}

/// `src[i] - src[i - bars]`; NaN for the first `bars` values.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `bars` is zero.
pub fn change<T: SeriesElement>(data: &[T], bars: usize) -> Result<Vec<T>> {
    validate_period(bars)?;
    Ok((0..data.len())
        .map(|i| if i >= bars { data[i] - data[i - bars] } else { T::nan() })
        .collect())
}
