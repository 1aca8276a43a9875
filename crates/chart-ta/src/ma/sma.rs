//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the trailing `period` values. Each window is summed
//! directly, so the mean of a window of identical values is that value
//! exactly and a mean never leaves the window's range. A window that
//! contains NaN yields NaN and the output recovers as soon as the NaN leaves
//! the window.
//!
//! # Formula
//!
//! ```text
//! SMA[i] = (src[i] + src[i-1] + ... + src[i-period+1]) / period
//! ```
//!
//! # Example
//!
//! ```
//! use chart_ta::ma::sma;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//!
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10);
//! assert!((result[4] - 4.0).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::traits::{validate_output, validate_period, SeriesElement};

/// Returns the lookback period for SMA (`period - 1`).
///
/// # Example
///
/// ```
/// use chart_ta::ma::sma_lookback;
///
/// assert_eq!(sma_lookback(20), 19);
/// ```
#[inline]
#[must_use]
pub const fn sma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Computes the Simple Moving Average of a series.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
#[must_use = "this returns a Result with the SMA values, which should be used"]
pub fn sma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    sma_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes SMA into a pre-allocated buffer, returning the number of defined
/// values written.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::BufferTooSmall` if `output` is shorter than `data`.
pub fn sma_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<usize> {
    validate_period(period)?;
    validate_output(output, data.len(), "sma")?;

    let period_t = T::from_usize(period)?;
    let mut defined = 0usize;

    for i in 0..data.len() {
        output[i] = if i + 1 < period {
            T::nan()
        } else {
            let sum = data[i + 1 - period..=i]
                .iter()
                .fold(T::zero(), |acc, &value| acc + value);
            if sum.is_nan() {
                T::nan()
            } else {
                defined += 1;
                sum / period_t
            }
        };
    }

    Ok(defined)
}
