//! Weighted Moving Average (WMA).
//!
//! Linearly weighted mean of the trailing `period` values; the most recent
//! value carries weight `period`, the oldest weight `1`.
//!
//! # Formula
//!
//! ```text
//! WMA = (P₁ × n + P₂ × (n-1) + ... + Pₙ × 1) / (n × (n+1) / 2)
//! ```
//!
//! Each window is summed directly (O(n·period)); this keeps NaN handling
//! exact for the chained WMA pipelines (Hull, MavilimW) that feed NaN warmup
//! prefixes into later stages.
//!
//! # Example
//!
//! ```
//! use chart_ta::ma::wma;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = wma(&data, 3).unwrap();
//!
//! assert!(result[1].is_nan());
//! // (1×1 + 2×2 + 3×3) / 6
//! assert!((result[2] - 14.0 / 6.0).abs() < 1e-12);
//! ```

use crate::error::Result;
use crate::traits::{validate_output, validate_period, SeriesElement};

/// Returns the lookback period for WMA (`period - 1`).
#[inline]
#[must_use]
pub const fn wma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Computes the Weighted Moving Average of a series.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
#[must_use = "this returns a Result with the WMA values, which should be used"]
pub fn wma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    wma_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes WMA into a pre-allocated buffer, returning the number of defined
/// values written.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::BufferTooSmall` if `output` is shorter than `data`.
pub fn wma_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<usize> {
    validate_period(period)?;
    validate_output(output, data.len(), "wma")?;

    // n + (n-1) + ... + 1
    let weight_sum = T::from_usize(period * (period + 1) / 2)?;
    let weights = (1..=period)
        .map(T::from_usize)
        .collect::<Result<Vec<T>>>()?;
    let mut defined = 0usize;

    for i in 0..data.len() {
        output[i] = if i + 1 < period {
            T::nan()
        } else {
            let window = &data[i + 1 - period..=i];
            let sum = window
                .iter()
                .zip(&weights)
                .fold(T::zero(), |acc, (&value, &weight)| acc + value * weight);
            if sum.is_nan() {
                T::nan()
            } else {
                defined += 1;
                sum / weight_sum
            }
        };
    }

    Ok(defined)
}
