//! Relative Strength Index (RSI).
//!
//! Wilder-smoothed average gains versus average losses of bar-to-bar changes.
//!
//! # Formula
//!
//! ```text
//! gain[i] = max(src[i] - src[i-1], 0)
//! loss[i] = max(src[i-1] - src[i], 0)
//! RS      = RMA(gain, n) / RMA(loss, n)
//! RSI     = 100 - 100 / (1 + RS)
//! ```
//!
//! # Degenerate windows
//!
//! - average loss 0, average gain > 0 → 100
//! - both averages 0 (flat price) → 50
//!
//! The first change is undefined, so the first defined RSI is at index `period`.
//!
//! # Example
//!
//! ```
//! use chart_ta::oscillators::rsi;
//!
//! let rising: Vec<f64> = (0..20).map(f64::from).collect();
//! let result = rsi(&rising, 14).unwrap();
//! assert!(result[13].is_nan());
//! assert_eq!(result[14], 100.0);
//!
//! let flat = vec![3.0_f64; 20];
//! assert_eq!(rsi(&flat, 14).unwrap()[19], 50.0);
//! ```

use crate::error::Result;
use crate::ma::ema::rma;
use crate::traits::{validate_output, validate_period, SeriesElement};

/// Returns the lookback period for RSI (`period`).
#[inline]
#[must_use]
pub const fn rsi_lookback(period: usize) -> usize {
    period
}

/// Computes RSI with Wilder smoothing.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
#[must_use = "this returns a Result with the RSI values, which should be used"]
pub fn rsi<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    rsi_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes RSI into a pre-allocated buffer, returning the number of defined
/// values written.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::BufferTooSmall` if `output` is shorter than `data`.
pub fn rsi_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<usize> {
    validate_period(period)?;
    validate_output(output, data.len(), "rsi")?;

    let n = data.len();
    let mut gains = vec![T::nan(); n];
    let mut losses = vec![T::nan(); n];
    for i in 1..n {
        let delta = data[i] - data[i - 1];
        if !delta.is_nan() {
            gains[i] = delta.max(T::zero());
            losses[i] = (-delta).max(T::zero());
        }
    }

    let avg_gain = rma(&gains, period)?;
    let avg_loss = rma(&losses, period)?;
    let mut defined = 0usize;

    for i in 0..n {
        output[i] = rsi_from_averages(avg_gain[i], avg_loss[i]);
        if !output[i].is_nan() {
            defined += 1;
        }
    }

    Ok(defined)
}

/// RSI from one bar's smoothed gain and loss, with the flat and
/// loss-free fallbacks.
#[inline]
#[must_use]
pub fn rsi_from_averages<T: SeriesElement>(avg_gain: T, avg_loss: T) -> T {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        T::nan()
    } else if avg_loss == T::zero() {
        if avg_gain == T::zero() {
            T::fifty()
        } else {
            T::hundred()
        }
    } else {
        T::hundred() - T::hundred() / (T::one() + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::count_nan_prefix;

    #[test]
    fn test_rsi_first_defined_index() {
        let data: Vec<f64> = (0..30).map(|i| f64::from(i % 4)).collect();
        let result = rsi(&data, 14).unwrap();
        assert_eq!(count_nan_prefix(&result), rsi_lookback(14));
    }

    #[test]
    fn test_rsi_falling_is_zero() {
        let data: Vec<f64> = (0..20).map(|i| 100.0 - f64::from(i)).collect();
        let result = rsi(&data, 5).unwrap();
        assert!(result[5..].iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_rsi_hand_computed() {
        // changes: +1, -1, +2 → gains 1,0,2 ; losses 0,1,0
        let data = vec![10.0_f64, 11.0, 10.0, 12.0];
        let result = rsi(&data, 2).unwrap();
        // seed: gain (1+0)/2 = 0.5, loss (0+1)/2 = 0.5 → 50
        assert!((result[2] - 50.0).abs() < 1e-12);
        // gain (2 + 0.5)/2 = 1.25, loss (0 + 0.5)/2 = 0.25 → RS 5
        assert!((result[3] - (100.0 - 100.0 / 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rsi_bounds() {
        let data: Vec<f64> = (0..200).map(|i| (f64::from(i) * 0.37).sin() * 20.0 + 50.0).collect();
        let result = rsi(&data, 14).unwrap();
        for value in result.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(value));
        }
    }

    #[test]
    fn test_rsi_short_input() {
        let result = rsi(&[1.0_f64, 2.0, 3.0], 14).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
