//! Exponential (EMA) and Wilder (RMA) moving averages.
//!
//! Both are first-order recursive filters, but they seed differently and the
//! difference is visible in every chained indicator:
//!
//! - **EMA** uses `α = 2 / (period + 1)` and seeds with the *first defined
//!   source value*. It has no fixed warmup.
//! - **RMA** uses `α = 1 / period` and seeds with the plain mean of the first
//!   `period` samples, so its first `period - 1` outputs are NaN.
//!
//! # Formula
//!
//! ```text
//! EMA[f] = src[f]                                 (first defined index)
//! EMA[i] = EMA[i-1] + α × (src[i] - EMA[i-1])
//!
//! RMA[period-1] = mean(src[0..period])
//! RMA[i]        = (src[i] + RMA[i-1] × (period - 1)) / period
//! ```
//!
//! A NaN source value produces NaN and clears the recursion; EMA reseeds on
//! the next defined value, RMA on the next NaN-free full window.
//!
//! # Example
//!
//! ```
//! use chart_ta::ma::{ema, rma};
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//!
//! let e = ema(&data, 3).unwrap();
//! assert_eq!(e[0], 1.0);                     // seeded with the first value
//! assert!((e[1] - 1.5).abs() < 1e-12);       // 0.5 × 2 + 0.5 × 1
//!
//! let r = rma(&data, 3).unwrap();
//! assert!(r[1].is_nan());
//! assert!((r[2] - 2.0).abs() < 1e-12);       // mean of 1, 2, 3
//! assert!((r[3] - 8.0 / 3.0).abs() < 1e-12); // (4 + 2 × 2) / 3
//! ```

use crate::error::Result;
use crate::ma::sma::sma;
use crate::traits::{validate_output, validate_period, SeriesElement};

/// EMA has no fixed warmup: the first defined input is the first output.
#[inline]
#[must_use]
pub const fn ema_lookback(_period: usize) -> usize {
    0
}

/// Returns the lookback period for RMA (`period - 1`).
#[inline]
#[must_use]
pub const fn rma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

fn ema_alpha<T: SeriesElement>(period: usize) -> Result<T> {
    Ok(T::two() / T::from_usize(period + 1)?)
}

/// Computes the Exponential Moving Average of a series.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
#[must_use = "this returns a Result with the EMA values, which should be used"]
pub fn ema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    ema_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes EMA into a pre-allocated buffer, returning the number of defined
/// values written.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::BufferTooSmall` if `output` is shorter than `data`.
pub fn ema_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<usize> {
    validate_period(period)?;
    validate_output(output, data.len(), "ema")?;

    let alpha: T = ema_alpha(period)?;
    let mut prev = T::nan();
    let mut defined = 0usize;

    for (i, &value) in data.iter().enumerate() {
        let current = if value.is_nan() {
            T::nan()
        } else if prev.is_nan() {
            value
        } else {
            prev + alpha * (value - prev)
        };
        if !current.is_nan() {
            defined += 1;
        }
        output[i] = current;
        prev = current;
    }

    Ok(defined)
}

/// Computes Wilder's moving average (RMA), as used by RSI and ATR.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
#[must_use = "this returns a Result with the RMA values, which should be used"]
pub fn rma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    rma_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes RMA into a pre-allocated buffer, returning the number of defined
/// values written.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::BufferTooSmall` if `output` is shorter than `data`.
pub fn rma_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<usize> {
    validate_period(period)?;
    validate_output(output, data.len(), "rma")?;

    let seeds = sma(data, period)?;
    let period_t = T::from_usize(period)?;
    let carry = period_t - T::one();
    let mut prev = T::nan();
    let mut defined = 0usize;

    for (i, &value) in data.iter().enumerate() {
        let current = if value.is_nan() {
            T::nan()
        } else if prev.is_nan() {
            seeds[i]
        } else {
            (value + prev * carry) / period_t
        };
        if !current.is_nan() {
            defined += 1;
        }
        output[i] = current;
        prev = current;
    }

    Ok(defined)
}
