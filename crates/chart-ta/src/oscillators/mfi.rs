//! Money Flow Index (MFI).
//!
//! A volume-weighted RSI over typical price.
//!
//! # Formula
//!
//! ```text
//! tp       = (high + low + close) / 3
//! flow     = tp × volume
//! positive = Σ flow where tp > tp[i-1]     (n bars)
//! negative = Σ flow where tp < tp[i-1]     (n bars)
//! MFI      = 100 - 100 / (1 + positive / negative)
//! ```
//!
//! Negative flow 0 gives 100, both 0 gives 50. A bar without volume (NaN)
//! makes every window that contains it undefined. The first defined value is
//! at index `period`.

use crate::error::Result;
use crate::oscillators::rsi::rsi_from_averages;
use crate::stats::rolling_sum;
use crate::traits::{validate_hlc, validate_period, validate_same_len, SeriesElement};

/// Returns the lookback period for MFI (`period`).
#[inline]
#[must_use]
pub const fn mfi_lookback(period: usize) -> usize {
    period
}

/// Computes the Money Flow Index.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::LengthMismatch` if the series differ in length.
///
/// # Example
///
/// ```
/// use chart_ta::oscillators::mfi;
///
/// let high = vec![2.0_f64, 3.0, 4.0, 3.0];
/// let low = vec![1.0_f64, 2.0, 3.0, 2.0];
/// let close = vec![1.5_f64, 2.5, 3.5, 2.5];
/// let volume = vec![10.0_f64; 4];
///
/// let result = mfi(&high, &low, &close, &volume, 2).unwrap();
/// assert!(result[1].is_nan());
/// assert_eq!(result[2], 100.0);
/// ```
pub fn mfi<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: &[T],
    period: usize,
) -> Result<Vec<T>> {
    validate_period(period)?;
    validate_hlc(high, low, close)?;
    validate_same_len(close, "close", volume, "volume")?;

    let n = close.len();
    let three = T::two() + T::one();
    let typical: Vec<T> = (0..n).map(|i| (high[i] + low[i] + close[i]) / three).collect();

    let mut positive = vec![T::nan(); n];
    let mut negative = vec![T::nan(); n];
    for i in 1..n {
        let delta = typical[i] - typical[i - 1];
        let flow = typical[i] * volume[i];
        if delta.is_nan() || flow.is_nan() {
            continue;
        }
        positive[i] = if delta > T::zero() { flow } else { T::zero() };
        negative[i] = if delta < T::zero() { flow } else { T::zero() };
    }

    let positive_sum = rolling_sum(&positive, period)?;
    let negative_sum = rolling_sum(&negative, period)?;

    Ok(positive_sum
        .iter()
        .zip(&negative_sum)
        .map(|(&pos, &neg)| rsi_from_averages(pos, neg))
        .collect())
}
