//! True Range and Average True Range (ATR).
//!
//! True Range measures one bar's full price excursion including any gap from
//! the previous close:
//!
//! ```text
//! TR[0] = high[0] - low[0]
//! TR[i] = max(high - low, |high - close[i-1]|, |low - close[i-1]|)
//! ```
//!
//! ATR is Wilder's smoothing ([`rma`]) of True Range, so its first
//! `period - 1` values are NaN.
//!
//! # Example
//!
//! ```
//! use chart_ta::volatility::{atr, true_range};
//!
//! let high = vec![10.0_f64, 12.0, 11.0];
//! let low = vec![9.0_f64, 10.5, 9.5];
//! let close = vec![9.5_f64, 11.5, 10.0];
//!
//! let tr = true_range(&high, &low, &close).unwrap();
//! assert_eq!(tr, vec![1.0, 2.5, 2.0]);
//!
//! let result = atr(&high, &low, &close, 2).unwrap();
//! assert!(result[0].is_nan());
//! assert!((result[1] - 1.75).abs() < 1e-12);
//! ```

use crate::error::Result;
use crate::ma::ema::{rma, rma_into};
use crate::traits::{validate_hlc, validate_output, SeriesElement};

/// Returns the lookback period for ATR (`period - 1`).
#[inline]
#[must_use]
pub const fn atr_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Computes True Range for every bar.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if the three series differ in length.
pub fn true_range<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); high.len()];
    true_range_into(high, low, close, &mut output)?;
    Ok(output)
}

/// Computes True Range into a pre-allocated buffer, returning the number of
/// defined values written.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if the inputs differ in length and
/// `Error::BufferTooSmall` if `output` is shorter than them.
pub fn true_range_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [T],
) -> Result<usize> {
    validate_hlc(high, low, close)?;
    validate_output(output, high.len(), "true_range")?;

    let mut defined = 0usize;
    for i in 0..high.len() {
        let range = high[i] - low[i];
        let tr = if i == 0 {
            range
        } else {
            let prev_close = close[i - 1];
            // max() would silently drop a NaN operand
            let gap_up = (high[i] - prev_close).abs();
            let gap_down = (low[i] - prev_close).abs();
            if range.is_nan() || gap_up.is_nan() || gap_down.is_nan() {
                T::nan()
            } else {
                range.max(gap_up).max(gap_down)
            }
        };
        if !tr.is_nan() {
            defined += 1;
        }
        output[i] = tr;
    }

    Ok(defined)
}

/// Computes the Average True Range.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::LengthMismatch` if the inputs differ in length.
pub fn atr<T: SeriesElement>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    let tr = true_range(high, low, close)?;
    rma(&tr, period)
}

/// Computes ATR into a pre-allocated buffer, returning the number of defined
/// values written.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod`, `Error::LengthMismatch` or
/// `Error::BufferTooSmall` as for [`atr`] and [`true_range_into`].
pub fn atr_into<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> Result<usize> {
    let tr = true_range(high, low, close)?;
    rma_into(&tr, period, output)
}
