//! Stochastic oscillator family.
//!
//! - [`stoch`]: raw %K of any series against any high/low channel
//! - [`stochastic`]: full stochastic (%K smoothed, %D of that)
//! - [`stoch_rsi`]: the same pipeline applied to the RSI series
//!
//! # Formula
//!
//! ```text
//! raw %K = 100 × (src - LL(n)) / (HH(n) - LL(n))
//! %K     = SMA(raw %K, smooth_k)
//! %D     = SMA(%K, d)
//! ```
//!
//! A zero-width channel yields 50 rather than NaN: chained smoothing on top
//! of %K cannot recover from NaN, and a flat channel carries no direction.
//!
//! For Stochastic RSI the highest/lowest are taken over the *RSI series*,
//! not over price.

use crate::error::Result;
use crate::kernels::rolling_extrema::{highest, lowest};
use crate::ma::sma::sma;
use crate::oscillators::rsi::rsi;
use crate::traits::{validate_hlc, SeriesElement};

/// %K and %D lines.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticOutput<T> {
    /// Smoothed %K.
    pub k: Vec<T>,
    /// SMA of %K.
    pub d: Vec<T>,
}

/// Returns the `(k, d)` lookbacks of the full stochastic.
#[inline]
#[must_use]
pub const fn stochastic_lookback(period: usize, smooth_k: usize, d: usize) -> (usize, usize) {
    let k = period.saturating_sub(1) + smooth_k.saturating_sub(1);
    (k, k + d.saturating_sub(1))
}

/// Raw stochastic of `src` within the `high`/`low` channel over `period`.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::LengthMismatch` if the series differ in length.
///
/// # Example
///
/// ```
/// use chart_ta::oscillators::stoch;
///
/// let close = vec![1.0_f64, 2.0, 3.0, 3.0];
/// let k = stoch(&close, &close, &close, 3).unwrap();
/// assert!(k[1].is_nan());
/// assert_eq!(k[2], 100.0);
/// assert!((k[3] - 100.0).abs() < 1e-12);
///
/// let flat = vec![5.0_f64; 4];
/// assert_eq!(stoch(&flat, &flat, &flat, 2).unwrap()[3], 50.0);
/// ```
pub fn stoch<T: SeriesElement>(src: &[T], high: &[T], low: &[T], period: usize) -> Result<Vec<T>> {
    validate_hlc(high, low, src)?;

    let hh = highest(high, period)?;
    let ll = lowest(low, period)?;

    Ok((0..src.len())
        .map(|i| {
            let range = hh[i] - ll[i];
            if range.is_nan() || src[i].is_nan() {
                T::nan()
            } else if range == T::zero() {
                T::fifty()
            } else {
                T::hundred() * ((src[i] - ll[i]) / range)
            }
        })
        .collect())
}

/// Full stochastic oscillator over high/low/close.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if any period is zero and
/// `Error::LengthMismatch` if the series differ in length.
pub fn stochastic<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    smooth_k: usize,
    d: usize,
) -> Result<StochasticOutput<T>> {
    let raw = stoch(close, high, low, period)?;
    let k = sma(&raw, smooth_k)?;
    let d = sma(&k, d)?;
    Ok(StochasticOutput { k, d })
}

/// Stochastic RSI: RSI, then a stochastic over the RSI series itself.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if any period is zero.
///
/// # Example
///
/// ```
/// use chart_ta::oscillators::stoch_rsi;
///
/// let data: Vec<f64> = (0..80).map(|i| (f64::from(i) * 0.3).sin() * 5.0 + 50.0).collect();
/// let out = stoch_rsi(&data, 14, 14, 3, 3).unwrap();
/// // RSI warmup (14) + stochastic window (13) + %K smoothing (2)
/// assert!(out.k[28].is_nan());
/// assert!(!out.k[29].is_nan());
/// ```
pub fn stoch_rsi<T: SeriesElement>(
    src: &[T],
    rsi_period: usize,
    stoch_period: usize,
    smooth_k: usize,
    d: usize,
) -> Result<StochasticOutput<T>> {
    let rsi_values = rsi(src, rsi_period)?;
    let raw = stoch(&rsi_values, &rsi_values, &rsi_values, stoch_period)?;
    let k = sma(&raw, smooth_k)?;
    let d = sma(&k, d)?;
    Ok(StochasticOutput { k, d })
}
