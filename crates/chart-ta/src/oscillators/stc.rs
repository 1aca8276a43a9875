//! Schaff Trend Cycle (STC).
//!
//! MACD passed through two rounds of stochastic normalization, each followed
//! by a recursive half-step smoother:
//!
//! ```text
//! macd = EMA(src, fast) - EMA(src, slow)
//! f1   = 100 × (macd - LL(macd, cycle)) / range      (range > 0)
//!        f1[i-1], or 0 before any value             (range = 0)
//! pf   = pf[i-1] + factor × (f1 - pf[i-1])           (pf = f1 on the first bar)
//! f2   = the same normalization over pf
//! stc  = the same smoothing over f2
//! ```
//!
//! Each normalization recomputes highest/lowest over the *intermediate*
//! series. The zero-range fallback is the stage's previous value, not 50.

use crate::error::Result;
use crate::kernels::rolling_extrema::{highest, lowest};
use crate::ma::ema::ema;
use crate::traits::{validate_period, SeriesElement};

/// Returns the lookback of [`stc`]: two stochastic windows over a MACD that
/// is defined from the first bar.
#[inline]
#[must_use]
pub const fn stc_lookback(cycle: usize) -> usize {
    2 * cycle.saturating_sub(1)
}

/// One stochastic normalization with carry-forward on a zero range.
fn normalize<T: SeriesElement>(series: &[T], cycle: usize) -> Result<Vec<T>> {
    let hh = highest(series, cycle)?;
    let ll = lowest(series, cycle)?;
    let mut prev = T::zero();

    Ok((0..series.len())
        .map(|i| {
            let range = hh[i] - ll[i];
            if range.is_nan() {
                return T::nan();
            }
            let value = if range > T::zero() {
                T::hundred() * ((series[i] - ll[i]) / range)
            } else {
                prev
            };
            prev = value;
            value
        })
        .collect())
}

/// Recursive smoother: seeds with the first defined value.
fn smooth<T: SeriesElement>(series: &[T], factor: T) -> Vec<T> {
    let mut prev = T::nan();
    series
        .iter()
        .map(|&value| {
            let next = if value.is_nan() {
                T::nan()
            } else if prev.is_nan() {
                value
            } else {
                prev + factor * (value - prev)
            };
            prev = next;
            next
        })
        .collect()
}

/// Computes the Schaff Trend Cycle.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if any length is zero.
///
/// # Example
///
/// ```
/// use chart_ta::oscillators::{stc, stc_lookback};
///
/// let data: Vec<f64> = (0..200).map(|i| (f64::from(i) * 0.1).sin() * 10.0 + 100.0).collect();
/// let result = stc(&data, 23, 50, 10, 0.5).unwrap();
/// assert!(result[stc_lookback(10) - 1].is_nan());
/// assert!(result[stc_lookback(10)..].iter().all(|v| (0.0..=100.0).contains(v)));
/// ```
pub fn stc<T: SeriesElement>(
    src: &[T],
    fast: usize,
    slow: usize,
    cycle: usize,
    factor: T,
) -> Result<Vec<T>> {
    validate_period(cycle)?;

    let fast_ema = ema(src, fast)?;
    let slow_ema = ema(src, slow)?;
    let macd: Vec<T> = fast_ema.iter().zip(&slow_ema).map(|(&f, &s)| f - s).collect();

    let f1 = normalize(&macd, cycle)?;
    let pf = smooth(&f1, factor);
    let f2 = normalize(&pf, cycle)?;
    Ok(smooth(&f2, factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::count_nan_prefix;

    #[test]
    fn test_stc_warmup() {
        let data: Vec<f64> = (0..120).map(|i| f64::from(i % 13) + f64::from(i) * 0.2).collect();
        let result = stc(&data, 23, 50, 10, 0.5).unwrap();
        assert_eq!(count_nan_prefix(&result), stc_lookback(10));
    }

    #[test]
    fn test_flat_range_carries_previous_stage_value() {
        let series = vec![1.0_f64, 3.0, 2.0, 2.0, 2.0];
        let result = normalize(&series, 2).unwrap();
        assert!(result[0].is_nan());
        assert!((result[1] - 100.0).abs() < 1e-12);
        assert!(result[2].abs() < 1e-12);
        // window [2, 2] has no range: hold the previous value
        assert!(result[3].abs() < 1e-12);
        assert!(result[4].abs() < 1e-12);
    }

    #[test]
    fn test_flat_range_before_any_value_is_zero() {
        let result = normalize(&[4.0_f64; 4], 2).unwrap();
        assert!(result[0].is_nan());
        assert!(result[1..].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_smooth_half_steps() {
        let result = smooth(&[f64::NAN, 0.0, 100.0, 100.0], 0.5);
        assert!(result[0].is_nan());
        assert_eq!(&result[1..], &[0.0, 50.0, 75.0]);
    }

    #[test]
    fn test_stc_saturates_after_reversal_into_uptrend() {
        // 100 bars down, then 100 bars up: MACD climbs through the whole rise
        let data: Vec<f64> = (0..200)
            .map(|i| {
                let step = if i < 100 { -f64::from(i) } else { f64::from(i) - 200.0 };
                300.0 + step
            })
            .collect();
        let result = stc(&data, 23, 50, 10, 0.5).unwrap();
        assert!(result[199] > 90.0, "stc {}", result[199]);
        assert!(result[199] <= 100.0);
    }

    #[test]
    fn test_stc_monotone_macd_from_first_bar_holds_zero() {
        // MACD only ever rises: the first stage is pinned at 100, so the second
        // stage sees no range and holds 0
        let data: Vec<f64> = (0..150).map(|i| f64::from(i) * f64::from(i) * 0.01).collect();
        let f1 = normalize(
            &ema(&data, 23)
                .unwrap()
                .iter()
                .zip(&ema(&data, 50).unwrap())
                .map(|(f, s)| f - s)
                .collect::<Vec<_>>(),
            10,
        )
        .unwrap();
        assert!(f1[120..].iter().all(|&v| v == 100.0));

        let result = stc(&data, 23, 50, 10, 0.5).unwrap();
        assert!(result[120..].iter().all(|&v| v == 0.0));
    }
}
