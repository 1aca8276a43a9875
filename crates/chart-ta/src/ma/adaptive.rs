//! Adaptive and lag-reduced moving averages.
//!
//! - [`var`] - Variable Index Dynamic Average driven by a 9-bar CMO
//! - [`wwma`] - Welles Wilder MA seeded with the raw source
//! - [`zlema`] - Zero-lag EMA
//! - [`tma`] - Triangular MA (SMA of SMA)
//! - [`lsma`] - Least-squares MA
//!
//! `var` and `wwma` seed their first output with the raw source value rather
//! than waiting for a window, and hold their state across NaN inputs (NaN is
//! emitted for that bar).

use crate::error::Result;
use crate::ma::ema::ema;
use crate::ma::sma::sma;
use crate::stats::linreg;
use crate::traits::{validate_period, SeriesElement};

/// Window of the Chande momentum sums behind [`var`].
pub const VAR_CMO_WINDOW: usize = 9;

/// Fixed-capacity ring of the last [`VAR_CMO_WINDOW`] up/down moves with
/// running sums.
#[derive(Debug, Clone)]
struct MoveRing<T> {
    ups: [T; VAR_CMO_WINDOW],
    downs: [T; VAR_CMO_WINDOW],
    up_sum: T,
    down_sum: T,
    next: usize,
    len: usize,
}

impl<T: SeriesElement> MoveRing<T> {
    fn new() -> Self {
        Self {
            ups: [T::zero(); VAR_CMO_WINDOW],
            downs: [T::zero(); VAR_CMO_WINDOW],
            up_sum: T::zero(),
            down_sum: T::zero(),
            next: 0,
            len: 0,
        }
    }

    fn push(&mut self, delta: T) {
        let up = delta.max(T::zero());
        let down = (-delta).max(T::zero());
        self.up_sum = self.up_sum + up - self.ups[self.next];
        self.down_sum = self.down_sum + down - self.downs[self.next];
        self.ups[self.next] = up;
        self.downs[self.next] = down;
        self.next = (self.next + 1) % VAR_CMO_WINDOW;
        self.len = (self.len + 1).min(VAR_CMO_WINDOW);
    }

    const fn is_full(&self) -> bool {
        self.len == VAR_CMO_WINDOW
    }

    /// `(up - down) / (up + down)`, zero for a flat window.
    fn cmo(&self) -> T {
        let denom = self.up_sum + self.down_sum;
        if denom == T::zero() {
            T::zero()
        } else {
            (self.up_sum - self.down_sum) / denom
        }
    }
}

/// Variable Index Dynamic Average (VIDYA-style VAR).
///
/// ```text
/// α   = 2 / (period + 1)
/// cmo = (Σup₉ - Σdown₉) / (Σup₉ + Σdown₉)     (0 when flat)
/// VAR = α·|cmo|·src + (1 - α·|cmo|)·VAR[i-1]
/// ```
///
/// The first defined bar outputs the raw source. Until nine bar-to-bar moves
/// have been seen the CMO is treated as zero and the seed is held.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
///
/// # Example
///
/// ```
/// use chart_ta::ma::var;
///
/// let data: Vec<f64> = (0..20).map(|i| 10.0 + f64::from(i)).collect();
/// let result = var(&data, 2).unwrap();
/// assert_eq!(result[0], 10.0);
/// assert_eq!(result[8], 10.0); // held until the CMO window fills
/// assert!(result[9] > 10.0);   // pure uptrend: |cmo| = 1
/// ```
pub fn var<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_period(period)?;

    let alpha = T::two() / T::from_usize(period + 1)?;
    let mut output = vec![T::nan(); data.len()];
    let mut ring = MoveRing::new();
    let mut state: Option<T> = None;
    let mut last_value: Option<T> = None;

    for (i, &value) in data.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        if let Some(prev_value) = last_value {
            ring.push(value - prev_value);
        }
        last_value = Some(value);

        let next = match state {
            None => value,
            Some(prev) if ring.is_full() => {
                let k = alpha * ring.cmo().abs();
                prev + k * (value - prev)
            }
            Some(prev) => prev,
        };
        state = Some(next);
        output[i] = next;
    }

    Ok(output)
}

/// Welles Wilder moving average with raw-source seeding.
///
/// ```text
/// WWMA[f] = src[f]
/// WWMA[i] = src[i] / period + (1 - 1/period) · WWMA[i-1]
/// ```
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn wwma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_period(period)?;

    let alpha = T::one() / T::from_usize(period)?;
    let mut output = vec![T::nan(); data.len()];
    let mut state: Option<T> = None;

    for (i, &value) in data.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        let next = state.map_or(value, |prev| prev + alpha * (value - prev));
        state = Some(next);
        output[i] = next;
    }

    Ok(output)
}

/// Zero-lag EMA: `EMA(src + (src - src[lag]), period)` with `lag = ⌊period/2⌋`.
///
/// The first `lag` outputs are NaN.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn zlema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_period(period)?;

    let lag = period / 2;
    let de_lagged: Vec<T> = (0..data.len())
        .map(|i| {
            if i >= lag {
                data[i] + (data[i] - data[i - lag])
            } else {
                T::nan()
            }
        })
        .collect();
    ema(&de_lagged, period)
}

/// Returns the lookback of [`zlema`] (`⌊period/2⌋`).
#[inline]
#[must_use]
pub const fn zlema_lookback(period: usize) -> usize {
    period / 2
}

/// Triangular moving average: `SMA(SMA(src, ⌈n/2⌉), ⌊n/2⌋ + 1)`.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn tma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_period(period)?;
    let first = sma(data, period.div_ceil(2))?;
    sma(&first, period / 2 + 1)
}

/// Returns the lookback of [`tma`] (`period - 1`).
#[inline]
#[must_use]
pub const fn tma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Least-squares moving average: the regression line's value on the current
/// bar.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn lsma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    linreg(data, period, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::count_nan_prefix;

    #[test]
    fn test_var_seed_hold_then_adapt() {
        let data: Vec<f64> = (0..15).map(|i| 10.0 + f64::from(i)).collect();
        let result = var(&data, 2).unwrap();
        for value in &result[..9] {
            assert_eq!(*value, 10.0);
        }
        // |cmo| = 1 on a pure uptrend, alpha = 2/3
        let expected = 2.0 / 3.0 * 19.0 + 1.0 / 3.0 * 10.0;
        assert!((result[9] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_var_flat_series_holds() {
        let result = var(&[5.0_f64; 20], 9).unwrap();
        assert!(result.iter().all(|&v| v == 5.0));
    }

    #[test]
    fn test_wwma_constant_input_is_exact() {
        for period in [9, 14, 20] {
            let result = wwma(&[5.0_f64; 40], period).unwrap();
            assert!(result.iter().all(|&v| v == 5.0), "period {period}");
        }
    }

    #[test]
    fn test_var_choppy_series_moves_slowly() {
        // alternating moves cancel: cmo = ±1/9 at most
        let data: Vec<f64> = (0..40)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        let result = var(&data, 2).unwrap();
        assert!((result[39] - 100.5).abs() < 0.1);
    }

    #[test]
    fn test_var_leading_nan() {
        let mut data = vec![f64::NAN; 3];
        data.extend((0..12).map(f64::from));
        let result = var(&data, 5).unwrap();
        assert_eq!(count_nan_prefix(&result), 3);
        assert_eq!(result[3], 0.0);
    }

    #[test]
    fn test_wwma_seed_and_recursion() {
        let data = vec![4.0_f64, 8.0, 8.0];
        let result = wwma(&data, 4).unwrap();
        assert_eq!(result[0], 4.0);
        assert!((result[1] - 5.0).abs() < 1e-12);
        assert!((result[2] - 5.75).abs() < 1e-12);
    }

    #[test]
    fn test_zlema_warmup_and_linear_tracking() {
        let data: Vec<f64> = (0..100).map(f64::from).collect();
        let result = zlema(&data, 10).unwrap();
        assert_eq!(count_nan_prefix(&result), zlema_lookback(10));
        // de-lagged input leads by `lag`, which cancels EMA's lag of (n-1)/2
        assert!((result[99] - 99.5).abs() < 1e-6);
    }

    #[test]
    fn test_tma_warmup() {
        let data: Vec<f64> = (0..30).map(|i| f64::from(i % 6)).collect();
        for period in [1, 2, 5, 8, 9] {
            let result = tma(&data, period).unwrap();
            assert_eq!(count_nan_prefix(&result), tma_lookback(period), "period {period}");
        }
    }

    #[test]
    fn test_lsma_is_linreg_zero_offset() {
        let data = vec![1.0_f64, 2.0, 2.0, 5.0];
        let result = lsma(&data, 4).unwrap();
        assert!((result[3] - 4.3).abs() < 1e-12);
    }
}
