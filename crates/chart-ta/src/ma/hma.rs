//! Hull Moving Average (HMA).
//!
//! Reduces WMA lag by extrapolating a half-length WMA against a full-length
//! one, then smoothing the result over `round(√period)` bars.
//!
//! # Formula
//!
//! ```text
//! raw = 2 × WMA(src, ⌊n/2⌋) − WMA(src, n)
//! HMA = WMA(raw, round(√n))
//! ```
//!
//! # Example
//!
//! ```
//! use chart_ta::ma::{hma, hma_lookback, hma_periods};
//!
//! assert_eq!(hma_periods(16), (8, 4));
//! assert_eq!(hma_lookback(16), 18);
//!
//! // On a straight line HMA sits a constant 2/3 below the price.
//! let data: Vec<f64> = (0..40).map(f64::from).collect();
//! let result = hma(&data, 16).unwrap();
//! assert!(result[17].is_nan());
//! assert!((result[30] - (30.0 - 2.0 / 3.0)).abs() < 1e-9);
//! ```

use crate::error::{Error, Result};
use crate::ma::wma::wma;
use crate::series::Series;
use crate::traits::SeriesElement;

/// Returns `(half, sqrt)` window lengths for a Hull period.
#[inline]
#[must_use]
pub fn hma_periods(period: usize) -> (usize, usize) {
    let sqrt = (period as f64).sqrt().round() as usize;
    (period / 2, sqrt.max(1))
}

/// Returns the lookback period for HMA: `(period - 1) + (round(√period) - 1)`.
#[inline]
#[must_use]
pub fn hma_lookback(period: usize) -> usize {
    let (_, sqrt) = hma_periods(period);
    period.saturating_sub(1) + sqrt - 1
}

/// Computes the Hull Moving Average of a series.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `period < 2` (the half window would
/// be empty).
pub fn hma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    if period < 2 {
        return Err(Error::InvalidParameter {
            name: "period",
            reason: "hull moving average requires a period of at least 2",
        });
    }
    let (half, sqrt) = hma_periods(period);

    let fast = Series::from(wma(data, half)?);
    let slow = Series::from(wma(data, period)?);
    let raw = fast * T::two() - slow;

    wma(&raw, sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::count_nan_prefix;

    #[test]
    fn test_hma_periods() {
        assert_eq!(hma_periods(16), (8, 4));
        assert_eq!(hma_periods(9), (4, 3));
        assert_eq!(hma_periods(2), (1, 1));
        assert_eq!(hma_periods(55), (27, 7));
    }

    #[test]
    fn test_hma_linear_reference() {
        let data: Vec<f64> = (0..60).map(|i| 100.0 + 0.5 * f64::from(i)).collect();
        let result = hma(&data, 16).unwrap();
        assert_eq!(count_nan_prefix(&result), hma_lookback(16));
        for i in 18..60 {
            let expected = 100.0 + 0.5 * (i as f64 - 2.0 / 3.0);
            assert!((result[i] - expected).abs() < 1e-9, "index {i}");
        }
    }

    #[test]
    fn test_hma_rejects_period_one() {
        assert!(matches!(
            hma(&[1.0_f64, 2.0], 1),
            Err(Error::InvalidParameter { name: "period", .. })
        ));
    }

    #[test]
    fn test_hma_constant() {
        let result = hma(&[4.0_f64; 30], 9).unwrap();
        let start = hma_lookback(9);
        assert!(result[start..].iter().all(|v| (v - 4.0).abs() < 1e-12));
    }
}
