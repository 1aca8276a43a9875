//! Tillson T3 moving average.
//!
//! Six cascaded EMAs of the same length combined with fixed coefficients
//! derived from the volume factor `b`:
//!
//! ```text
//! e1 = EMA(src, n), e2 = EMA(e1, n), ..., e6 = EMA(e5, n)
//!
//! c1 = -b³
//! c2 = 3b² + 3b³
//! c3 = -6b² - 3b - 3b³
//! c4 = 1 + 3b + b³ + 3b²
//!
//! T3 = c1×e6 + c2×e5 + c3×e4 + c4×e3
//! ```
//!
//! The coefficients sum to one, so T3 of a constant series is that constant.
//!
//! # Example
//!
//! ```
//! use chart_ta::ma::t3;
//!
//! let data = vec![5.0_f64; 20];
//! let result = t3(&data, 5, 0.7).unwrap();
//! assert!((result[19] - 5.0).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::ma::ema::ema;
use crate::traits::SeriesElement;

/// Default Tillson volume factor.
pub const DEFAULT_VOLUME_FACTOR: f64 = 0.7;

/// The four T3 coefficients `(c1, c2, c3, c4)` for volume factor `b`.
#[must_use]
pub fn t3_coefficients<T: SeriesElement>(b: T) -> (T, T, T, T) {
    let three = T::two() + T::one();
    let six = three + three;
    let b2 = b * b;
    let b3 = b2 * b;

    let c1 = -b3;
    let c2 = three * b2 + three * b3;
    let c3 = -six * b2 - three * b - three * b3;
    let c4 = T::one() + three * b + b3 + three * b2;
    (c1, c2, c3, c4)
}

/// Computes the T3 moving average with volume factor `volume_factor`.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn t3<T: SeriesElement>(data: &[T], period: usize, volume_factor: T) -> Result<Vec<T>> {
    let e1 = ema(data, period)?;
    let e2 = ema(&e1, period)?;
    let e3 = ema(&e2, period)?;
    let e4 = ema(&e3, period)?;
    let e5 = ema(&e4, period)?;
    let e6 = ema(&e5, period)?;

    let (c1, c2, c3, c4) = t3_coefficients(volume_factor);

    Ok((0..data.len())
        .map(|i| c1 * e6[i] + c2 * e5[i] + c3 * e4[i] + c4 * e3[i])
        .collect())
}
