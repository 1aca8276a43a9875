//! QQE (Quantitative Qualitative Estimation) trailing bands on smoothed RSI.
//!
//! ```text
//! rsi_ma = EMA(RSI(src, n), smoothing)
//! wilders = 2n - 1
//! dar    = EMA(EMA(|rsi_ma - rsi_ma[1]|, wilders), wilders) × factor
//! stop   = trailing fold of (rsi_ma - dar, rsi_ma + dar) triggered by rsi_ma,
//!          starting long
//! ```

use crate::error::Result;
use crate::ma::ema::ema;
use crate::oscillators::rsi::rsi;
use crate::traits::{validate_period, SeriesElement};
use crate::trend::trailing::{trailing_stop, InitialDirection, TrailingOutput};

/// Output of [`qqe`].
#[derive(Debug, Clone, PartialEq)]
pub struct QqeOutput<T> {
    /// Smoothed RSI.
    pub rsi_ma: Vec<T>,
    /// Dynamic band width.
    pub dar: Vec<T>,
    /// Trailing line around `rsi_ma`.
    pub stop: TrailingOutput<T>,
}

/// Computes QQE.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` or `smoothing` is zero.
///
/// # Example
///
/// ```
/// use chart_ta::trend::qqe::qqe;
///
/// let data: Vec<f64> = (0..100).map(|i| (f64::from(i) * 0.2).sin() * 10.0 + 50.0).collect();
/// let out = qqe(&data, 14, 5, 4.236).unwrap();
/// assert!(out.rsi_ma[13].is_nan());
/// assert!(out.stop.level[15].is_finite());
/// ```
pub fn qqe<T: SeriesElement>(src: &[T], period: usize, smoothing: usize, factor: T) -> Result<QqeOutput<T>> {
    validate_period(period)?;
    let wilders = 2 * period - 1;

    let rsi_values = rsi(src, period)?;
    let rsi_ma = ema(&rsi_values, smoothing)?;
    let abs_change: Vec<T> = (0..rsi_ma.len())
        .map(|i| if i == 0 { T::nan() } else { (rsi_ma[i] - rsi_ma[i - 1]).abs() })
        .collect();
    let dar: Vec<T> = ema(&ema(&abs_change, wilders)?, wilders)?
        .into_iter()
        .map(|v| v * factor)
        .collect();

    let (long, short): (Vec<T>, Vec<T>) = rsi_ma
        .iter()
        .zip(&dar)
        .map(|(&r, &d)| (r - d, r + d))
        .unzip();
    let stop = trailing_stop(&long, &short, &rsi_ma, InitialDirection::Long)?;

    Ok(QqeOutput { rsi_ma, dar, stop })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::trailing::Direction;
    use crate::utils::count_nan_prefix;

    #[test]
    fn test_qqe_warmup() {
        let data: Vec<f64> = (0..80).map(|i| f64::from(i % 11) + f64::from(i) * 0.3).collect();
        let out = qqe(&data, 14, 5, 4.236).unwrap();
        assert_eq!(count_nan_prefix(&out.rsi_ma), 14);
        assert_eq!(count_nan_prefix(&out.dar), 15);
        assert_eq!(count_nan_prefix(&out.stop.level), 15);
    }

    #[test]
    fn test_qqe_band_stays_below_while_long() {
        let data: Vec<f64> = (0..120).map(|i| (f64::from(i) * 0.15).sin() * 8.0 + 40.0).collect();
        let out = qqe(&data, 10, 5, 4.236).unwrap();
        for i in 0..120 {
            if out.stop.direction[i] == Some(Direction::Long) && !out.stop.flipped[i] {
                assert!(out.stop.level[i] <= out.rsi_ma[i] + 1e-9);
            }
        }
    }

    #[test]
    fn test_qqe_zero_period() {
        assert!(qqe(&[1.0_f64; 5], 0, 5, 4.236).is_err());
    }
}
