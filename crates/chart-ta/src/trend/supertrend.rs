//! Supertrend and the ATR trailing stop.
//!
//! Both are ATR bands fed through the ratcheting fold in
//! [`trailing`](crate::trend::trailing):
//!
//! | | candidates | trigger | first bar |
//! |---|---|---|---|
//! | Supertrend | `src ∓ mult × ATR` | close | long iff close > src |
//! | ATR trailing stop | `close ∓ mult × ATR` | close | long |
//!
//! `src` is usually `hl2`, so Supertrend's first direction is "close above
//! the bar's midpoint".

use crate::error::Result;
use crate::traits::{validate_hlc, validate_same_len, SeriesElement};
use crate::trend::trailing::{trailing_stop, InitialDirection, TrailingOutput};
use crate::volatility::atr;

/// `(src - mult × atr, src + mult × atr)` per bar.
fn atr_bands<T: SeriesElement>(src: &[T], atr_values: &[T], multiplier: T) -> (Vec<T>, Vec<T>) {
    src.iter()
        .zip(atr_values)
        .map(|(&s, &a)| (s - multiplier * a, s + multiplier * a))
        .unzip()
}

/// Computes Supertrend over `src` (typically hl2) with ATR(`period`) bands.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::LengthMismatch` if the series differ in length.
///
/// # Example
///
/// ```
/// use chart_ta::trend::supertrend::supertrend;
/// use chart_ta::trend::trailing::Direction;
///
/// let close: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
/// let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
/// let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
/// let hl2: Vec<f64> = high.iter().zip(&low).map(|(h, l)| (h + l) / 2.0).collect();
///
/// let out = supertrend(&high, &low, &close, &hl2, 10, 3.0).unwrap();
/// assert!(out.level[8].is_nan());
/// // close sits on hl2, which is not above it: the fold starts short
/// assert_eq!(out.direction[9], Some(Direction::Short));
/// assert_eq!(out.direction[29], Some(Direction::Long));
/// ```
pub fn supertrend<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    src: &[T],
    period: usize,
    multiplier: T,
) -> Result<TrailingOutput<T>> {
    validate_hlc(high, low, close)?;
    validate_same_len(close, "close", src, "src")?;

    let atr_values = atr(high, low, close, period)?;
    let (long, short) = atr_bands(src, &atr_values, multiplier);
    trailing_stop(&long, &short, close, InitialDirection::Midpoint)
}

/// Computes the ATR trailing stop: bands around close, starting long.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::LengthMismatch` if the series differ in length.
pub fn atr_trailing_stop<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    multiplier: T,
) -> Result<TrailingOutput<T>> {
    let atr_values = atr(high, low, close, period)?;
    let (long, short) = atr_bands(close, &atr_values, multiplier);
    trailing_stop(&long, &short, close, InitialDirection::Long)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::trailing::Direction;

    fn up_then_down(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let half = n / 2;
        let close: Vec<f64> = (0..n)
            .map(|i| {
                if i < half {
                    100.0 + i as f64
                } else {
                    100.0 + (2 * half - i) as f64
                }
            })
            .collect();
        let high = close.iter().map(|c| c + 0.5).collect();
        let low = close.iter().map(|c| c - 1.5).collect();
        (high, low, close)
    }

    #[test]
    fn test_supertrend_flips_once_on_reversal() {
        let (high, low, close) = up_then_down(80);
        let hl2: Vec<f64> = high.iter().zip(&low).map(|(h, l)| (h + l) / 2.0).collect();
        let out = supertrend(&high, &low, &close, &hl2, 5, 2.0).unwrap();

        let flips: Vec<usize> = (0..80).filter(|&i| out.flipped[i]).collect();
        assert_eq!(flips.len(), 1, "flips at {flips:?}");
        assert!(flips[0] > 40 && flips[0] < 50);
        assert_eq!(out.direction[79], Some(Direction::Short));
    }

    #[test]
    fn test_supertrend_midpoint_start() {
        // close at the bar high: above hl2 → long
        let high = vec![11.0_f64, 12.0, 13.0];
        let low = vec![9.0_f64, 10.0, 11.0];
        let close = high.clone();
        let hl2 = vec![10.0_f64, 11.0, 12.0];
        let out = supertrend(&high, &low, &close, &hl2, 1, 1.0).unwrap();
        assert_eq!(out.direction[0], Some(Direction::Long));
        assert_eq!(out.level[0], 8.0);
    }

    #[test]
    fn test_stop_monotonic_between_flips() {
        let (high, low, close) = up_then_down(120);
        let hl2: Vec<f64> = high.iter().zip(&low).map(|(h, l)| (h + l) / 2.0).collect();
        let out = supertrend(&high, &low, &close, &hl2, 7, 3.0).unwrap();
        for i in 1..120 {
            if out.flipped[i] || out.level[i - 1].is_nan() {
                continue;
            }
            match out.direction[i] {
                Some(Direction::Long) => assert!(out.level[i] >= out.level[i - 1]),
                Some(Direction::Short) => assert!(out.level[i] <= out.level[i - 1]),
                None => {}
            }
        }
    }

    #[test]
    fn test_atr_trailing_stop_starts_long() {
        let (high, low, close) = up_then_down(60);
        let out = atr_trailing_stop(&high, &low, &close, 5, 1.5).unwrap();
        assert_eq!(out.direction[4], Some(Direction::Long));
        assert!(out.level[4] < close[4]);
        assert_eq!(out.direction[59], Some(Direction::Short));
    }
}
