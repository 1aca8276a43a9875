//! Rolling extrema using a monotonic deque for O(n) highest/lowest.
//!
//! The deque keeps indices whose values are monotonically ordered
//! (decreasing for max, increasing for min), so the front is always the
//! extremum of the current window.
//!
//! # Ties
//!
//! A new value evicts every queued value it *equals or beats*, so among
//! equal extrema the most recent bar sits at the front. `highest_bars` and
//! `lowest_bars` therefore report the occurrence closest to the current bar.
//!
//! # NaN
//!
//! A window containing NaN yields NaN. This keeps chained normalizations
//! (stochastic of RSI, stochastic of MACD) aligned with the warmup of their
//! input series.
//!
//! # Example
//!
//! ```
//! use chart_ta::kernels::rolling_extrema::{highest, highest_bars, lowest};
//!
//! let data = vec![3.0_f64, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
//!
//! let max = highest(&data, 3).unwrap();
//! assert!(max[1].is_nan());
//! assert_eq!(max[2], 4.0); // max of [3, 1, 4]
//! assert_eq!(max[5], 9.0); // max of [1, 5, 9]
//!
//! let min = lowest(&data, 3).unwrap();
//! assert_eq!(min[4], 1.0); // min of [4, 1, 5]
//!
//! let offsets = highest_bars(&data, 3).unwrap();
//! assert_eq!(offsets[7], Some(2)); // 9 was two bars ago
//! ```

use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::error::Result;
use crate::traits::{validate_output, validate_period, SeriesElement};

/// Returns the lookback period for rolling extrema (`period - 1`).
#[inline]
#[must_use]
pub const fn rolling_extrema_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    Max,
    Min,
}

/// A monotonic deque tracking the extremum of a sliding window.
#[derive(Debug, Clone)]
pub struct MonotonicDeque<T> {
    deque: VecDeque<usize>,
    period: usize,
    kind: Extremum,
    last_nan: Option<usize>,
    _phantom: PhantomData<T>,
}

impl<T: SeriesElement> MonotonicDeque<T> {
    /// Creates a deque tracking the rolling maximum.
    #[must_use]
    pub fn max(period: usize) -> Self {
        Self::with_kind(period, Extremum::Max)
    }

    /// Creates a deque tracking the rolling minimum.
    #[must_use]
    pub fn min(period: usize) -> Self {
        Self::with_kind(period, Extremum::Min)
    }

    fn with_kind(period: usize, kind: Extremum) -> Self {
        Self {
            deque: VecDeque::with_capacity(period),
            period,
            kind,
            last_nan: None,
            _phantom: PhantomData,
        }
    }

    /// Returns the window size.
    #[must_use]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Pushes `data[index]`; indices must be pushed in increasing order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `data`.
    #[inline]
    pub fn push(&mut self, index: usize, data: &[T]) {
        let value = data[index];

        if value.is_nan() {
            self.last_nan = Some(index);
        } else {
            while let Some(&back_idx) = self.deque.back() {
                let back_val = data[back_idx];
                let evict = match self.kind {
                    Extremum::Max => value >= back_val,
                    Extremum::Min => value <= back_val,
                };
                if evict {
                    self.deque.pop_back();
                } else {
                    break;
                }
            }
            self.deque.push_back(index);
        }

        self.remove_expired(index);
    }

    #[inline]
    fn remove_expired(&mut self, current_index: usize) {
        if current_index + 1 >= self.period {
            let window_start = current_index + 1 - self.period;
            while let Some(&front_idx) = self.deque.front() {
                if front_idx < window_start {
                    self.deque.pop_front();
                } else {
                    break;
                }
            }
        }
    }

    /// Index of the window extremum ending at `current_index`.
    ///
    /// `None` while the window is incomplete or contains NaN.
    #[inline]
    #[must_use]
    pub fn front_index(&self, current_index: usize) -> Option<usize> {
        if current_index + 1 < self.period {
            return None;
        }
        let window_start = current_index + 1 - self.period;
        if self.last_nan.is_some_and(|nan_idx| nan_idx >= window_start) {
            return None;
        }
        self.deque.front().copied()
    }
}

/// Output structure containing both rolling maximum and minimum.
#[derive(Debug, Clone)]
pub struct RollingExtremaOutput<T> {
    /// The rolling maximum values.
    pub max: Vec<T>,
    /// The rolling minimum values.
    pub min: Vec<T>,
}

fn extremum_into<T: SeriesElement>(data: &[T], output: &mut [T], mut deque: MonotonicDeque<T>) -> usize {
    let mut defined = 0;
    for i in 0..data.len() {
        deque.push(i, data);
        output[i] = match deque.front_index(i) {
            Some(idx) => {
                defined += 1;
                data[idx]
            }
            None => T::nan(),
        };
    }
    defined
}

/// Highest value over the trailing `period` bars, inclusive of the current bar.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn highest<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    highest_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes [`highest`] into a pre-allocated buffer, returning the number of
/// defined values.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::BufferTooSmall` if `output` is shorter than `data`.
pub fn highest_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<usize> {
    validate_period(period)?;
    validate_output(output, data.len(), "highest")?;
    Ok(extremum_into(data, output, MonotonicDeque::max(period)))
}

/// Lowest value over the trailing `period` bars, inclusive of the current bar.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn lowest<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    lowest_into(data, period, &mut output)?;
    Ok(output)
}

/// Computes [`lowest`] into a pre-allocated buffer, returning the number of
/// defined values.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::BufferTooSmall` if `output` is shorter than `data`.
pub fn lowest_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<usize> {
    validate_period(period)?;
    validate_output(output, data.len(), "lowest")?;
    Ok(extremum_into(data, output, MonotonicDeque::min(period)))
}

/// Computes both rolling maximum and minimum in a single pass.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn rolling_extrema<T: SeriesElement>(data: &[T], period: usize) -> Result<RollingExtremaOutput<T>> {
    validate_period(period)?;

    let n = data.len();
    let mut max = vec![T::nan(); n];
    let mut min = vec![T::nan(); n];
    let mut max_deque = MonotonicDeque::max(period);
    let mut min_deque = MonotonicDeque::min(period);

    for i in 0..n {
        max_deque.push(i, data);
        min_deque.push(i, data);
        if let Some(idx) = max_deque.front_index(i) {
            max[i] = data[idx];
        }
        if let Some(idx) = min_deque.front_index(i) {
            min[i] = data[idx];
        }
    }

    Ok(RollingExtremaOutput { max, min })
}

fn offsets<T: SeriesElement>(data: &[T], mut deque: MonotonicDeque<T>) -> Vec<Option<usize>> {
    (0..data.len())
        .map(|i| {
            deque.push(i, data);
            deque.front_index(i).map(|idx| i - idx)
        })
        .collect()
}

/// How many bars back the window maximum occurred (0 = current bar).
///
/// On ties the most recent occurrence wins. `None` where the window is
/// incomplete or contains NaN.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn highest_bars<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<usize>>> {
    validate_period(period)?;
    Ok(offsets(data, MonotonicDeque::max(period)))
}

/// How many bars back the window minimum occurred (0 = current bar).
///
/// On ties the most recent occurrence wins.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period` is zero.
pub fn lowest_bars<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<Option<usize>>> {
    validate_period(period)?;
    Ok(offsets(data, MonotonicDeque::min(period)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn naive(data: &[f64], period: usize, pick_max: bool) -> Vec<f64> {
        (0..data.len())
            .map(|i| {
                if i + 1 < period {
                    return f64::NAN;
                }
                let window = &data[i + 1 - period..=i];
                if window.iter().any(|v| v.is_nan()) {
                    return f64::NAN;
                }
                window.iter().copied().fold(
                    if pick_max { f64::NEG_INFINITY } else { f64::INFINITY },
                    |acc, v| if pick_max { acc.max(v) } else { acc.min(v) },
                )
            })
            .collect()
    }

    fn same(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(x, y)| (x.is_nan() && y.is_nan()) || (x - y).abs() < 1e-12)
    }

    #[test]
    fn test_highest_basic() {
        let data = vec![1.0_f64, 3.0, 2.0, 5.0, 4.0];
        let result = highest(&data, 3).unwrap();
        assert!(result[0].is_nan() && result[1].is_nan());
        assert_eq!(&result[2..], &[3.0, 5.0, 5.0]);
    }

    #[test]
    fn test_lowest_basic() {
        let data = vec![5.0_f64, 3.0, 4.0, 1.0, 2.0];
        let result = lowest(&data, 3).unwrap();
        assert_eq!(&result[2..], &[3.0, 1.0, 1.0]);
    }

    #[test]
    fn test_period_one_is_identity() {
        let data = vec![2.0_f64, -1.0, 7.0];
        assert_eq!(highest(&data, 1).unwrap(), data);
        assert_eq!(lowest(&data, 1).unwrap(), data);
    }

    #[test]
    fn test_matches_naive_scan() {
        let data: Vec<f64> = (0..60)
            .map(|i| ((i * 37) % 11) as f64 - (i % 4) as f64 * 0.5)
            .collect();
        for period in 1..=9 {
            assert!(same(&highest(&data, period).unwrap(), &naive(&data, period, true)));
            assert!(same(&lowest(&data, period).unwrap(), &naive(&data, period, false)));
        }
    }

    #[test]
    fn test_nan_in_window_yields_nan() {
        let data = vec![1.0_f64, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0];
        let result = highest(&data, 3).unwrap();
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
        assert!(result[4].is_nan());
        assert_eq!(result[5], 6.0);
        assert!(same(&result, &naive(&data, 3, true)));
    }

    #[test]
    fn test_input_shorter_than_period_is_all_nan() {
        let data = vec![1.0_f64, 2.0];
        let result = highest(&data, 5).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|v| v.is_nan()));
        assert!(lowest::<f64>(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(matches!(
            highest(&[1.0_f64], 0),
            Err(Error::InvalidPeriod { .. })
        ));
        assert!(lowest_bars(&[1.0_f64], 0).is_err());
    }

    #[test]
    fn test_highest_bars_most_recent_tie_wins() {
        let data = vec![5.0_f64, 1.0, 5.0, 2.0];
        let offsets = highest_bars(&data, 4).unwrap();
        assert_eq!(offsets[3], Some(1));

        let flat = vec![3.0_f64; 5];
        let offsets = lowest_bars(&flat, 3).unwrap();
        assert_eq!(offsets, vec![None, None, Some(0), Some(0), Some(0)]);
    }

    #[test]
    fn test_lowest_bars_tracks_expiry() {
        let data = vec![1.0_f64, 4.0, 3.0, 5.0, 6.0];
        let offsets = lowest_bars(&data, 3).unwrap();
        assert_eq!(offsets[2], Some(2));
        assert_eq!(offsets[3], Some(1));
        assert_eq!(offsets[4], Some(2));
    }

    #[test]
    fn test_rolling_extrema_matches_separate() {
        let data = vec![3.0_f64, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let both = rolling_extrema(&data, 3).unwrap();
        assert!(same(&both.max, &highest(&data, 3).unwrap()));
        assert!(same(&both.min, &lowest(&data, 3).unwrap()));
    }

    #[test]
    fn test_into_counts_defined_values() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let mut out = vec![0.0; 5];
        assert_eq!(highest_into(&data, 2, &mut out).unwrap(), 4);
        assert!(out[0].is_nan());

        let mut short = vec![0.0; 3];
        assert!(matches!(
            lowest_into(&data, 2, &mut short),
            Err(Error::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn test_f32_support() {
        let data = vec![1.0_f32, 5.0, 3.0];
        let result = highest(&data, 2).unwrap();
        assert!((result[2] - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_lookback() {
        assert_eq!(rolling_extrema_lookback(1), 0);
        assert_eq!(rolling_extrema_lookback(14), 13);
    }
}
