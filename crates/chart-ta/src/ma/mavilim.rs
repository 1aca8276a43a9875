//! MavilimW: a six-stage WMA cascade.
//!
//! Each stage smooths the previous stage's output, and each stage length is
//! the sum of the two before it:
//!
//! ```text
//! lengths = l1, l2, l1+l2, l2+l3, l3+l4, l4+l5      (3, 5 → 3 5 8 13 21 34)
//! M1 = WMA(src, l1), M2 = WMA(M1, l2), ..., M6 = WMA(M5, l6)
//! ```
//!
//! The warmup is the sum of every stage's `length - 1`.

use crate::error::Result;
use crate::ma::wma::wma;
use crate::traits::SeriesElement;

/// Number of WMA stages in the cascade.
pub const MAVILIM_STAGES: usize = 6;

/// Stage lengths grown Fibonacci-style from the first two.
#[must_use]
pub const fn mavilim_lengths(first: usize, second: usize) -> [usize; MAVILIM_STAGES] {
    let mut lengths = [0; MAVILIM_STAGES];
    lengths[0] = first;
    lengths[1] = second;
    let mut i = 2;
    while i < MAVILIM_STAGES {
        lengths[i] = lengths[i - 1] + lengths[i - 2];
        i += 1;
    }
    lengths
}

/// Returns the lookback of the full cascade.
#[must_use]
pub const fn mavilim_lookback(first: usize, second: usize) -> usize {
    let lengths = mavilim_lengths(first, second);
    let mut total = 0;
    let mut i = 0;
    while i < MAVILIM_STAGES {
        total += lengths[i].saturating_sub(1);
        i += 1;
    }
    total
}

/// Computes MavilimW with first and second stage lengths.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if either length is zero.
///
/// # Example
///
/// ```
/// use chart_ta::ma::{mavilim, mavilim_lookback};
///
/// let data: Vec<f64> = (0..120).map(f64::from).collect();
/// let result = mavilim(&data, 3, 5).unwrap();
/// assert_eq!(mavilim_lookback(3, 5), 78);
/// assert!(result[77].is_nan());
/// assert!(!result[78].is_nan());
/// ```
pub fn mavilim<T: SeriesElement>(data: &[T], first: usize, second: usize) -> Result<Vec<T>> {
    let lengths = mavilim_lengths(first, second);
    let mut stage = data.to_vec();
    for &length in &lengths {
        stage = wma(&stage, length)?;
    }
    Ok(stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::count_nan_prefix;

    #[test]
    fn test_lengths() {
        assert_eq!(mavilim_lengths(3, 5), [3, 5, 8, 13, 21, 34]);
        assert_eq!(mavilim_lengths(1, 1), [1, 1, 2, 3, 5, 8]);
    }

    #[test]
    fn test_warmup_is_sum_of_stages() {
        let data: Vec<f64> = (0..150).map(|i| f64::from(i % 7)).collect();
        let result = mavilim(&data, 3, 5).unwrap();
        assert_eq!(count_nan_prefix(&result), mavilim_lookback(3, 5));
        assert_eq!(mavilim_lookback(3, 5), 2 + 4 + 7 + 12 + 20 + 33);
    }

    #[test]
    fn test_constant_input() {
        let result = mavilim(&[7.0_f64; 100], 3, 5).unwrap();
        assert!((result[99] - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_short_input_all_nan() {
        let result = mavilim(&[1.0_f64; 40], 3, 5).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
