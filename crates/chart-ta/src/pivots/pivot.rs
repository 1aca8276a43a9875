//! Pivot highs and lows over a left/right window.
//!
//! Bar `i` is a pivot high when `src[i]` is strictly greater than every
//! other value in `[i - left, i + right]`; equal neighbours disqualify it.
//! Pivot lows are symmetric.
//!
//! Detection looks `right` bars ahead. The value is reported on the pivot's
//! own bar, but it only becomes knowable at `confirmed_at = index + right`.
//!
//! # Example
//!
//! ```
//! use chart_ta::pivots::{pivot_high, pivot_low};
//!
//! let data = vec![1.0_f64, 3.0, 2.0, 0.5, 2.5, 2.5, 1.0];
//! let highs = pivot_high(&data, 1, 1).unwrap();
//! assert_eq!(highs[1], 3.0);
//! assert!(highs[4].is_nan()); // tie with the next bar
//!
//! let lows = pivot_low(&data, 1, 1).unwrap();
//! assert_eq!(lows[3], 0.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::{validate_same_len, SeriesElement};

/// Which extreme a pivot marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotKind {
    /// Local maximum.
    High,
    /// Local minimum.
    Low,
}

impl PivotKind {
    /// The other kind.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::High => Self::Low,
            Self::Low => Self::High,
        }
    }

    /// Whether `candidate` is more extreme than `current` for this kind.
    #[must_use]
    pub fn exceeds<T: SeriesElement>(self, candidate: T, current: T) -> bool {
        match self {
            Self::High => candidate > current,
            Self::Low => candidate < current,
        }
    }
}

/// A confirmed local extremum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pivot<T> {
    /// Bar of the extremum.
    pub index: usize,
    /// Price at the extremum.
    pub value: T,
    /// High or low.
    pub kind: PivotKind,
    /// First bar at which the pivot is observable (`index + right`).
    pub confirmed_at: usize,
}

fn validate_window(left: usize, right: usize) -> Result<()> {
    if left == 0 && right == 0 {
        return Err(Error::InvalidParameter {
            name: "left/right",
            reason: "a pivot window needs at least one neighbouring bar",
        });
    }
    Ok(())
}

fn pivots_of<T: SeriesElement>(src: &[T], left: usize, right: usize, kind: PivotKind) -> Result<Vec<T>> {
    validate_window(left, right)?;

    let n = src.len();
    Ok((0..n)
        .map(|i| {
            if i < left || i + right >= n {
                return T::nan();
            }
            let center = src[i];
            if center.is_nan() {
                return T::nan();
            }
            let is_pivot = (i - left..=i + right)
                .filter(|&j| j != i)
                .all(|j| kind.exceeds(center, src[j]));
            if is_pivot {
                center
            } else {
                T::nan()
            }
        })
        .collect())
}

/// Pivot high value on its own bar, NaN elsewhere.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if both `left` and `right` are zero.
pub fn pivot_high<T: SeriesElement>(src: &[T], left: usize, right: usize) -> Result<Vec<T>> {
    pivots_of(src, left, right, PivotKind::High)
}

/// Pivot low value on its own bar, NaN elsewhere.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if both `left` and `right` are zero.
pub fn pivot_low<T: SeriesElement>(src: &[T], left: usize, right: usize) -> Result<Vec<T>> {
    pivots_of(src, left, right, PivotKind::Low)
}

/// All pivot highs of `high` and lows of `low`, ordered by bar; on a bar
/// that is both, the high comes first.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if both `left` and `right` are zero and
/// `Error::LengthMismatch` if the series differ in length.
pub fn find_pivots<T: SeriesElement>(
    high: &[T],
    low: &[T],
    left: usize,
    right: usize,
) -> Result<Vec<Pivot<T>>> {
    validate_same_len(high, "high", low, "low")?;

    let highs = pivot_high(high, left, right)?;
    let lows = pivot_low(low, left, right)?;

    let mut pivots = Vec::new();
    for i in 0..high.len() {
        for (series, kind) in [(&highs, PivotKind::High), (&lows, PivotKind::Low)] {
            if !series[i].is_nan() {
                pivots.push(Pivot {
                    index: i,
                    value: series[i],
                    kind,
                    confirmed_at: i + right,
                });
            }
        }
    }
    Ok(pivots)
}
