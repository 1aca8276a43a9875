//! Zig-zag threading of pivots and Fibonacci retracements on its last leg.
//!
//! A [`ZigZag`] keeps at most `capacity` points alternating in kind. A pivot
//! of the same kind as the last point replaces it when more extreme and is
//! ignored otherwise; a pivot of the opposite kind is appended, evicting the
//! oldest point when the deque is full.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::pivots::pivot::{Pivot, PivotKind};
use crate::traits::SeriesElement;

/// Retracement ratios measured back from the end of the last leg.
pub const FIB_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// What [`ZigZag::push`] did with a pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZigZagUpdate {
    /// Opposite kind: appended as a new point.
    Appended,
    /// Same kind and more extreme: replaced the last point.
    Replaced,
    /// Same kind but not more extreme.
    Ignored,
}

/// One retracement level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibLevel<T> {
    /// Ratio from [`FIB_RATIOS`].
    pub ratio: f64,
    /// Price at that ratio.
    pub price: T,
}

/// Bounded, kind-alternating pivot sequence.
#[derive(Debug, Clone)]
pub struct ZigZag<T> {
    points: VecDeque<Pivot<T>>,
    capacity: usize,
}

impl<T: SeriesElement> ZigZag<T> {
    /// Creates an empty zig-zag holding at most `capacity` points.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if `capacity < 2` (a leg needs two
    /// points).
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < 2 {
            return Err(Error::InvalidParameter {
                name: "capacity",
                reason: "a zig-zag needs room for at least two points",
            });
        }
        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Threads `pivots` (in order) into a new zig-zag.
    ///
    /// # Errors
    ///
    /// Same as [`ZigZag::new`].
    pub fn from_pivots<I>(pivots: I, capacity: usize) -> Result<Self>
    where
        I: IntoIterator<Item = Pivot<T>>,
    {
        let mut zigzag = Self::new(capacity)?;
        for pivot in pivots {
            zigzag.push(pivot);
        }
        Ok(zigzag)
    }

    /// Adds a pivot.
    pub fn push(&mut self, pivot: Pivot<T>) -> ZigZagUpdate {
        if let Some(last) = self.points.back_mut() {
            if last.kind == pivot.kind {
                if pivot.kind.exceeds(pivot.value, last.value) {
                    *last = pivot;
                    return ZigZagUpdate::Replaced;
                }
                return ZigZagUpdate::Ignored;
            }
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(pivot);
        ZigZagUpdate::Appended
    }

    /// Points, oldest first.
    pub fn points(&self) -> impl Iterator<Item = &Pivot<T>> + '_ {
        self.points.iter()
    }

    /// Number of points held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of points kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Kind of the most recent point: the running swing direction.
    #[must_use]
    pub fn last_kind(&self) -> Option<PivotKind> {
        self.points.back().map(|p| p.kind)
    }

    /// The last two points as `(start, end)`.
    #[must_use]
    pub fn last_leg(&self) -> Option<(Pivot<T>, Pivot<T>)> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        Some((self.points[n - 2], self.points[n - 1]))
    }

    /// Retracement levels of the last leg: ratio 0 sits on the leg's end,
    /// ratio 1 on its start.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if a ratio cannot be represented in
    /// `T`.
    pub fn fib_levels(&self) -> Result<Vec<FibLevel<T>>> {
        let Some((start, end)) = self.last_leg() else {
            return Ok(Vec::new());
        };
        let span = end.value - start.value;
        FIB_RATIOS
            .iter()
            .map(|&ratio| {
                Ok(FibLevel {
                    ratio,
                    price: end.value - span * T::from_f64(ratio)?,
                })
            })
            .collect()
    }
}
