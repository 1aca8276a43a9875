//! Index-aligned numeric series.
//!
//! A [`Series`] holds exactly one value per bar; NaN marks "no value yet".
//! Series are never mutated after creation: arithmetic and shifting return
//! new series, which is how indicators compose primitives such as
//! `2 * wma(src, n / 2) - wma(src, n)`.
//!
//! Binary operations between series of different lengths produce a series as
//! long as the longer operand, NaN where either side has no value.
//!
//! # Example
//!
//! ```
//! use chart_ta::series::Series;
//!
//! let a = Series::from(vec![1.0_f64, 2.0, 3.0]);
//! let b = Series::from(vec![0.5_f64, 0.5, f64::NAN]);
//!
//! let sum = &a + &b;
//! assert_eq!(sum[0], 1.5);
//! assert!(sum[2].is_nan());
//!
//! let lagged = a.shift(1);
//! assert!(lagged[0].is_nan());
//! assert_eq!(lagged[2], 2.0);
//! ```

use std::ops::{Add, Deref, Div, Mul, Sub};

use crate::traits::SeriesElement;

/// An immutable, index-aligned sequence of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series<T = f64>(Vec<T>);

impl<T: SeriesElement> Series<T> {
    /// Wraps already computed values.
    #[must_use]
    pub const fn new(values: Vec<T>) -> Self {
        Self(values)
    }

    /// A series of `len` NaN values.
    #[must_use]
    pub fn nan(len: usize) -> Self {
        Self(vec![T::nan(); len])
    }

    /// Builds a series from a generating function of the bar index.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        Self((0..len).map(f).collect())
    }

    /// Value at `index`, NaN when out of range.
    #[inline]
    #[must_use]
    pub fn at(&self, index: usize) -> T {
        self.0.get(index).copied().unwrap_or_else(T::nan)
    }

    /// The value `bars` bars ago at every index (NaN before the start).
    #[must_use]
    pub fn shift(&self, bars: usize) -> Self {
        Self::from_fn(self.0.len(), |i| {
            if i >= bars {
                self.0[i - bars]
            } else {
                T::nan()
            }
        })
    }

    /// Applies `f` to every value.
    #[must_use]
    pub fn map(&self, f: impl Fn(T) -> T) -> Self {
        Self(self.0.iter().map(|&v| f(v)).collect())
    }

    /// Combines two series elementwise; the result is as long as the longer.
    #[must_use]
    pub fn zip_with(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        let len = self.0.len().max(other.0.len());
        Self::from_fn(len, |i| f(self.at(i), other.at(i)))
    }

    /// Replaces NaN with `replacement`.
    #[must_use]
    pub fn nz(&self, replacement: T) -> Self {
        self.map(|v| if v.is_nan() { replacement } else { v })
    }

    /// Borrows the values.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Consumes the series.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for Series<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for Series<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<T> From<Series<T>> for Vec<T> {
    fn from(series: Series<T>) -> Self {
        series.0
    }
}

impl<T> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Series<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

macro_rules! series_binary_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: SeriesElement> $trait<&Series<T>> for &Series<T> {
            type Output = Series<T>;

            fn $method(self, rhs: &Series<T>) -> Series<T> {
                self.zip_with(rhs, |a, b| a $op b)
            }
        }

        impl<T: SeriesElement> $trait<Series<T>> for Series<T> {
            type Output = Series<T>;

            fn $method(self, rhs: Series<T>) -> Series<T> {
                &self $op &rhs
            }
        }

        impl<T: SeriesElement> $trait<&Series<T>> for Series<T> {
            type Output = Series<T>;

            fn $method(self, rhs: &Series<T>) -> Series<T> {
                &self $op rhs
            }
        }

        impl<T: SeriesElement> $trait<Series<T>> for &Series<T> {
            type Output = Series<T>;

            fn $method(self, rhs: Series<T>) -> Series<T> {
                self $op &rhs
            }
        }

        impl<T: SeriesElement> $trait<T> for &Series<T> {
            type Output = Series<T>;

            fn $method(self, rhs: T) -> Series<T> {
                self.map(|a| a $op rhs)
            }
        }

        impl<T: SeriesElement> $trait<T> for Series<T> {
            type Output = Series<T>;

            fn $method(self, rhs: T) -> Series<T> {
                &self $op rhs
            }
        }
    };
}

series_binary_op!(Add, add, +);
series_binary_op!(Sub, sub, -);
series_binary_op!(Mul, mul, *);
series_binary_op!(Div, div, /);

/// `true` at bars where `a` crosses above `b`.
///
/// Requires both series to be defined on the current and previous bar:
/// `a[i] > b[i]` and `a[i-1] <= b[i-1]`.
#[must_use]
pub fn crossover<T: SeriesElement>(a: &[T], b: &[T]) -> Vec<bool> {
    cross_with(a, b, |prev_a, prev_b, cur_a, cur_b| {
        cur_a > cur_b && prev_a <= prev_b
    })
}

/// `true` at bars where `a` crosses below `b`.
#[must_use]
pub fn crossunder<T: SeriesElement>(a: &[T], b: &[T]) -> Vec<bool> {
    cross_with(a, b, |prev_a, prev_b, cur_a, cur_b| {
        cur_a < cur_b && prev_a >= prev_b
    })
}

/// `true` at bars where `a` crosses `b` in either direction.
#[must_use]
pub fn cross<T: SeriesElement>(a: &[T], b: &[T]) -> Vec<bool> {
    crossover(a, b)
        .into_iter()
        .zip(crossunder(a, b))
        .map(|(up, down)| up || down)
        .collect()
}

fn cross_with<T: SeriesElement>(a: &[T], b: &[T], test: impl Fn(T, T, T, T) -> bool) -> Vec<bool> {
    let len = a.len().max(b.len());
    let value = |s: &[T], i: usize| s.get(i).copied().unwrap_or_else(T::nan);
    (0..len)
        .map(|i| {
            if i == 0 {
                return false;
            }
            let (pa, pb, ca, cb) = (value(a, i - 1), value(b, i - 1), value(a, i), value(b, i));
            if pa.is_nan() || pb.is_nan() || ca.is_nan() || cb.is_nan() {
                false
            } else {
                test(pa, pb, ca, cb)
            }
        })
        .collect()
}
