//! Core traits for chart-ta numeric operations.
//!
//! The primary trait is [`SeriesElement`], which abstracts over `f32` and
//! `f64` so every rolling primitive can be written once. The module also
//! carries the small set of validation helpers the transforms share.
//!
//! # Example
//!
//! ```
//! use chart_ta::traits::{validate_period, SeriesElement};
//!
//! fn mean_of_first<T: SeriesElement>(data: &[T], period: usize) -> chart_ta::Result<T> {
//!     validate_period(period)?;
//!     let period_t = T::from_usize(period)?;
//!     let sum: T = data.iter().take(period).fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum / period_t)
//! }
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! assert!((mean_of_first(&data, 3).unwrap() - 2.0).abs() < 1e-10);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a data series.
///
/// Extends `num_traits::Float` with checked conversions and the handful of
/// constants indicator formulas keep reaching for.
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 2 as this type.
    #[inline]
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Returns the constant 100 as this type.
    ///
    /// Upper bound of every percentage oscillator in the crate.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        <Self as NumCast>::from(100).unwrap_or_else(Self::nan)
    }

    /// Returns the constant 50 as this type.
    ///
    /// Neutral oscillator value (flat RSI, zero-range stochastic).
    #[inline]
    #[must_use]
    fn fifty() -> Self {
        <Self as NumCast>::from(50).unwrap_or_else(Self::nan)
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Validates that a period is usable as a window length.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the period is zero.
#[inline]
pub const fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        Err(Error::InvalidPeriod {
            period,
            reason: "period must be at least 1",
        })
    } else {
        Ok(())
    }
}

/// Validates that two parallel series have the same length.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` naming both inputs when they differ.
#[inline]
pub fn validate_same_len<A, B>(
    first: &[A],
    first_name: &'static str,
    second: &[B],
    second_name: &'static str,
) -> Result<()> {
    if first.len() == second.len() {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            description: format!(
                "{first_name} has {} elements, {second_name} has {}",
                first.len(),
                second.len()
            ),
        })
    }
}

/// Validates high/low/close triples used by range-based transforms.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if any of the three slices differs in length.
#[inline]
pub fn validate_hlc<T>(high: &[T], low: &[T], close: &[T]) -> Result<()> {
    validate_same_len(high, "high", low, "low")?;
    validate_same_len(high, "high", close, "close")
}

/// Validates that an `_into` output buffer can hold `required` values.
///
/// # Errors
///
/// Returns `Error::BufferTooSmall` if the buffer is shorter than `required`.
#[inline]
pub const fn validate_output<T>(
    output: &[T],
    required: usize,
    indicator: &'static str,
) -> Result<()> {
    if output.len() < required {
        Err(Error::BufferTooSmall {
            indicator,
            required,
            actual: output.len(),
        })
    } else {
        Ok(())
    }
}
