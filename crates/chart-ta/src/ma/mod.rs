//! Moving averages.
//!
//! # Window averages
//! - [`sma()`]: Simple Moving Average
//! - [`wma()`]: Weighted Moving Average
//! - [`ema()`] / [`rma()`]: Exponential and Wilder averages
//!
//! # Cascaded and adaptive
//! - [`hma()`]: Hull Moving Average
//! - [`t3()`]: Tillson T3
//! - [`mavilim()`]: MavilimW WMA cascade
//! - [`var()`], [`wwma()`], [`zlema()`], [`tma()`], [`lsma()`]
//!
//! Indicators that let the user pick an average take a [`MaType`] and call
//! [`moving_average`].

pub mod adaptive;
pub mod ema;
pub mod hma;
pub mod mavilim;
pub mod sma;
pub mod t3;
pub mod wma;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

pub use adaptive::{lsma, tma, tma_lookback, var, wwma, zlema, zlema_lookback, VAR_CMO_WINDOW};
pub use ema::{ema, ema_into, ema_lookback, rma, rma_into, rma_lookback};
pub use hma::{hma, hma_lookback, hma_periods};
pub use mavilim::{mavilim, mavilim_lengths, mavilim_lookback, MAVILIM_STAGES};
pub use sma::{sma, sma_into, sma_lookback};
pub use t3::{t3, t3_coefficients, DEFAULT_VOLUME_FACTOR};
pub use wma::{wma, wma_into, wma_lookback};

/// The closed set of selectable moving averages.
///
/// Parses from and serializes to lowercase names (`"ema"`, `"var"`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaType {
    /// Simple
    #[default]
    Sma,
    /// Exponential, seeded with the first value
    Ema,
    /// Wilder
    Rma,
    /// Linearly weighted
    Wma,
    /// Hull
    Hma,
    /// Triangular
    Tma,
    /// Variable index dynamic average
    Var,
    /// Welles Wilder, seeded with the first value
    Wwma,
    /// Zero-lag EMA
    Zlema,
    /// Least squares
    Lsma,
}

impl MaType {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Sma,
        Self::Ema,
        Self::Rma,
        Self::Wma,
        Self::Hma,
        Self::Tma,
        Self::Var,
        Self::Wwma,
        Self::Zlema,
        Self::Lsma,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Rma => "rma",
            Self::Wma => "wma",
            Self::Hma => "hma",
            Self::Tma => "tma",
            Self::Var => "var",
            Self::Wwma => "wwma",
            Self::Zlema => "zlema",
            Self::Lsma => "lsma",
        }
    }
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|ma| ma.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(Error::InvalidParameter {
                name: "ma_type",
                reason: "unknown moving average type",
            })
    }
}

/// Applies the selected moving average.
///
/// # Errors
///
/// Propagates the selected average's errors (zero period, Hull with a
/// period below 2).
///
/// # Example
///
/// ```
/// use chart_ta::ma::{moving_average, sma, MaType};
///
/// let data = vec![1.0_f64, 2.0, 3.0, 4.0];
/// let by_type = moving_average(&data, 2, MaType::Sma).unwrap();
/// assert_eq!(by_type, sma(&data, 2).unwrap());
///
/// let parsed: MaType = "zlema".parse().unwrap();
/// assert_eq!(parsed, MaType::Zlema);
/// ```
pub fn moving_average<T: SeriesElement>(data: &[T], period: usize, ma_type: MaType) -> Result<Vec<T>> {
    match ma_type {
        MaType::Sma => sma(data, period),
        MaType::Ema => ema(data, period),
        MaType::Rma => rma(data, period),
        MaType::Wma => wma(data, period),
        MaType::Hma => hma(data, period),
        MaType::Tma => tma(data, period),
        MaType::Var => var(data, period),
        MaType::Wwma => wwma(data, period),
        MaType::Zlema => zlema(data, period),
        MaType::Lsma => lsma(data, period),
    }
}

/// One moving average per length, all of the same type.
///
/// # Errors
///
/// Fails on the first length the selected average rejects.
pub fn ribbon<T: SeriesElement>(data: &[T], lengths: &[usize], ma_type: MaType) -> Result<Vec<Vec<T>>> {
    lengths
        .iter()
        .map(|&length| moving_average(data, length, ma_type))
        .collect()
}
