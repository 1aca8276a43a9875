//! Commonly used types and traits for convenient importing.
//!
//! # Usage
//!
//! ```
//! use chart_ta::prelude::*;
//!
//! let prices = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//!
//! let sma_result = sma(&prices, 3).unwrap();
//! let ema_result = ema(&prices, 3).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//! assert_eq!(rsi_result[9], 100.0);
//! ```
//!
//! # Contents
//!
//! ## Error Handling
//! - [`Error`], [`Result`]
//!
//! ## Data
//! - [`Bar`], [`BarColumns`], [`PriceSource`], [`Series`]
//!
//! ## Transforms
//! Primitives, oscillators, moving averages and trend state machines, with
//! their `_into` and `*_lookback()` companions.
//!
//! ## Catalog
//! - [`Indicator`], [`AnyIndicator`] and the output model

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::SeriesElement;

// Data
pub use crate::bar::{Bar, BarColumns, PriceSource};
pub use crate::series::{cross, crossover, crossunder, Series};

// Primitives
pub use crate::kernels::{highest, highest_bars, lowest, lowest_bars, rolling_extrema};
pub use crate::stats::{change, correlation, linreg, linreg_slope, rolling_sum, stdev};
pub use crate::volatility::{atr, true_range};

// Moving averages
pub use crate::ma::{
    ema, hma, lsma, mavilim, moving_average, ribbon, rma, sma, t3, tma, var, wma, wwma, zlema,
    MaType,
};

// _into API for pre-allocated buffers
pub use crate::kernels::{highest_into, lowest_into};
pub use crate::ma::{ema_into, rma_into, sma_into, wma_into};
pub use crate::oscillators::rsi_into;
pub use crate::stats::{rolling_sum_into, stdev_into};
pub use crate::volatility::{atr_into, true_range_into};

// Oscillators
pub use crate::oscillators::{mfi, rsi, stc, stoch, stoch_rsi, stochastic, StochasticOutput};

// Trend state machines
pub use crate::trend::{
    alphatrend, halftrend, ott, qqe, supertrend, trailing_stop, Direction, InitialDirection,
    TrailingOutput,
};

// Pivots
pub use crate::pivots::{find_pivots, pivot_high, pivot_low, Pivot, PivotKind, ZigZag};

// Lookback functions
pub use crate::kernels::rolling_extrema_lookback;
pub use crate::ma::{ema_lookback, hma_lookback, mavilim_lookback, rma_lookback, sma_lookback, wma_lookback};
pub use crate::oscillators::{mfi_lookback, rsi_lookback, stc_lookback, stochastic_lookback};
pub use crate::stats::stats_lookback;
pub use crate::volatility::atr_lookback;

// Catalog
pub use crate::catalog::{AnyIndicator, Indicator};
pub use crate::output::{Color, IndicatorResult, Metadata};
