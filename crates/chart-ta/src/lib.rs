//! chart-ta: technical analysis indicators for charting
//!
//! Every indicator in this crate is a pure function of an ordered bar
//! sequence and a few validated parameters. The crate is layered:
//!
//! - **Primitives**: rolling extrema, SMA/EMA/RMA/WMA, standard deviation,
//!   true range and ATR, linear regression, correlation.
//! - **Oscillators**: RSI, stochastic, stochastic RSI, Schaff Trend Cycle,
//!   MFI.
//! - **Smoothers**: Hull, T3, MavilimW, VAR, WWMA, ZLEMA, TMA, LSMA behind a
//!   closed [`ma::MaType`].
//! - **Trend state machines**: a generic ratcheting trailing stop plus
//!   Supertrend, OTT, QQE, HalfTrend and AlphaTrend.
//! - **Pivots**: pivot highs/lows, zig-zag threading, Fibonacci levels.
//! - **Catalog**: end-to-end [`catalog::Indicator`]s producing a renderable
//!   [`output::IndicatorResult`].
//!
//! # Quick Start
//!
//! ```
//! use chart_ta::prelude::*;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//!
//! // the first 2 values are still warming up
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10);
//! ```
//!
//! # Warmup and errors
//!
//! Insufficient history is not an error. Every transform returns one value
//! per input bar and marks the bars it cannot compute yet with NaN:
//!
//! ```
//! use chart_ta::prelude::*;
//!
//! let short_data = vec![1.0_f64, 2.0];
//! let result = sma(&short_data, 10).unwrap();
//! assert!(result.iter().all(|v| v.is_nan()));
//!
//! // a zero window is
//! assert!(sma(&short_data, 0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod bar;
pub mod catalog;
pub mod error;
pub mod kernels;
pub mod ma;
pub mod oscillators;
pub mod output;
pub mod pivots;
pub mod prelude;
pub mod series;
pub mod stats;
pub mod traits;
pub mod trend;
pub mod utils;
pub mod volatility;

// Re-export commonly used types at crate root
pub use bar::{Bar, BarColumns, PriceSource};
pub use error::{Error, Result};
pub use series::Series;
pub use traits::SeriesElement;
pub use utils::{approx_eq, count_nan_prefix, count_nans, EPSILON, LOOSE_EPSILON};
