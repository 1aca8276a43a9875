//! Bounded momentum oscillators (0 to 100).
//!
//! - [`rsi()`]: Relative Strength Index
//! - [`stoch()`], [`stochastic()`], [`stoch_rsi()`]: stochastic family
//! - [`stc()`]: Schaff Trend Cycle
//! - [`mfi()`]: Money Flow Index

pub mod mfi;
pub mod rsi;
pub mod stc;
pub mod stochastic;

pub use mfi::{mfi, mfi_lookback};
pub use rsi::{rsi, rsi_from_averages, rsi_into, rsi_lookback};
pub use stc::{stc, stc_lookback};
pub use stochastic::{stoch, stoch_rsi, stochastic, stochastic_lookback, StochasticOutput};
