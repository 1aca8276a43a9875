//! Window kernels shared by the transforms.
//!
//! - [`rolling_extrema`]: monotonic deque for O(n) highest/lowest and their
//!   bar offsets

pub mod rolling_extrema;

pub use rolling_extrema::{
    highest, highest_bars, highest_into, lowest, lowest_bars, lowest_into, rolling_extrema,
    rolling_extrema_lookback, MonotonicDeque, RollingExtremaOutput,
};
