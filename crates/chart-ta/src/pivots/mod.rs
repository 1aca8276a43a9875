//! Pivot detection and zig-zag threading.

pub mod pivot;
pub mod zigzag;

pub use pivot::{find_pivots, pivot_high, pivot_low, Pivot, PivotKind};
pub use zigzag::{FibLevel, ZigZag, ZigZagUpdate, FIB_RATIOS};
