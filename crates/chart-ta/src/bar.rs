//! OHLCV bars and per-bar price sources.
//!
//! Bars arrive from an external data source already ordered by `time` with
//! no gaps or duplicates. Nothing in this crate validates or mutates them;
//! indicators only project them into columns.

use serde::{Deserialize, Serialize};

/// One OHLCV sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar open time, strictly increasing across a sequence.
    pub time: i64,
    /// Opening price.
    pub open: f64,
    /// Highest traded price.
    pub high: f64,
    /// Lowest traded price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume, if the source provides it.
    #[serde(default)]
    pub volume: Option<f64>,
}

impl Bar {
    /// Creates a bar without volume.
    #[must_use]
    pub const fn new(time: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Returns the bar with volume attached.
    #[must_use]
    pub const fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// `(high + low) / 2`
    #[inline]
    #[must_use]
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// `(high + low + close) / 3`
    #[inline]
    #[must_use]
    pub fn hlc3(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// `(open + high + low + close) / 4`
    #[inline]
    #[must_use]
    pub fn ohlc4(&self) -> f64 {
        (self.open + self.high + self.low + self.close) / 4.0
    }

    /// `(high + low + 2 * close) / 4`
    #[inline]
    #[must_use]
    pub fn hlcc4(&self) -> f64 {
        (self.high + self.low + 2.0 * self.close) / 4.0
    }

    /// Projects the bar onto a single price.
    #[inline]
    #[must_use]
    pub fn price(&self, source: PriceSource) -> f64 {
        match source {
            PriceSource::Open => self.open,
            PriceSource::High => self.high,
            PriceSource::Low => self.low,
            PriceSource::Close => self.close,
            PriceSource::Hl2 => self.hl2(),
            PriceSource::Hlc3 => self.hlc3(),
            PriceSource::Ohlc4 => self.ohlc4(),
            PriceSource::Hlcc4 => self.hlcc4(),
        }
    }
}

/// Which per-bar price feeds a transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// High.
    High,
    /// Low.
    Low,
    /// Closing price.
    #[default]
    Close,
    /// Median price.
    Hl2,
    /// Typical price.
    Hlc3,
    /// Average price.
    Ohlc4,
    /// Weighted close.
    Hlcc4,
}

/// Column projections over a bar slice.
///
/// Every projection has one entry per bar so outputs stay index-aligned.
pub trait BarColumns {
    /// Bar times.
    fn times(&self) -> Vec<i64>;
    /// Opening prices.
    fn opens(&self) -> Vec<f64>;
    /// Highs.
    fn highs(&self) -> Vec<f64>;
    /// Lows.
    fn lows(&self) -> Vec<f64>;
    /// Closes.
    fn closes(&self) -> Vec<f64>;
    /// Volumes; NaN where the bar carries none.
    fn volumes(&self) -> Vec<f64>;
    /// True when every bar carries a volume.
    fn has_volume(&self) -> bool;
    /// Per-bar price for the given source.
    fn source(&self, source: PriceSource) -> Vec<f64>;
}

impl BarColumns for [Bar] {
    fn times(&self) -> Vec<i64> {
        self.iter().map(|b| b.time).collect()
    }

    fn opens(&self) -> Vec<f64> {
        self.iter().map(|b| b.open).collect()
    }

    fn highs(&self) -> Vec<f64> {
        self.iter().map(|b| b.high).collect()
    }

    fn lows(&self) -> Vec<f64> {
        self.iter().map(|b| b.low).collect()
    }

    fn closes(&self) -> Vec<f64> {
        self.iter().map(|b| b.close).collect()
    }

    fn volumes(&self) -> Vec<f64> {
        self.iter().map(|b| b.volume.unwrap_or(f64::NAN)).collect()
    }

    fn has_volume(&self) -> bool {
        !self.is_empty() && self.iter().all(|b| b.volume.is_some())
    }

    fn source(&self, source: PriceSource) -> Vec<f64> {
        self.iter().map(|b| b.price(source)).collect()
    }
}
