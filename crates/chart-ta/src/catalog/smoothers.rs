//! Moving-average overlays: Hull, T3, MavilimW and multi-length ribbons.

use serde::Deserialize;

use crate::bar::{Bar, BarColumns, PriceSource};
use crate::catalog::{slope_colors, Indicator};
use crate::error::Result;
use crate::ma::{hma, mavilim, ribbon, t3, MaType, DEFAULT_VOLUME_FACTOR};
use crate::output::{Color, IndicatorResult, Metadata};

/// Default ribbon ladder.
pub const RIBBON_LENGTHS: [usize; 8] = [20, 25, 30, 35, 40, 45, 50, 55];

/// Ribbon palette, fastest line first; longer ladders wrap around.
pub const RIBBON_COLORS: [Color; 8] = [
    Color::from_static("#00e676"),
    Color::from_static("#00c853"),
    Color::from_static("#64dd17"),
    Color::from_static("#aeea00"),
    Color::from_static("#ffd600"),
    Color::from_static("#ffab00"),
    Color::from_static("#ff6d00"),
    Color::from_static("#dd2c00"),
];

/// Hull moving average colored by its two-bar slope.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HullMa {
    period: usize,
    source: PriceSource,
}

impl Default for HullMa {
    fn default() -> Self {
        Self {
            period: 55,
            source: PriceSource::Close,
        }
    }
}

impl HullMa {
    /// Creates a 55-bar Hull average on close.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the length (at least 2).
    ///
    /// Default: 55
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the source price.
    #[must_use]
    pub const fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Indicator for HullMa {
    fn metadata(&self) -> Metadata {
        Metadata::new("Hull Moving Average", format!("HMA {}", self.period), true)
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let values = hma(&bars.source(self.source), self.period)?;
        tracing::debug!(indicator = "hull_ma", bars = bars.len(), period = self.period, "calculated");

        let mut result = IndicatorResult::new(self.metadata());
        let colors = slope_colors(&values, 2, &Color::GREEN, &Color::RED);
        result.add_colored_plot("hma", &bars.times(), &values, &colors)?;
        Ok(result)
    }
}

/// Tillson T3 colored by its one-bar slope.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TillsonT3 {
    period: usize,
    volume_factor: f64,
    source: PriceSource,
}

impl Default for TillsonT3 {
    fn default() -> Self {
        Self {
            period: 8,
            volume_factor: DEFAULT_VOLUME_FACTOR,
            source: PriceSource::Close,
        }
    }
}

impl TillsonT3 {
    /// Creates T3(8, 0.7).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the EMA length of every stage.
    ///
    /// Default: 8
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the volume factor `b`.
    ///
    /// Default: 0.7
    #[must_use]
    pub const fn volume_factor(mut self, volume_factor: f64) -> Self {
        self.volume_factor = volume_factor;
        self
    }

    /// Sets the source price.
    #[must_use]
    pub const fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Indicator for TillsonT3 {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Tillson T3",
            format!("T3 {} {}", self.period, self.volume_factor),
            true,
        )
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let values = t3(&bars.source(self.source), self.period, self.volume_factor)?;
        tracing::debug!(indicator = "t3", bars = bars.len(), period = self.period, "calculated");

        let mut result = IndicatorResult::new(self.metadata());
        let colors = slope_colors(&values, 1, &Color::TEAL, &Color::RED);
        result.add_colored_plot("t3", &bars.times(), &values, &colors)?;
        Ok(result)
    }
}

/// MavilimW cascade colored by its one-bar slope.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MavilimW {
    first: usize,
    second: usize,
    source: PriceSource,
}

impl Default for MavilimW {
    fn default() -> Self {
        Self {
            first: 3,
            second: 5,
            source: PriceSource::Close,
        }
    }
}

impl MavilimW {
    /// Creates MavilimW(3, 5).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first stage length.
    ///
    /// Default: 3
    #[must_use]
    pub const fn first(mut self, first: usize) -> Self {
        self.first = first;
        self
    }

    /// Sets the second stage length.
    ///
    /// Default: 5
    #[must_use]
    pub const fn second(mut self, second: usize) -> Self {
        self.second = second;
        self
    }

    /// Sets the source price.
    #[must_use]
    pub const fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Indicator for MavilimW {
    fn metadata(&self) -> Metadata {
        Metadata::new("MavilimW", format!("MAVW {} {}", self.first, self.second), true)
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let values = mavilim(&bars.source(self.source), self.first, self.second)?;
        tracing::debug!(indicator = "mavilimw", bars = bars.len(), "calculated");

        let mut result = IndicatorResult::new(self.metadata());
        let colors = slope_colors(&values, 1, &Color::BLUE, &Color::RED);
        result.add_colored_plot("mavw", &bars.times(), &values, &colors)?;
        Ok(result)
    }
}

/// A ladder of same-type moving averages, one plot per length.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MaRibbon {
    ma_type: MaType,
    lengths: Vec<usize>,
    source: PriceSource,
}

impl Default for MaRibbon {
    fn default() -> Self {
        Self {
            ma_type: MaType::Ema,
            lengths: RIBBON_LENGTHS.to_vec(),
            source: PriceSource::Close,
        }
    }
}

impl MaRibbon {
    /// Creates an EMA ribbon over [`RIBBON_LENGTHS`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the average used for every line.
    ///
    /// Default: EMA
    #[must_use]
    pub const fn ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
        self
    }

    /// Sets the lengths, fastest first.
    #[must_use]
    pub fn lengths(mut self, lengths: Vec<usize>) -> Self {
        self.lengths = lengths;
        self
    }

    /// Sets the source price.
    #[must_use]
    pub const fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Indicator for MaRibbon {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Moving Average Ribbon",
            format!("{} Ribbon", self.ma_type.name().to_uppercase()),
            true,
        )
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let times = bars.times();
        let lines = ribbon(&bars.source(self.source), &self.lengths, self.ma_type)?;
        tracing::debug!(
            indicator = "ma_ribbon",
            bars = bars.len(),
            ma_type = %self.ma_type,
            lines = lines.len(),
            "calculated"
        );

        let mut result = IndicatorResult::new(self.metadata());
        for (i, (length, values)) in self.lengths.iter().zip(&lines).enumerate() {
            let color = RIBBON_COLORS[i % RIBBON_COLORS.len()].clone();
            let colors = vec![Some(color); values.len()];
            result.add_colored_plot(format!("{}_{length}", self.ma_type), &times, values, &colors)?;
        }
        Ok(result)
    }
}
