//! Supertrend and the ATR trailing stop as chart overlays.

use serde::Deserialize;

use crate::bar::{Bar, BarColumns, PriceSource};
use crate::catalog::{add_buy_sell_markers, direction_colors, Indicator};
use crate::error::Result;
use crate::output::{Color, ColorPoint, Fill, IndicatorResult, Metadata};
use crate::trend::supertrend::{atr_trailing_stop, supertrend};
use crate::trend::trailing::Direction;

/// Supertrend overlay: the active ATR band split into an up and a down
/// plot, fills toward the price midline and buy/sell markers on flips.
///
/// # Example
///
/// ```
/// use chart_ta::catalog::{Indicator, Supertrend};
/// use chart_ta::Bar;
///
/// let bars: Vec<Bar> = (0..40)
///     .map(|i| {
///         let c = 100.0 + f64::from(i);
///         Bar::new(i64::from(i), c, c + 1.0, c - 1.0, c)
///     })
///     .collect();
/// let result = Supertrend::new().period(10).multiplier(3.0).calculate(&bars).unwrap();
/// assert!(result.plots["up"][39].value < bars[39].close);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Supertrend {
    period: usize,
    multiplier: f64,
    source: PriceSource,
    show_signals: bool,
    highlight: bool,
    color_bars: bool,
}

impl Default for Supertrend {
    fn default() -> Self {
        Self {
            period: 10,
            multiplier: 3.0,
            source: PriceSource::Hl2,
            show_signals: true,
            highlight: true,
            color_bars: false,
        }
    }
}

impl Supertrend {
    /// Creates a Supertrend with the classic (10, 3.0) on hl2.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ATR period.
    ///
    /// Default: 10
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the ATR multiplier.
    ///
    /// Default: 3.0
    #[must_use]
    pub const fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Sets the price the bands are centred on.
    ///
    /// Default: hl2
    #[must_use]
    pub const fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    /// Toggles buy/sell markers.
    #[must_use]
    pub const fn show_signals(mut self, show: bool) -> Self {
        self.show_signals = show;
        self
    }

    /// Toggles the trend fills.
    #[must_use]
    pub const fn highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Toggles candle coloring by trend.
    #[must_use]
    pub const fn color_bars(mut self, color_bars: bool) -> Self {
        self.color_bars = color_bars;
        self
    }
}

impl Indicator for Supertrend {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Supertrend",
            format!("ST {} {}", self.period, self.multiplier),
            true,
        )
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let times = bars.times();
        let (high, low, close) = (bars.highs(), bars.lows(), bars.closes());
        let src = bars.source(self.source);

        let out = supertrend(&high, &low, &close, &src, self.period, self.multiplier)?;
        let buy = out.flips_to(Direction::Long);
        let sell = out.flips_to(Direction::Short);
        tracing::debug!(
            indicator = "supertrend",
            bars = bars.len(),
            period = self.period,
            multiplier = self.multiplier,
            flips = out.flipped.iter().filter(|&&f| f).count(),
            "calculated"
        );

        let mut result = IndicatorResult::new(self.metadata());
        result.add_plot("up", &times, &out.level_when(Direction::Long))?;
        result.add_plot("down", &times, &out.level_when(Direction::Short))?;
        result.add_plot("mid", &times, &bars.source(PriceSource::Ohlc4))?;

        if self.highlight {
            result.fills.push(Fill {
                plot1: "mid".into(),
                plot2: "up".into(),
                color: Color::GREEN.with_alpha(0x26),
                colors: None,
            });
            result.fills.push(Fill {
                plot1: "mid".into(),
                plot2: "down".into(),
                color: Color::RED.with_alpha(0x26),
                colors: None,
            });
        }
        if self.show_signals {
            add_buy_sell_markers(&mut result, &times, &buy, &sell)?;
        }
        if self.color_bars {
            let colors = direction_colors(&out.direction, &Color::GREEN, &Color::RED);
            result.bar_colors = times
                .iter()
                .zip(colors)
                .filter_map(|(&time, color)| color.map(|color| ColorPoint { time, color }))
                .collect();
        }
        Ok(result)
    }
}

/// ATR trailing stop ("auto trail"): one stop line around close, starting
/// long, colored by side.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AtrTrailingStop {
    period: usize,
    multiplier: f64,
    show_signals: bool,
}

impl Default for AtrTrailingStop {
    fn default() -> Self {
        Self {
            period: 14,
            multiplier: 2.0,
            show_signals: true,
        }
    }
}

impl AtrTrailingStop {
    /// Creates an ATR trailing stop with (14, 2.0).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ATR period.
    ///
    /// Default: 14
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the ATR multiplier.
    ///
    /// Default: 2.0
    #[must_use]
    pub const fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Toggles flip markers.
    #[must_use]
    pub const fn show_signals(mut self, show: bool) -> Self {
        self.show_signals = show;
        self
    }
}

impl Indicator for AtrTrailingStop {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "ATR Trailing Stop",
            format!("ATR Trail {} {}", self.period, self.multiplier),
            true,
        )
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let times = bars.times();
        let out = atr_trailing_stop(
            &bars.highs(),
            &bars.lows(),
            &bars.closes(),
            self.period,
            self.multiplier,
        )?;
        tracing::debug!(
            indicator = "atr_trailing_stop",
            bars = bars.len(),
            period = self.period,
            "calculated"
        );

        let mut result = IndicatorResult::new(self.metadata());
        let colors = direction_colors(&out.direction, &Color::GREEN, &Color::RED);
        result.add_colored_plot("trail", &times, &out.level, &colors)?;
        if self.show_signals {
            add_buy_sell_markers(
                &mut result,
                &times,
                &out.flips_to(Direction::Long),
                &out.flips_to(Direction::Short),
            )?;
        }
        Ok(result)
    }
}
