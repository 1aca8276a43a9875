//! HalfTrend overlay.

use serde::Deserialize;

use crate::bar::{Bar, BarColumns};
use crate::catalog::{add_buy_sell_markers, direction_colors, Indicator};
use crate::error::Result;
use crate::output::{Color, Fill, IndicatorResult, Metadata};
use crate::trend::halftrend::halftrend;

/// HalfTrend line colored by trend, its ATR channel and turn markers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HalfTrend {
    amplitude: usize,
    channel_deviation: f64,
    atr_period: usize,
    show_channels: bool,
    show_signals: bool,
}

impl Default for HalfTrend {
    fn default() -> Self {
        Self {
            amplitude: 2,
            channel_deviation: 2.0,
            atr_period: 100,
            show_channels: true,
            show_signals: true,
        }
    }
}

impl HalfTrend {
    /// Creates HalfTrend with amplitude 2 and a 2.0 × ATR(100)/2 channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the amplitude window.
    ///
    /// Default: 2
    #[must_use]
    pub const fn amplitude(mut self, amplitude: usize) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Sets the channel deviation.
    ///
    /// Default: 2.0
    #[must_use]
    pub const fn channel_deviation(mut self, deviation: f64) -> Self {
        self.channel_deviation = deviation;
        self
    }

    /// Sets the ATR period behind the channel.
    ///
    /// Default: 100
    #[must_use]
    pub const fn atr_period(mut self, period: usize) -> Self {
        self.atr_period = period;
        self
    }

    /// Toggles the ATR channel plots.
    #[must_use]
    pub const fn show_channels(mut self, show: bool) -> Self {
        self.show_channels = show;
        self
    }

    /// Toggles turn markers.
    #[must_use]
    pub const fn show_signals(mut self, show: bool) -> Self {
        self.show_signals = show;
        self
    }
}

impl Indicator for HalfTrend {
    fn metadata(&self) -> Metadata {
        Metadata::new("HalfTrend", format!("HT {}", self.amplitude), true)
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let times = bars.times();
        let out = halftrend(
            &bars.highs(),
            &bars.lows(),
            &bars.closes(),
            self.amplitude,
            self.channel_deviation,
            self.atr_period,
        )?;
        tracing::debug!(
            indicator = "halftrend",
            bars = bars.len(),
            amplitude = self.amplitude,
            turns = out.buy.iter().chain(&out.sell).filter(|&&s| s).count(),
            "calculated"
        );

        let mut result = IndicatorResult::new(self.metadata());
        let colors = direction_colors(&out.trend, &Color::BLUE, &Color::RED);
        result.add_colored_plot("halftrend", &times, &out.line, &colors)?;
        if self.show_channels {
            result.add_plot("atr_high", &times, &out.atr_high)?;
            result.add_plot("atr_low", &times, &out.atr_low)?;
            result.fills.push(Fill {
                plot1: "halftrend".into(),
                plot2: "atr_high".into(),
                color: Color::RED.with_alpha(0x1a),
                colors: None,
            });
            result.fills.push(Fill {
                plot1: "halftrend".into(),
                plot2: "atr_low".into(),
                color: Color::BLUE.with_alpha(0x1a),
                colors: None,
            });
        }
        if self.show_signals {
            add_buy_sell_markers(&mut result, &times, &out.buy, &out.sell)?;
        }
        Ok(result)
    }
}
