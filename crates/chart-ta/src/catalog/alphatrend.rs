//! AlphaTrend overlay.

use serde::Deserialize;

use crate::bar::{Bar, BarColumns};
use crate::catalog::{add_buy_sell_markers, Indicator};
use crate::error::Result;
use crate::output::{Color, Fill, IndicatorResult, Metadata};
use crate::trend::alphatrend::alphatrend;

/// AlphaTrend line and its two-bar lag with a per-bar fill between them.
///
/// MFI drives the momentum filter when every bar carries volume and
/// `use_volume` is set; RSI otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlphaTrend {
    period: usize,
    coeff: f64,
    use_volume: bool,
    show_signals: bool,
}

impl Default for AlphaTrend {
    fn default() -> Self {
        Self {
            period: 14,
            coeff: 1.0,
            use_volume: true,
            show_signals: true,
        }
    }
}

impl AlphaTrend {
    /// Creates AlphaTrend(14, 1.0).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ATR and momentum period.
    ///
    /// Default: 14
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the ATR multiplier.
    ///
    /// Default: 1.0
    #[must_use]
    pub const fn coeff(mut self, coeff: f64) -> Self {
        self.coeff = coeff;
        self
    }

    /// Chooses MFI over RSI when volume is available.
    ///
    /// Default: true
    #[must_use]
    pub const fn use_volume(mut self, use_volume: bool) -> Self {
        self.use_volume = use_volume;
        self
    }

    /// Toggles buy/sell markers.
    #[must_use]
    pub const fn show_signals(mut self, show: bool) -> Self {
        self.show_signals = show;
        self
    }
}

impl Indicator for AlphaTrend {
    fn metadata(&self) -> Metadata {
        Metadata::new("AlphaTrend", format!("AT {} {}", self.period, self.coeff), true)
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let times = bars.times();
        let volume = (self.use_volume && bars.has_volume()).then(|| bars.volumes());
        let out = alphatrend(
            &bars.highs(),
            &bars.lows(),
            &bars.closes(),
            volume.as_deref(),
            self.period,
            self.coeff,
        )?;
        tracing::debug!(
            indicator = "alphatrend",
            bars = bars.len(),
            period = self.period,
            momentum = if volume.is_some() { "mfi" } else { "rsi" },
            "calculated"
        );

        let mut result = IndicatorResult::new(self.metadata());
        result.add_plot("alphatrend", &times, &out.line)?;
        result.add_plot("lagged", &times, &out.lagged)?;
        let colors = out
            .line
            .iter()
            .zip(&out.lagged)
            .map(|(&line, &lagged)| {
                if line > lagged {
                    Some(Color::BLUE.with_alpha(0x33))
                } else if line < lagged {
                    Some(Color::RED.with_alpha(0x33))
                } else {
                    None
                }
            })
            .collect();
        result.fills.push(Fill {
            plot1: "alphatrend".into(),
            plot2: "lagged".into(),
            color: Color::GRAY.with_alpha(0x33),
            colors: Some(colors),
        });
        if self.show_signals {
            add_buy_sell_markers(&mut result, &times, &out.buy, &out.sell)?;
        }
        Ok(result)
    }
}
