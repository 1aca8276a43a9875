//! Optimized Trend Tracker overlay.

use serde::Deserialize;

use crate::bar::{Bar, BarColumns, PriceSource};
use crate::catalog::{add_buy_sell_markers, Indicator};
use crate::error::Result;
use crate::ma::MaType;
use crate::output::{Color, Fill, IndicatorResult, Metadata};
use crate::trend::ott::ott;

/// OTT: the support moving average and the OTT line drawn two bars back,
/// with buy/sell markers when the average crosses that line.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Ott {
    period: usize,
    percent: f64,
    ma_type: MaType,
    source: PriceSource,
    show_signals: bool,
    highlight: bool,
}

impl Default for Ott {
    fn default() -> Self {
        Self {
            period: 2,
            percent: 1.4,
            ma_type: MaType::Var,
            source: PriceSource::Close,
            show_signals: true,
            highlight: false,
        }
    }
}

impl Ott {
    /// Creates OTT(2, 1.4) on a VAR average.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the moving average period.
    ///
    /// Default: 2
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the band width in percent.
    ///
    /// Default: 1.4
    #[must_use]
    pub const fn percent(mut self, percent: f64) -> Self {
        self.percent = percent;
        self
    }

    /// Sets the tracked moving average.
    ///
    /// Default: VAR
    #[must_use]
    pub const fn ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
        self
    }

    /// Sets the source price.
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

    /// Toggles the fill between the average and OTT.
    #[must_use]
    pub const fn highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }
}

impl Indicator for Ott {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Optimized Trend Tracker",
            format!("OTT {} {}", self.period, self.percent),
            true,
        )
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let times = bars.times();
        let src = bars.source(self.source);
        let out = ott(&src, self.period, self.percent, self.ma_type)?;
        tracing::debug!(
            indicator = "ott",
            bars = bars.len(),
            period = self.period,
            ma_type = %self.ma_type,
            "calculated"
        );

        let mut result = IndicatorResult::new(self.metadata());
        result.add_plot("support", &times, &out.ma)?;
        result.add_plot("ott", &times, &out.ott_lagged)?;
        if self.highlight {
            let colors = out
                .ma
                .iter()
                .zip(&out.ott_lagged)
                .map(|(&ma, &line)| {
                    if ma > line {
                        Some(Color::GREEN.with_alpha(0x26))
                    } else if ma < line {
                        Some(Color::RED.with_alpha(0x26))
                    } else {
                        None
                    }
                })
                .collect();
            result.fills.push(Fill {
                plot1: "support".into(),
                plot2: "ott".into(),
                color: Color::GRAY.with_alpha(0x26),
                colors: Some(colors),
            });
        }
        if self.show_signals {
            add_buy_sell_markers(&mut result, &times, &out.buy, &out.sell)?;
        }
        Ok(result)
    }
}
