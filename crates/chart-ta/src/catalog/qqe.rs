//! QQE pane indicator.

use serde::Deserialize;

use crate::bar::{Bar, BarColumns, PriceSource};
use crate::catalog::{direction_colors, Indicator};
use crate::error::Result;
use crate::output::{Color, HLine, IndicatorResult, Metadata};
use crate::trend::qqe::qqe;

/// QQE: smoothed RSI with its trailing band, around a 50 midline.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Qqe {
    rsi_period: usize,
    smoothing: usize,
    factor: f64,
    source: PriceSource,
}

impl Default for Qqe {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            smoothing: 5,
            factor: 4.236,
            source: PriceSource::Close,
        }
    }
}

impl Qqe {
    /// Creates QQE(14, 5, 4.236).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the RSI period.
    ///
    /// Default: 14
    #[must_use]
    pub const fn rsi_period(mut self, period: usize) -> Self {
        self.rsi_period = period;
        self
    }

    /// Sets the EMA smoothing applied to RSI.
    ///
    /// Default: 5
    #[must_use]
    pub const fn smoothing(mut self, smoothing: usize) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Sets the band factor.
    ///
    /// Default: 4.236
    #[must_use]
    pub const fn factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Sets the source price.
    #[must_use]
    pub const fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Indicator for Qqe {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Qualitative Quantitative Estimation",
            format!("QQE {} {} {}", self.rsi_period, self.smoothing, self.factor),
            false,
        )
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let times = bars.times();
        let out = qqe(&bars.source(self.source), self.rsi_period, self.smoothing, self.factor)?;
        tracing::debug!(
            indicator = "qqe",
            bars = bars.len(),
            rsi_period = self.rsi_period,
            "calculated"
        );

        let mut result = IndicatorResult::new(self.metadata());
        let colors = direction_colors(&out.stop.direction, &Color::TEAL, &Color::RED);
        result.add_colored_plot("rsi_ma", &times, &out.rsi_ma, &colors)?;
        result.add_plot("trail", &times, &out.stop.level)?;
        result.hlines.push(HLine::reference(50.0, "Midline"));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qqe_pane_layout() {
        let bars: Vec<Bar> = (0..100)
            .map(|i| {
                let c = 50.0 + (f64::from(i) * 0.15).sin() * 8.0;
                Bar::new(i64::from(i), c, c + 0.5, c - 0.5, c)
            })
            .collect();
        let result = Qqe::new().rsi_period(10).calculate(&bars).unwrap();
        assert!(!result.metadata.overlay);
        assert_eq!(result.hlines[0].price, 50.0);
        let rsi_ma = &result.plots["rsi_ma"];
        assert!(rsi_ma[9].value.is_nan());
        assert!(rsi_ma[50].value >= 0.0 && rsi_ma[50].value <= 100.0);
        assert!(rsi_ma[50].color.is_some());
    }
}
