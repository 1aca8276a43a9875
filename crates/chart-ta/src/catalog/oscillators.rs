//! Bounded oscillator panes: stochastic, stochastic RSI, Schaff Trend Cycle
//! and Money Flow Index.

use serde::Deserialize;

use crate::bar::{Bar, BarColumns, PriceSource};
use crate::catalog::{slope_colors, Indicator};
use crate::error::Result;
use crate::oscillators::{mfi, stc, stoch_rsi, stochastic};
use crate::output::{Color, HLine, IndicatorResult, Metadata};

fn add_bands(result: &mut IndicatorResult, upper: f64, lower: f64) {
    result.hlines.push(HLine::reference(upper, "Upper Band"));
    result.hlines.push(HLine::reference(lower, "Lower Band"));
}

/// Full stochastic %K/%D.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Stochastic {
    period: usize,
    smooth_k: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            period: 14,
            smooth_k: 1,
            d_period: 3,
        }
    }
}

impl Stochastic {
    /// Creates Stochastic(14, 1, 3).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the %K lookback.
    ///
    /// Default: 14
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the %K smoothing.
    ///
    /// Default: 1
    #[must_use]
    pub const fn smooth_k(mut self, smooth_k: usize) -> Self {
        self.smooth_k = smooth_k;
        self
    }

    /// Sets the %D length.
    ///
    /// Default: 3
    #[must_use]
    pub const fn d_period(mut self, d_period: usize) -> Self {
        self.d_period = d_period;
        self
    }
}

impl Indicator for Stochastic {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Stochastic",
            format!("Stoch {} {} {}", self.period, self.smooth_k, self.d_period),
            false,
        )
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let times = bars.times();
        let out = stochastic(
            &bars.highs(),
            &bars.lows(),
            &bars.closes(),
            self.period,
            self.smooth_k,
            self.d_period,
        )?;
        tracing::debug!(indicator = "stochastic", bars = bars.len(), period = self.period, "calculated");

        let mut result = IndicatorResult::new(self.metadata());
        result.add_plot("k", &times, &out.k)?;
        result.add_plot("d", &times, &out.d)?;
        add_bands(&mut result, 80.0, 20.0);
        Ok(result)
    }
}

/// Stochastic of RSI.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct StochasticRsi {
    rsi_period: usize,
    stoch_period: usize,
    smooth_k: usize,
    d_period: usize,
    source: PriceSource,
}

impl Default for StochasticRsi {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            stoch_period: 14,
            smooth_k: 3,
            d_period: 3,
            source: PriceSource::Close,
        }
    }
}

impl StochasticRsi {
    /// Creates StochRSI(14, 14, 3, 3).
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

    /// Sets the stochastic window over RSI.
    ///
    /// Default: 14
    #[must_use]
    pub const fn stoch_period(mut self, period: usize) -> Self {
        self.stoch_period = period;
        self
    }

    /// Sets the %K smoothing.
    ///
    /// Default: 3
    #[must_use]
    pub const fn smooth_k(mut self, smooth_k: usize) -> Self {
        self.smooth_k = smooth_k;
        self
    }

    /// Sets the %D length.
    ///
    /// Default: 3
    #[must_use]
    pub const fn d_period(mut self, d_period: usize) -> Self {
        self.d_period = d_period;
        self
    }

    /// Sets the source price.
    #[must_use]
    pub const fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }
}

impl Indicator for StochasticRsi {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Stochastic RSI",
            format!("Stoch RSI {} {}", self.rsi_period, self.stoch_period),
            false,
        )
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let times = bars.times();
        let out = stoch_rsi(
            &bars.source(self.source),
            self.rsi_period,
            self.stoch_period,
            self.smooth_k,
            self.d_period,
        )?;
        tracing::debug!(
            indicator = "stoch_rsi",
            bars = bars.len(),
            rsi_period = self.rsi_period,
            "calculated"
        );

        let mut result = IndicatorResult::new(self.metadata());
        result.add_plot("k", &times, &out.k)?;
        result.add_plot("d", &times, &out.d)?;
        add_bands(&mut result, 80.0, 20.0);
        Ok(result)
    }
}

/// Schaff Trend Cycle, colored by direction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchaffTrendCycle {
    fast: usize,
    slow: usize,
    cycle: usize,
    factor: f64,
    source: PriceSource,
}

impl Default for SchaffTrendCycle {
    fn default() -> Self {
        Self {
            fast: 23,
            slow: 50,
            cycle: 10,
            factor: 0.5,
            source: PriceSource::Close,
        }
    }
}

impl SchaffTrendCycle {
    /// Creates STC(23, 50, 10, 0.5).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fast EMA length.
    ///
    /// Default: 23
    #[must_use]
    pub const fn fast(mut self, fast: usize) -> Self {
        self.fast = fast;
        self
    }

    /// Sets the slow EMA length.
    ///
    /// Default: 50
    #[must_use]
    pub const fn slow(mut self, slow: usize) -> Self {
        self.slow = slow;
        self
    }

    /// Sets the cycle window.
    ///
    /// Default: 10
    #[must_use]
    pub const fn cycle(mut self, cycle: usize) -> Self {
        self.cycle = cycle;
        self
    }

    /// Sets the smoothing factor.
    ///
    /// Default: 0.5
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

impl Indicator for SchaffTrendCycle {
    fn metadata(&self) -> Metadata {
        Metadata::new(
            "Schaff Trend Cycle",
            format!("STC {} {} {}", self.cycle, self.fast, self.slow),
            false,
        )
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        let values = stc(
            &bars.source(self.source),
            self.fast,
            self.slow,
            self.cycle,
            self.factor,
        )?;
        tracing::debug!(indicator = "stc", bars = bars.len(), cycle = self.cycle, "calculated");

        let mut result = IndicatorResult::new(self.metadata());
        let colors = slope_colors(&values, 1, &Color::GREEN, &Color::RED);
        result.add_colored_plot("stc", &bars.times(), &values, &colors)?;
        add_bands(&mut result, 75.0, 25.0);
        Ok(result)
    }
}

/// Money Flow Index. Bars without volume give an all-NaN plot.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Mfi {
    period: usize,
}

impl Default for Mfi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Mfi {
    /// Creates MFI(14).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the period.
    ///
    /// Default: 14
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }
}

impl Indicator for Mfi {
    fn metadata(&self) -> Metadata {
        Metadata::new("Money Flow Index", format!("MFI {}", self.period), false)
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        if !bars.has_volume() {
            tracing::debug!(indicator = "mfi", bars = bars.len(), "no volume, plot left undefined");
        }
        let values = mfi(
            &bars.highs(),
            &bars.lows(),
            &bars.closes(),
            &bars.volumes(),
            self.period,
        )?;
        tracing::debug!(indicator = "mfi", bars = bars.len(), period = self.period, "calculated");

        let mut result = IndicatorResult::new(self.metadata());
        result.add_plot("mfi", &bars.times(), &values)?;
        add_bands(&mut result, 80.0, 20.0);
        Ok(result)
    }
}
