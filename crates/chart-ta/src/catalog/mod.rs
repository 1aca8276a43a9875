//! End-to-end chart indicators.
//!
//! Each indicator is a small input struct with `Default`, `new()` and
//! chained `const fn` setters. It implements [`Indicator`], turning a bar
//! slice into an [`IndicatorResult`]. Input structs deserialize with every
//! field optional, so an already-validated configuration object (for
//! example JSON) maps straight onto them:
//!
//! ```
//! use chart_ta::catalog::{AnyIndicator, Indicator};
//! use chart_ta::Bar;
//!
//! let config: AnyIndicator =
//!     serde_json::from_str(r#"{ "type": "supertrend", "period": 7 }"#).unwrap();
//! let bars: Vec<Bar> = (0..50)
//!     .map(|i| {
//!         let c = 100.0 + f64::from(i);
//!         Bar::new(i64::from(i), c, c + 1.0, c - 1.0, c)
//!     })
//!     .collect();
//!
//! let result = config.calculate(&bars).unwrap();
//! assert!(result.metadata.overlay);
//! assert_eq!(result.plots["up"].len(), bars.len());
//! ```
//!
//! Every plot carries one point per input bar; a too-short input gives
//! all-NaN plots rather than an error.

pub mod alphatrend;
pub mod halftrend;
pub mod oscillators;
pub mod ott;
pub mod qqe;
pub mod smoothers;
pub mod supertrend;
pub mod zigzag_fib;

use serde::Deserialize;

use crate::bar::Bar;
use crate::error::Result;
use crate::output::{Color, IndicatorResult, MarkerPosition, MarkerShape, Metadata};
use crate::trend::trailing::Direction;

pub use alphatrend::AlphaTrend;
pub use halftrend::HalfTrend;
pub use oscillators::{Mfi, SchaffTrendCycle, Stochastic, StochasticRsi};
pub use ott::Ott;
pub use qqe::Qqe;
pub use smoothers::{HullMa, MaRibbon, MavilimW, TillsonT3};
pub use supertrend::{AtrTrailingStop, Supertrend};
pub use zigzag_fib::ZigZagFib;

/// A chart indicator.
pub trait Indicator {
    /// Titles and pane placement.
    fn metadata(&self) -> Metadata;

    /// Computes the indicator over `bars`.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured parameters make the formula
    /// meaningless (zero period, Hull length below 2, ...). Short inputs are
    /// not an error.
    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult>;
}

/// Any catalog indicator, selected by a `type` tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnyIndicator {
    /// [`Supertrend`]
    Supertrend(Supertrend),
    /// [`AtrTrailingStop`]
    AtrTrailingStop(AtrTrailingStop),
    /// [`Ott`]
    Ott(Ott),
    /// [`Qqe`]
    Qqe(Qqe),
    /// [`HalfTrend`]
    HalfTrend(HalfTrend),
    /// [`AlphaTrend`]
    AlphaTrend(AlphaTrend),
    /// [`ZigZagFib`]
    ZigZagFib(ZigZagFib),
    /// [`MaRibbon`]
    MaRibbon(MaRibbon),
    /// [`HullMa`]
    HullMa(HullMa),
    /// [`TillsonT3`]
    TillsonT3(TillsonT3),
    /// [`MavilimW`]
    MavilimW(MavilimW),
    /// [`Stochastic`]
    Stochastic(Stochastic),
    /// [`StochasticRsi`]
    StochasticRsi(StochasticRsi),
    /// [`SchaffTrendCycle`]
    SchaffTrendCycle(SchaffTrendCycle),
    /// [`Mfi`]
    Mfi(Mfi),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            Self::Supertrend($inner) => $body,
            Self::AtrTrailingStop($inner) => $body,
            Self::Ott($inner) => $body,
            Self::Qqe($inner) => $body,
            Self::HalfTrend($inner) => $body,
            Self::AlphaTrend($inner) => $body,
            Self::ZigZagFib($inner) => $body,
            Self::MaRibbon($inner) => $body,
            Self::HullMa($inner) => $body,
            Self::TillsonT3($inner) => $body,
            Self::MavilimW($inner) => $body,
            Self::Stochastic($inner) => $body,
            Self::StochasticRsi($inner) => $body,
            Self::SchaffTrendCycle($inner) => $body,
            Self::Mfi($inner) => $body,
        }
    };
}

impl Indicator for AnyIndicator {
    fn metadata(&self) -> Metadata {
        dispatch!(self, inner => inner.metadata())
    }

    fn calculate(&self, bars: &[Bar]) -> Result<IndicatorResult> {
        dispatch!(self, inner => inner.calculate(bars))
    }
}

/// Per-bar color by direction; `None` where the direction is unknown.
pub(crate) fn direction_colors(
    direction: &[Option<Direction>],
    long: &Color,
    short: &Color,
) -> Vec<Option<Color>> {
    direction
        .iter()
        .map(|dir| match dir {
            Some(Direction::Long) => Some(long.clone()),
            Some(Direction::Short) => Some(short.clone()),
            None => None,
        })
        .collect()
}

/// Per-bar color by the sign of `values[i] - values[i - lag]`.
pub(crate) fn slope_colors(values: &[f64], lag: usize, rising: &Color, falling: &Color) -> Vec<Option<Color>> {
    (0..values.len())
        .map(|i| {
            let prev = i.checked_sub(lag).map_or(f64::NAN, |j| values[j]);
            if values[i] > prev {
                Some(rising.clone())
            } else if values[i] < prev {
                Some(falling.clone())
            } else {
                None
            }
        })
        .collect()
}

/// Buy/sell arrow markers in the catalog's standard style.
pub(crate) fn add_buy_sell_markers(
    result: &mut IndicatorResult,
    times: &[i64],
    buy: &[bool],
    sell: &[bool],
) -> Result<()> {
    result.add_signal_markers(
        times,
        buy,
        MarkerPosition::BelowBar,
        MarkerShape::LabelUp,
        &Color::GREEN,
        Some("Buy"),
    )?;
    result.add_signal_markers(
        times,
        sell,
        MarkerPosition::AboveBar,
        MarkerShape::LabelDown,
        &Color::RED,
        Some("Sell"),
    )?;
    result.markers.sort_by_key(|m| m.time);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_colors() {
        let colors = slope_colors(&[1.0, 2.0, 2.0, 1.0, f64::NAN], 1, &Color::GREEN, &Color::RED);
        assert_eq!(colors[0], None);
        assert_eq!(colors[1], Some(Color::GREEN));
        assert_eq!(colors[2], None);
        assert_eq!(colors[3], Some(Color::RED));
        assert_eq!(colors[4], None);
    }

    #[test]
    fn test_any_indicator_tags() {
        let parsed: AnyIndicator = serde_json::from_str(r#"{"type": "hull_ma", "period": 16}"#).unwrap();
        assert_eq!(parsed, AnyIndicator::HullMa(HullMa::new().period(16)));
        assert!(serde_json::from_str::<AnyIndicator>(r#"{"type": "nope"}"#).is_err());
    }

    #[test]
    fn test_direction_colors() {
        let colors = direction_colors(
            &[None, Some(Direction::Long), Some(Direction::Short)],
            &Color::GREEN,
            &Color::RED,
        );
        assert_eq!(colors, vec![None, Some(Color::GREEN), Some(Color::RED)]);
    }
}
