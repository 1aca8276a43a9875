//! AlphaTrend.
//!
//! ```text
//! atr   = SMA(TR, n)
//! up    = low  - coeff × atr
//! down  = high + coeff × atr
//! bull  = MFI(n) ≥ 50 when volume is available, RSI(close, n) ≥ 50 otherwise
//! alpha = bull ? max(up, alpha[i-1]) : min(down, alpha[i-1])
//! ```
//!
//! The line starts on the first bar where both the ATR and the momentum
//! filter are defined, seeded with the active candidate. Buy/sell signals
//! are the line crossing over/under its own two-bar lag, filtered to
//! alternate.

use crate::error::Result;
use crate::ma::sma::sma;
use crate::oscillators::{mfi, rsi};
use crate::series::{crossover, crossunder, Series};
use crate::traits::{validate_hlc, validate_period, SeriesElement};
use crate::trend::trailing::Direction;
use crate::volatility::true_range;

/// Bars back the signal line is taken from.
pub const ALPHATREND_SIGNAL_LAG: usize = 2;

/// Output of [`alphatrend`].
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaTrendOutput<T> {
    /// The AlphaTrend line.
    pub line: Vec<T>,
    /// The line [`ALPHATREND_SIGNAL_LAG`] bars back.
    pub lagged: Vec<T>,
    /// Alternating buy signals.
    pub buy: Vec<bool>,
    /// Alternating sell signals.
    pub sell: Vec<bool>,
}

/// Computes AlphaTrend.
///
/// Pass `volume = None` to use RSI as the momentum filter.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period and
/// `Error::LengthMismatch` if the series differ in length.
///
/// # Example
///
/// ```
/// use chart_ta::trend::alphatrend::alphatrend;
///
/// let close: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i)).collect();
/// let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
/// let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
///
/// let out = alphatrend(&high, &low, &close, None, 14, 1.0).unwrap();
/// assert!(out.line[13].is_nan());
/// // rising market: line trails below the lows
/// assert!(out.line[59] < low[59]);
/// ```
pub fn alphatrend<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    volume: Option<&[T]>,
    period: usize,
    coeff: T,
) -> Result<AlphaTrendOutput<T>> {
    validate_period(period)?;
    validate_hlc(high, low, close)?;

    let n = close.len();
    let atr_values = sma(&true_range(high, low, close)?, period)?;
    let momentum = match volume {
        Some(volume) => mfi(high, low, close, volume, period)?,
        None => rsi(close, period)?,
    };

    let mut line = vec![T::nan(); n];
    let mut prev: Option<T> = None;
    for i in 0..n {
        if atr_values[i].is_nan() || momentum[i].is_nan() {
            continue;
        }
        let up = low[i] - coeff * atr_values[i];
        let down = high[i] + coeff * atr_values[i];
        let bull = momentum[i] >= T::fifty();
        let next = match (prev, bull) {
            (None, true) => up,
            (None, false) => down,
            (Some(p), true) => up.max(p),
            (Some(p), false) => down.min(p),
        };
        line[i] = next;
        prev = Some(next);
    }

    let lagged = Series::from(line.clone()).shift(ALPHATREND_SIGNAL_LAG).into_vec();
    let raw_buy = crossover(&line, &lagged);
    let raw_sell = crossunder(&line, &lagged);

    let mut buy = vec![false; n];
    let mut sell = vec![false; n];
    let mut last: Option<Direction> = None;
    for i in 0..n {
        if raw_buy[i] && last != Some(Direction::Long) {
            buy[i] = true;
            last = Some(Direction::Long);
        } else if raw_sell[i] && last != Some(Direction::Short) {
            sell[i] = true;
            last = Some(Direction::Short);
        }
    }

    Ok(AlphaTrendOutput {
        line,
        lagged,
        buy,
        sell,
    })
}
