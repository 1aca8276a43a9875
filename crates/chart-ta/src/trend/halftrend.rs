//! HalfTrend.
//!
//! A two-flag trend machine over the `amplitude`-bar channel:
//!
//! - while waiting for a down turn (`next_trend` = down) the highest recent
//!   low is tracked; the trend turns down once SMA(high) drops below it and
//!   close breaks the previous low;
//! - while waiting for an up turn the lowest recent high is tracked; the
//!   trend turns up once SMA(low) rises above it and close breaks the
//!   previous high.
//!
//! The plotted line ratchets (`up` only rises, `down` only falls) and on a
//! trend change starts from the opposite line's last value. The ATR channel
//! is `line ± deviation × ATR/2`.

use crate::error::Result;
use crate::kernels::rolling_extrema::{highest_bars, lowest_bars};
use crate::ma::sma::sma;
use crate::traits::{validate_hlc, validate_period, SeriesElement};
use crate::trend::trailing::Direction;
use crate::volatility::atr;

/// Output of [`halftrend`].
#[derive(Debug, Clone, PartialEq)]
pub struct HalfTrendOutput<T> {
    /// The HalfTrend line.
    pub line: Vec<T>,
    /// Trend per bar; `None` during warmup.
    pub trend: Vec<Option<Direction>>,
    /// Upper ATR channel.
    pub atr_high: Vec<T>,
    /// Lower ATR channel.
    pub atr_low: Vec<T>,
    /// Trend turned up on this bar.
    pub buy: Vec<bool>,
    /// Trend turned down on this bar.
    pub sell: Vec<bool>,
}

/// Mutable per-bar state of the HalfTrend fold.
#[derive(Debug, Clone, Copy)]
struct HalfTrendState<T> {
    trend: Direction,
    /// The turn the machine is watching for.
    next_trend: Direction,
    max_low: T,
    min_high: T,
    up: Option<T>,
    down: Option<T>,
}

/// Computes HalfTrend.
///
/// `atr_period` is the ATR length behind the channel (100 in the classic
/// script).
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `amplitude` or `atr_period` is zero and
/// `Error::LengthMismatch` if the series differ in length.
///
/// # Example
///
/// ```
/// use chart_ta::trend::halftrend::halftrend;
/// use chart_ta::trend::trailing::Direction;
///
/// let close: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i)).collect();
/// let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
/// let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
///
/// let out = halftrend(&high, &low, &close, 2, 2.0, 10).unwrap();
/// assert_eq!(out.trend[59], Some(Direction::Long));
/// assert!(out.line[59] < close[59]);
/// ```
pub fn halftrend<T: SeriesElement>(
    high: &[T],
    low: &[T],
    close: &[T],
    amplitude: usize,
    deviation: T,
    atr_period: usize,
) -> Result<HalfTrendOutput<T>> {
    validate_period(amplitude)?;
    validate_hlc(high, low, close)?;

    let n = close.len();
    let atr_values = atr(high, low, close, atr_period)?;
    let high_offsets = highest_bars(high, amplitude)?;
    let low_offsets = lowest_bars(low, amplitude)?;
    let high_ma = sma(high, amplitude)?;
    let low_ma = sma(low, amplitude)?;

    let mut out = HalfTrendOutput {
        line: vec![T::nan(); n],
        trend: vec![None; n],
        atr_high: vec![T::nan(); n],
        atr_low: vec![T::nan(); n],
        buy: vec![false; n],
        sell: vec![false; n],
    };
    let mut state: Option<HalfTrendState<T>> = None;

    for i in 0..n {
        let (Some(hb), Some(lb)) = (high_offsets[i], low_offsets[i]) else {
            continue;
        };
        if high_ma[i].is_nan() || low_ma[i].is_nan() || close[i].is_nan() {
            continue;
        }
        let high_price = high[i - hb];
        let low_price = low[i - lb];
        let prev_low = if i > 0 { low[i - 1] } else { low[i] };
        let prev_high = if i > 0 { high[i - 1] } else { high[i] };

        let st = state.get_or_insert(HalfTrendState {
            trend: Direction::Long,
            next_trend: Direction::Long,
            max_low: prev_low,
            min_high: prev_high,
            up: None,
            down: None,
        });
        let prev_trend = if i > 0 { out.trend[i - 1] } else { None };

        match st.next_trend {
            Direction::Short => {
                st.max_low = st.max_low.max(low_price);
                if high_ma[i] < st.max_low && close[i] < prev_low {
                    st.trend = Direction::Short;
                    st.next_trend = Direction::Long;
                    st.min_high = high_price;
                }
            }
            Direction::Long => {
                st.min_high = st.min_high.min(high_price);
                if low_ma[i] > st.min_high && close[i] > prev_high {
                    st.trend = Direction::Long;
                    st.next_trend = Direction::Short;
                    st.max_low = low_price;
                }
            }
        }

        let half_atr = atr_values[i] / T::two();
        let turned = prev_trend.is_some_and(|prev| prev != st.trend);
        let line = match st.trend {
            Direction::Long => {
                let up = if turned {
                    out.buy[i] = true;
                    st.down.unwrap_or(st.max_low)
                } else {
                    st.up.map_or(st.max_low, |up| up.max(st.max_low))
                };
                st.up = Some(up);
                up
            }
            Direction::Short => {
                let down = if turned {
                    out.sell[i] = true;
                    st.up.unwrap_or(st.min_high)
                } else {
                    st.down.map_or(st.min_high, |down| down.min(st.min_high))
                };
                st.down = Some(down);
                down
            }
        };
        if turned {
            tracing::trace!(bar = i, trend = ?st.trend, "halftrend turned");
        }

        let dev = deviation * half_atr;
        out.line[i] = line;
        out.trend[i] = Some(st.trend);
        out.atr_high[i] = line + dev;
        out.atr_low[i] = line - dev;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag_prices(n: usize, leg: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let close: Vec<f64> = (0..n)
            .map(|i| {
                let phase = i % (2 * leg);
                let offset = if phase < leg { phase } else { 2 * leg - phase };
                100.0 + offset as f64 * 2.0
            })
            .collect();
        let high = close.iter().map(|c| c + 1.0).collect();
        let low = close.iter().map(|c| c - 1.0).collect();
        (high, low, close)
    }

    #[test]
    fn test_halftrend_turns_with_swings() {
        let (high, low, close) = zigzag_prices(120, 15);
        let out = halftrend(&high, &low, &close, 3, 2.0, 10).unwrap();
        let sells = out.sell.iter().filter(|&&s| s).count();
        let buys = out.buy.iter().filter(|&&b| b).count();
        assert!(sells >= 3, "sells {sells}");
        assert!(buys >= 3, "buys {buys}");
        // signals alternate
        let mut last = None;
        for i in 0..120 {
            if out.buy[i] {
                assert_ne!(last, Some(Direction::Long));
                last = Some(Direction::Long);
            }
            if out.sell[i] {
                assert_ne!(last, Some(Direction::Short));
                last = Some(Direction::Short);
            }
        }
    }

    #[test]
    fn test_halftrend_line_ratchets_within_trend() {
        let (high, low, close) = zigzag_prices(90, 12);
        let out = halftrend(&high, &low, &close, 2, 2.0, 5).unwrap();
        for i in 1..90 {
            if out.buy[i] || out.sell[i] || out.trend[i - 1].is_none() {
                continue;
            }
            match out.trend[i] {
                Some(Direction::Long) => assert!(out.line[i] >= out.line[i - 1]),
                Some(Direction::Short) => assert!(out.line[i] <= out.line[i - 1]),
                None => {}
            }
        }
    }

    #[test]
    fn test_halftrend_warmup_and_channel() {
        let (high, low, close) = zigzag_prices(40, 10);
        let out = halftrend(&high, &low, &close, 3, 2.0, 10).unwrap();
        assert!(out.line[1].is_nan());
        assert_eq!(out.trend[1], None);
        assert!(!out.line[2].is_nan());
        // channel waits for the ATR
        assert!(out.atr_high[8].is_nan());
        assert!((out.atr_high[20] - out.line[20] - (out.line[20] - out.atr_low[20])).abs() < 1e-9);
    }
}
