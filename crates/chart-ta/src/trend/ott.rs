//! Optimized Trend Tracker (OTT).
//!
//! A percentage trailing stop around a moving average (VAR by default):
//!
//! ```text
//! ma    = MA(src, period)
//! fark  = ma × percent / 100
//! stop  = trailing fold of (ma - fark, ma + fark) triggered by ma, starting long
//! ott   = stop × (200 + percent) / 200   when ma > stop
//!         stop × (200 - percent) / 200   otherwise
//! ```
//!
//! OTT is drawn two bars back; buy/sell signals are the MA crossing over or
//! under that lagged line.

use crate::error::Result;
use crate::ma::{moving_average, MaType};
use crate::series::{crossover, crossunder, Series};
use crate::traits::SeriesElement;
use crate::trend::trailing::{trailing_stop, InitialDirection, TrailingOutput};

/// Bars the OTT line is shifted back for plotting and signals.
pub const OTT_DISPLAY_LAG: usize = 2;

/// Output of [`ott`].
#[derive(Debug, Clone, PartialEq)]
pub struct OttOutput<T> {
    /// The tracked moving average.
    pub ma: Vec<T>,
    /// Raw trailing stop state.
    pub stop: TrailingOutput<T>,
    /// OTT line on its own bar (before the display lag).
    pub ott: Vec<T>,
    /// OTT shifted back by [`OTT_DISPLAY_LAG`].
    pub ott_lagged: Vec<T>,
    /// MA crossed over the lagged OTT.
    pub buy: Vec<bool>,
    /// MA crossed under the lagged OTT.
    pub sell: Vec<bool>,
}

/// Computes OTT over `src` with the given moving average.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` for a zero period, plus any error the
/// selected moving average raises.
///
/// # Example
///
/// ```
/// use chart_ta::ma::MaType;
/// use chart_ta::trend::ott::ott;
///
/// let data: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i)).collect();
/// let out = ott(&data, 2, 1.4, MaType::Var).unwrap();
/// // uptrend: MA above the stop, OTT lifted by percent/2
/// let stop = out.stop.level[59];
/// assert!((out.ott[59] - stop * 201.4 / 200.0).abs() < 1e-9);
/// assert!(out.ott_lagged[1].is_nan());
/// ```
pub fn ott<T: SeriesElement>(src: &[T], period: usize, percent: T, ma_type: MaType) -> Result<OttOutput<T>> {
    let ma = moving_average(src, period, ma_type)?;

    let fraction = percent / T::hundred();
    let (long, short): (Vec<T>, Vec<T>) = ma
        .iter()
        .map(|&m| (m - m * fraction, m + m * fraction))
        .unzip();
    let stop = trailing_stop(&long, &short, &ma, InitialDirection::Long)?;

    let two_hundred = T::hundred() + T::hundred();
    let raise = (two_hundred + percent) / two_hundred;
    let lower = (two_hundred - percent) / two_hundred;
    let ott: Vec<T> = stop
        .level
        .iter()
        .zip(&ma)
        .map(|(&level, &m)| if m > level { level * raise } else { level * lower })
        .collect();

    let ott_lagged = Series::from(ott.clone()).shift(OTT_DISPLAY_LAG).into_vec();
    let buy = crossover(&ma, &ott_lagged);
    let sell = crossunder(&ma, &ott_lagged);

    Ok(OttOutput {
        ma,
        stop,
        ott,
        ott_lagged,
        buy,
        sell,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ott_lowered_below_ma_when_short() {
        let data: Vec<f64> = (0..60).map(|i| 200.0 - f64::from(i)).collect();
        let out = ott(&data, 2, 2.0, MaType::Ema).unwrap();
        let level = out.stop.level[59];
        assert!(out.ma[59] < level);
        assert!((out.ott[59] - level * 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_ott_signals_on_reversal() {
        let data: Vec<f64> = (0..120)
            .map(|i| if i < 60 { 100.0 + f64::from(i) } else { 220.0 - f64::from(i) })
            .collect();
        let out = ott(&data, 2, 1.4, MaType::Ema).unwrap();
        let sells: Vec<usize> = (0..120).filter(|&i| out.sell[i]).collect();
        assert!(!sells.is_empty());
        assert!(sells.iter().all(|&i| i >= 60));
    }

    #[test]
    fn test_ott_lag_alignment() {
        let data: Vec<f64> = (0..20).map(f64::from).collect();
        let out = ott(&data, 3, 1.0, MaType::Sma).unwrap();
        for i in OTT_DISPLAY_LAG..20 {
            let (a, b) = (out.ott_lagged[i], out.ott[i - OTT_DISPLAY_LAG]);
            assert!((a.is_nan() && b.is_nan()) || a == b);
        }
    }
}
