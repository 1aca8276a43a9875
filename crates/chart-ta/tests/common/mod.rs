//! Shared test utilities for chart-ta integration tests.

use chart_ta::Bar;

/// Approximate equality; two NaN values compare equal.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons involving accumulated floating-point operations.
#[allow(dead_code)]
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Bar time step used by the generators (one minute, in seconds).
#[allow(dead_code)]
pub const STEP: i64 = 60;

/// Builds a bar around `close` with a symmetric `spread` and volume.
#[allow(dead_code)]
pub fn bar_at(index: usize, close: f64, spread: f64) -> Bar {
    let time = i64::try_from(index).unwrap_or(i64::MAX) * STEP;
    Bar::new(time, close, close + spread, close - spread, close).with_volume(1_000.0)
}

/// Price rising linearly for `half` bars, then falling linearly for `half`
/// bars: the peak sits at index `half`.
#[allow(dead_code)]
pub fn peak_closes(half: usize) -> Vec<f64> {
    (0..2 * half)
        .map(|i| {
            let step = if i <= half { i } else { 2 * half - i };
            100.0 + step as f64
        })
        .collect()
}

/// The 250-bar rise-then-fall fixture (turning point at index 125).
#[allow(dead_code)]
pub fn rise_fall_bars() -> Vec<Bar> {
    peak_closes(125)
        .into_iter()
        .enumerate()
        .map(|(i, c)| bar_at(i, c, 1.0))
        .collect()
}

/// Deterministic oscillating series with drift.
#[allow(dead_code)]
pub fn wave_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            100.0 + (x * 0.13).sin() * 8.0 + (x * 0.031).cos() * 4.0 + x * 0.02
        })
        .collect()
}

/// Bars over [`wave_closes`].
#[allow(dead_code)]
pub fn wave_bars(n: usize) -> Vec<Bar> {
    wave_closes(n)
        .into_iter()
        .enumerate()
        .map(|(i, c)| bar_at(i, c, 0.75))
        .collect()
}

/// Mean of the non-NaN values.
#[allow(dead_code)]
pub fn defined_mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rise_fall_shape() {
        let closes = peak_closes(125);
        assert_eq!(closes.len(), 250);
        assert_eq!(closes[125], 225.0);
        assert_eq!(closes[124], 224.0);
        assert_eq!(closes[126], 224.0);
    }
}
