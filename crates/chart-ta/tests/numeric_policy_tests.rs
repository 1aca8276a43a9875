//! Numeric policy tests.
//!
//! Warmup, NaN propagation, degenerate-window fallbacks and error handling
//! shared by every transform.

#![allow(clippy::float_cmp)]

mod common;

use chart_ta::kernels::{highest, highest_bars, lowest_bars};
use chart_ta::ma::{ema, rma, sma, sma_into, wma};
use chart_ta::oscillators::{rsi, stoch, stoch_rsi};
use chart_ta::stats::{correlation, stdev};
use chart_ta::volatility::{atr, true_range};
use chart_ta::Error;

use common::{approx_eq, EPSILON};

// ==================== NaN propagation ====================

#[test]
fn test_nan_in_window_propagates() {
    let data = vec![1.0_f64, 2.0, f64::NAN, 4.0, 5.0, 6.0, 7.0];
    let result = sma(&data, 3).unwrap();

    assert!(result[2].is_nan());
    assert!(result[3].is_nan());
    assert!(result[4].is_nan());
    assert!(approx_eq(result[5], 5.0, EPSILON));
    assert!(approx_eq(result[6], 6.0, EPSILON));
}

#[test]
fn test_ema_seeds_and_reseeds() {
    // alpha = 0.5
    let data = vec![f64::NAN, 2.0, 4.0, f64::NAN, 10.0, 12.0];
    let result = ema(&data, 3).unwrap();

    assert!(result[0].is_nan());
    assert_eq!(result[1], 2.0);
    assert!(approx_eq(result[2], 3.0, EPSILON));
    assert!(result[3].is_nan());
    assert_eq!(result[4], 10.0);
    assert!(approx_eq(result[5], 11.0, EPSILON));
}

#[test]
fn test_rma_waits_for_full_window_after_nan() {
    let data = vec![1.0_f64, 2.0, 3.0, f64::NAN, 4.0, 5.0, 6.0];
    let result = rma(&data, 3).unwrap();

    assert!(approx_eq(result[2], 2.0, EPSILON));
    assert!(result[3].is_nan());
    assert!(result[5].is_nan());
    assert!(approx_eq(result[6], 5.0, EPSILON));
}

// ==================== Exactness ====================

#[test]
fn test_constant_input_is_exact_at_common_periods() {
    let data = vec![5.0_f64; 80];
    for period in [9, 14, 20] {
        let s = sma(&data, period).unwrap();
        let e = ema(&data, period).unwrap();
        assert!(s[period - 1..].iter().all(|&v| v == 5.0), "sma {period}");
        assert!(e.iter().all(|&v| v == 5.0), "ema {period}");
    }
}

#[test]
fn test_saturated_stochastic_rsi_stays_in_range() {
    let close: Vec<f64> = (0..300)
        .map(|i| 100.0 + 6.0 * (f64::from(i) * 0.25).sin())
        .collect();
    let out = stoch_rsi(&close, 14, 14, 3, 3).unwrap();

    for v in out.k.iter().chain(&out.d).filter(|v| !v.is_nan()) {
        assert!((0.0..=100.0).contains(v), "{v}");
    }
    // runs of pinned raw values average back to the bound exactly
    assert!(out.k.iter().any(|&v| v == 100.0));
    assert!(out.k.iter().any(|&v| v == 0.0));
}

// ==================== Degenerate windows ====================

#[test]
fn test_rsi_fallbacks() {
    let flat = vec![10.0_f64; 20];
    let rising: Vec<f64> = (0..20).map(f64::from).collect();
    let falling: Vec<f64> = (0..20).map(|i| 100.0 - f64::from(i)).collect();

    assert_eq!(rsi(&flat, 14).unwrap()[19], 50.0);
    assert_eq!(rsi(&rising, 14).unwrap()[19], 100.0);
    assert_eq!(rsi(&falling, 14).unwrap()[19], 0.0);
}

#[test]
fn test_stoch_zero_range_is_midpoint() {
    let flat = vec![7.0_f64; 6];
    let result = stoch(&flat, &flat, &flat, 3).unwrap();
    assert!(result[1].is_nan());
    assert!(result[2..].iter().all(|&v| v == 50.0));
}

#[test]
fn test_correlation_zero_variance_is_undefined() {
    let a = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
    let flat = vec![3.0_f64; 5];
    let doubled: Vec<f64> = a.iter().map(|v| v * 2.0).collect();

    assert!(correlation(&a, &flat, 3).unwrap().iter().all(|v| v.is_nan()));

    let r = correlation(&a, &doubled, 3).unwrap();
    assert!(r[1].is_nan());
    assert!(approx_eq(r[4], 1.0, EPSILON));
}

#[test]
fn test_stdev_of_constant_is_zero() {
    let result = stdev(&[4.0_f64; 6], 4).unwrap();
    assert!(result[2].is_nan());
    assert_eq!(result[5], 0.0);
}

#[test]
fn test_extrema_bars_prefer_most_recent_tie() {
    let data = vec![3.0_f64, 3.0, 1.0];
    assert_eq!(highest_bars(&data, 3).unwrap()[2], Some(1));

    let data = vec![1.0_f64, 2.0, 1.0];
    assert_eq!(lowest_bars(&data, 3).unwrap()[2], Some(0));
    assert_eq!(lowest_bars(&data, 3).unwrap()[1], None);
}

// ==================== Warmup ====================

#[test]
fn test_short_input_is_all_undefined() {
    let short = vec![1.0_f64, 2.0, 3.0];

    for result in [
        sma(&short, 10).unwrap(),
        wma(&short, 10).unwrap(),
        rma(&short, 10).unwrap(),
        stdev(&short, 10).unwrap(),
        highest(&short, 10).unwrap(),
        rsi(&short, 10).unwrap(),
        atr(&short, &short, &short, 10).unwrap(),
    ] {
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }
}

#[test]
fn test_empty_input_is_empty_output() {
    let empty: Vec<f64> = Vec::new();
    assert!(sma(&empty, 3).unwrap().is_empty());
    assert!(ema(&empty, 3).unwrap().is_empty());
    assert!(true_range(&empty, &empty, &empty).unwrap().is_empty());
}

#[test]
fn test_f32_input() {
    let data = vec![1.0_f32, 2.0, 3.0, 4.0];
    let result = sma(&data, 2).unwrap();
    assert!(result[0].is_nan());
    assert!((result[3] - 3.5).abs() < 1e-6);
}

// ==================== Errors ====================

#[test]
fn test_zero_period_is_rejected() {
    let data = vec![1.0_f64, 2.0, 3.0];

    let results = [
        sma(&data, 0),
        ema(&data, 0),
        rma(&data, 0),
        wma(&data, 0),
        stdev(&data, 0),
        highest(&data, 0),
        rsi(&data, 0),
        atr(&data, &data, &data, 0),
    ];
    for result in results {
        assert!(matches!(result, Err(Error::InvalidPeriod { period: 0, .. })));
    }
}

#[test]
fn test_length_mismatch_is_rejected() {
    let high = vec![2.0_f64, 3.0, 4.0];
    let low = vec![1.0_f64, 2.0];
    let close = vec![1.5_f64, 2.5, 3.5];

    let err = true_range(&high, &low, &close).unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { .. }));
}

#[test]
fn test_into_reports_defined_count_and_checks_buffer() {
    let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];

    let mut output = vec![0.0_f64; 5];
    assert_eq!(sma_into(&data, 3, &mut output).unwrap(), 3);
    assert!(output[1].is_nan());

    let mut short = vec![0.0_f64; 4];
    let err = sma_into(&data, 3, &mut short).unwrap_err();
    assert_eq!(
        err,
        Error::BufferTooSmall {
            indicator: "sma",
            required: 5,
            actual: 4,
        }
    );
}
