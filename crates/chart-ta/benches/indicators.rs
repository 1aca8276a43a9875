//! Performance benchmarks for chart-ta.
//!
//! Run with: `cargo bench -p chart-ta`
//!
//! Primitive transforms are measured per input size to confirm linear
//! scaling; catalog indicators are measured end to end over bars.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chart_ta::catalog::{
    AlphaTrend, HalfTrend, HullMa, Indicator, SchaffTrendCycle, Supertrend, ZigZagFib,
};
use chart_ta::ma::{ema, hma, sma};
use chart_ta::oscillators::{rsi, stc};
use chart_ta::trend::supertrend;
use chart_ta::volatility::atr;
use chart_ta::{Bar, BarColumns};

/// Deterministic bars for benchmarks.
fn generate_bars(size: usize) -> Vec<Bar> {
    let mut price = 100.0;
    (0..size)
        .map(|i| {
            let x = i as f64;
            let delta = ((x * 0.1).sin() * 2.0) + ((x * 0.03).cos() * 1.5);
            price = (price + delta).max(10.0);

            let high = price + 1.0 + (x * 0.07).sin().abs();
            let low = price - 1.0 - (x * 0.05).cos().abs();
            let open = price + (x * 0.04).sin() * 0.3;
            let volume = 1_000_000.0 + (x * 1000.0).sin().abs() * 500_000.0;
            Bar::new(i as i64 * 60, open, high, low, price).with_volume(volume)
        })
        .collect()
}

// Standard sizes for benchmarking
const SIZES: &[usize] = &[100, 1_000, 10_000, 100_000];

fn bench_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("sma");
    for &size in SIZES {
        let data = generate_bars(size).closes();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| sma(black_box(data), black_box(20)))
        });
    }
    group.finish();
}

fn bench_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("ema");
    for &size in SIZES {
        let data = generate_bars(size).closes();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| ema(black_box(data), black_box(20)))
        });
    }
    group.finish();
}

fn bench_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("rsi");
    for &size in SIZES {
        let data = generate_bars(size).closes();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| rsi(black_box(data), black_box(14)))
        });
    }
    group.finish();
}

fn bench_hma(c: &mut Criterion) {
    let mut group = c.benchmark_group("hma");
    for &size in SIZES {
        let data = generate_bars(size).closes();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| hma(black_box(data), black_box(55)))
        });
    }
    group.finish();
}

fn bench_stc(c: &mut Criterion) {
    let mut group = c.benchmark_group("stc");
    for &size in SIZES {
        let data = generate_bars(size).closes();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| stc(black_box(data), 23, 50, 10, black_box(0.5)))
        });
    }
    group.finish();
}

fn bench_atr(c: &mut Criterion) {
    let mut group = c.benchmark_group("atr");
    for &size in SIZES {
        let bars = generate_bars(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(bars.highs(), bars.lows(), bars.closes()),
            |b, (h, l, c)| b.iter(|| atr(black_box(h), black_box(l), black_box(c), black_box(14))),
        );
    }
    group.finish();
}

fn bench_supertrend(c: &mut Criterion) {
    let mut group = c.benchmark_group("supertrend");
    for &size in SIZES {
        let bars = generate_bars(size);
        let (high, low, close) = (bars.highs(), bars.lows(), bars.closes());
        let hl2: Vec<f64> = high.iter().zip(&low).map(|(h, l)| (h + l) / 2.0).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(high, low, close, hl2),
            |b, (h, l, c, src)| {
                b.iter(|| supertrend(black_box(h), black_box(l), black_box(c), black_box(src), 10, 3.0))
            },
        );
    }
    group.finish();
}

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");
    let bars = generate_bars(10_000);
    group.throughput(Throughput::Elements(bars.len() as u64));

    let indicators: Vec<(&str, Box<dyn Indicator>)> = vec![
        ("supertrend", Box::new(Supertrend::new())),
        ("halftrend", Box::new(HalfTrend::new())),
        ("alphatrend", Box::new(AlphaTrend::new())),
        ("hull_ma", Box::new(HullMa::new())),
        ("stc", Box::new(SchaffTrendCycle::new())),
        ("zigzag_fib", Box::new(ZigZagFib::new())),
    ];
    for (name, indicator) in &indicators {
        group.bench_with_input(BenchmarkId::new(*name, bars.len()), &bars, |b, bars| {
            b.iter(|| indicator.calculate(black_box(bars)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sma,
    bench_ema,
    bench_rsi,
    bench_hma,
    bench_stc,
    bench_atr,
    bench_supertrend,
    bench_catalog,
);

criterion_main!(benches);
