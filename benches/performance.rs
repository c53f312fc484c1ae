//! Performance benchmarks for stock-patterns
//!
//! Run with: `cargo bench`
//! View results: `open target/criterion/report/index.html`

use std::collections::BTreeMap;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use stock_patterns::{aggregate_to_weekly, indicators, scan_for_weeks_tight, DailyQuote, Symbol};

/// Two years of synthetic daily quotes with mild oscillation
fn sample_quotes(days: u64) -> Vec<DailyQuote> {
    let symbol = Symbol::new("BENCH");
    let start = NaiveDate::from_ymd_opt(2012, 8, 6).unwrap();

    (0..days)
        .map(|i| {
            let weeks = i / 5;
            let weekday = i % 5;
            let date = start + chrono::Duration::days((weeks * 7 + weekday) as i64);
            let close = 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.01;
            DailyQuote::new_unchecked(
                symbol.clone(),
                date,
                Some(close - 0.5),
                Some(close + 1.2),
                Some(close - 1.3),
                close,
                Some(close * 0.98),
                1_000_000 + i * 500,
            )
        })
        .collect()
}

fn benchmark_indicators(c: &mut Criterion) {
    let quotes = sample_quotes(504);
    let comparison: BTreeMap<NaiveDate, DailyQuote> =
        sample_quotes(504).into_iter().map(|q| (q.date, q)).collect();

    c.bench_function("sma_50", |b| {
        b.iter(|| indicators::sma(black_box(&quotes), 50).unwrap())
    });
    c.bench_function("ema_21", |b| {
        b.iter(|| indicators::ema(black_box(&quotes), 21).unwrap())
    });
    c.bench_function("average_true_range_14", |b| {
        b.iter(|| indicators::average_true_range(black_box(&quotes), 14).unwrap())
    });
    c.bench_function("up_down_volume_ratio_50", |b| {
        b.iter(|| indicators::up_down_volume_ratio(black_box(&quotes), 50).unwrap())
    });
    c.bench_function("beta_504_days", |b| {
        b.iter(|| indicators::beta(black_box(&quotes), black_box(&comparison)).unwrap())
    });
    c.bench_function("relative_strength_1y", |b| {
        b.iter(|| {
            indicators::relative_strength_percent_of_peak(
                black_box(&quotes),
                black_box(&comparison),
                1,
            )
            .unwrap()
        })
    });
    c.bench_function("price_range_504_days", |b| {
        b.iter(|| indicators::price_range(black_box(&quotes)))
    });
}

fn benchmark_pattern_scan(c: &mut Criterion) {
    let quotes = sample_quotes(504);
    let weekly = aggregate_to_weekly(&quotes);

    c.bench_function("aggregate_to_weekly_504_days", |b| {
        b.iter(|| aggregate_to_weekly(black_box(&quotes)))
    });
    c.bench_function("scan_for_weeks_tight_104_weeks", |b| {
        b.iter(|| scan_for_weeks_tight(black_box(&weekly), 4))
    });
}

criterion_group!(benches, benchmark_indicators, benchmark_pattern_scan);
criterion_main!(benches);
