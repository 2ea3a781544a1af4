//! Benchmarks for schedule generation.

use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use miqat_core::{compute_qibla_bearing, daily, monthly, CalculationMethod, GeoCoordinate, ScheduleContext};

fn context(method: CalculationMethod) -> ScheduleContext {
    ScheduleContext::new()
        .location(GeoCoordinate::new_unchecked(-6.2088, 106.8456))
        .method(method)
        .fixed_timezone(7.0)
}

fn bench_daily(c: &mut Criterion) {
    let ctx = context(CalculationMethod::Kemenag);
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    c.bench_function("daily", |b| b.iter(|| black_box(daily(black_box(date), &ctx))));
}

fn bench_monthly(c: &mut Criterion) {
    let mut group = c.benchmark_group("monthly");
    for method in [CalculationMethod::Kemenag, CalculationMethod::UmmAlQura] {
        let ctx = context(method);
        group.bench_with_input(BenchmarkId::new("method", method.id()), &ctx, |b, ctx| {
            b.iter(|| black_box(monthly(black_box(2024), black_box(3), ctx)))
        });
    }
    group.finish();
}

fn bench_qibla(c: &mut Criterion) {
    c.bench_function("qibla", |b| {
        b.iter(|| black_box(compute_qibla_bearing(black_box(-6.2088), black_box(106.8456))))
    });
}

criterion_group!(benches, bench_daily, bench_monthly, bench_qibla);
criterion_main!(benches);
