//! Benchmarks for the valuation pipeline.
//!
//! Run with: cargo bench -p bondfolio-analytics

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bondfolio_analytics::{analyze_bond, analyze_many};
use bondfolio_analytics::yields::{IrrSolver, YieldPerspective};
use bondfolio_bonds::{generate_cash_flow, BondTerms};
use bondfolio_core::types::GraceType;

fn create_test_bond(id: u32, periods: u32) -> BondTerms {
    let coupons = [0.05, 0.06, 0.07, 0.08, 0.09, 0.10];
    let frequencies = [1, 2, 4, 12];

    BondTerms::builder()
        .nominal_value(1000.0)
        .coupon_rate(coupons[id as usize % coupons.len()])
        .maturity_periods(periods)
        .frequency(frequencies[id as usize % frequencies.len()])
        .market_rate(0.07)
        .grace(id % 3, GraceType::Partial)
        .build()
        .expect("valid bench bond")
}

fn bench_analyze_bond(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_bond");

    for periods in [4u32, 40, 360] {
        let terms = create_test_bond(1, periods);
        group.throughput(Throughput::Elements(u64::from(periods)));
        group.bench_with_input(BenchmarkId::from_parameter(periods), &terms, |b, terms| {
            b.iter(|| analyze_bond(black_box(terms)))
        });
    }

    group.finish();
}

fn bench_irr(c: &mut Criterion) {
    let terms = create_test_bond(2, 120);
    let schedule = generate_cash_flow(&terms).expect("schedule");
    let solver = IrrSolver::default();

    c.bench_function("irr_120_periods", |b| {
        b.iter(|| {
            solver.solve(
                black_box(&schedule),
                black_box(950.0),
                terms.frequency,
                YieldPerspective::Investor,
            )
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let bonds: Vec<BondTerms> = (0..1000).map(|i| create_test_bond(i, 20 + i % 100)).collect();

    let mut group = c.benchmark_group("analyze_many");
    group.throughput(Throughput::Elements(bonds.len() as u64));
    group.bench_function("1000_bonds", |b| b.iter(|| analyze_many(black_box(&bonds))));
    group.finish();
}

criterion_group!(benches, bench_analyze_bond, bench_irr, bench_batch);
criterion_main!(benches);
