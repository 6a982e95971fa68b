//! Benchmark: Turn Processing
//!
//! Purpose: Measure how long a game turn spends in the economy
//!
//! What's Measured:
//! - `tick_global_state` with the default 12 markets per turn
//! - Full-galaxy ticks (every market, every turn)
//! - Trade opportunity scan across the whole store
//! - Buy/sell round trip on one market

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use std::sync::Arc;
use tradelane_core::{
    CommodityCatalog, Economy, EconomyConfig, LocationDescriptor, LocationKind, ResourceRating,
};

/// Helper: a seeded galaxy of `markets` markets
fn create_galaxy(markets: usize) -> Economy {
    let mut economy = Economy::new(
        Arc::new(CommodityCatalog::standard()),
        EconomyConfig::default().with_seed(42),
    );
    for i in 0..markets {
        economy.create_market(&LocationDescriptor::new(
            format!("System {}", i),
            LocationKind::ALL[i % LocationKind::ALL.len()],
            250_000 * (i as u64 % 40 + 1),
            ResourceRating::ALL[i % ResourceRating::ALL.len()],
        ));
    }
    economy
}

/// Benchmark: Sampled turns (the normal game path)
fn bench_sampled_turns(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for markets in [20usize, 100, 500] {
        let mut economy = create_galaxy(markets);
        group.bench_function(format!("sampled_12_of_{}", markets), |b| {
            b.iter(|| black_box(economy.tick_global_state(12)));
        });
    }

    group.finish();
}

/// Benchmark: Every market advanced every turn
fn bench_full_turns(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    let mut economy = create_galaxy(100);
    group.bench_function("full_100", |b| {
        b.iter(|| black_box(economy.tick_global_state(100)));
    });

    group.finish();
}

/// Benchmark: Cross-market scan (quadratic in markets)
fn bench_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner");

    for markets in [20usize, 100] {
        let economy = create_galaxy(markets);
        group.bench_function(format!("opportunities_{}", markets), |b| {
            b.iter(|| black_box(economy.get_trade_opportunities()));
        });
    }

    group.finish();
}

/// Benchmark: Buy then sell the same lot
fn bench_trade_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("trade");

    let mut economy = create_galaxy(20);
    let cargo = HashMap::from([("Fuel".to_string(), 5u64)]);
    group.bench_function("buy_sell_round_trip", |b| {
        b.iter(|| {
            black_box(economy.buy("System 0", "Fuel", 5, f64::MAX).ok());
            black_box(economy.sell("System 0", "Fuel", 5, &cargo).ok());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sampled_turns,
    bench_full_turns,
    bench_scanner,
    bench_trade_round_trip
);
criterion_main!(benches);
