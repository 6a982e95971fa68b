//! Market profiles: seeding and long-run baselines
//!
//! A location's kind decides what it produces and consumes, its resource
//! rating scales produced stock and its population scales consumer demand.
//! The baseline is a pure function of the descriptor, so the tick engine can
//! pull drifting values back toward it without storing anything extra.

use super::record::CommodityState;
use crate::config::constants::*;
use crate::core::{Commodity, LocationDescriptor};
use rand::Rng;

/// Long-run supply and demand a market drifts back toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    pub supply: u64,
    pub demand: u64,
}

/// Population scale, clamped so tiny outposts and megacities stay sane
pub fn population_factor(population: u64) -> f64 {
    (population as f64 / POPULATION_UNIT).clamp(MIN_POPULATION_FACTOR, MAX_POPULATION_FACTOR)
}

/// Baseline stock for one commodity at one location
pub fn baseline(location: &LocationDescriptor, commodity: &str) -> Baseline {
    let mut supply = BASELINE_STOCK;
    let mut demand = BASELINE_STOCK;

    if location.kind.produces(commodity) {
        supply *= location.resources.factor() * PRODUCER_SUPPLY_FACTOR;
    }
    if location.kind.consumes(commodity) {
        demand *= population_factor(location.population) * CONSUMER_DEMAND_FACTOR;
    }

    Baseline {
        supply: supply.round() as u64,
        demand: demand.round() as u64,
    }
}

/// Opening state for one commodity: jittered baseline plus production and
/// consumption rates for the goods this location specialises in.
/// The price is left for normalization to fill in.
pub fn seed_commodity<R: Rng>(
    location: &LocationDescriptor,
    commodity: &Commodity,
    rng: &mut R,
) -> CommodityState {
    let base = baseline(location, &commodity.id);
    let mut jitter = |value: u64| -> u64 {
        (value as f64 * rng.gen_range(SEED_JITTER_LOW..SEED_JITTER_HIGH)).round() as u64
    };

    let supply = jitter(base.supply);
    let demand = jitter(base.demand);

    let production = if location.kind.produces(&commodity.id) {
        rng.gen_range(PRODUCTION_RANGE.0..=PRODUCTION_RANGE.1)
    } else {
        0
    };
    let consumption = if location.kind.consumes(&commodity.id) {
        rng.gen_range(CONSUMPTION_RANGE.0..=CONSUMPTION_RANGE.1)
    } else {
        0
    };

    CommodityState {
        supply,
        demand,
        price: 0.0,
        production,
        consumption,
        price_shock: 1.0,
    }
}
