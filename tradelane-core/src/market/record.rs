//! Market Record: per-location simulation state
//!
//! A record holds one [`CommodityState`] per catalog commodity, so supply,
//! demand, price, production, consumption and shock can never be partially
//! present. [`MarketRecord::normalize`] restores that shape and the value
//! invariants after anything outside the engine has touched the record.

use super::lenient;
use crate::config::PricingConfig;
use crate::core::{CommodityCatalog, LocationDescriptor};
use crate::pricing;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Simulation state of one commodity at one market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommodityState {
    /// Units on offer
    #[serde(deserialize_with = "lenient::count")]
    pub supply: u64,

    /// Units wanted
    #[serde(deserialize_with = "lenient::count")]
    pub demand: u64,

    /// Cached output of the pricing engine
    #[serde(deserialize_with = "lenient::price")]
    pub price: f64,

    /// Units added to supply per tick
    #[serde(deserialize_with = "lenient::count")]
    pub production: u64,

    /// Units of standing demand satisfied per tick
    #[serde(deserialize_with = "lenient::count")]
    pub consumption: u64,

    /// Transient multiplier on price, decays toward 1.0
    #[serde(deserialize_with = "lenient::shock")]
    pub price_shock: f64,
}

impl Default for CommodityState {
    fn default() -> Self {
        Self {
            supply: 0,
            demand: 0,
            price: 0.0,
            production: 0,
            consumption: 0,
            price_shock: 1.0,
        }
    }
}

impl CommodityState {
    /// Recompute the cached price from supply, demand and shock
    pub fn reprice(&mut self, pricing_cfg: &PricingConfig, base_price: f64) {
        self.price = pricing::price_with(
            pricing_cfg,
            base_price,
            self.supply,
            self.demand,
            self.price_shock,
        );
    }
}

/// Everything the engine tracks about one location's market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub location: LocationDescriptor,

    /// Per-commodity state, total over the catalog after normalization
    #[serde(default)]
    pub goods: BTreeMap<String, CommodityState>,

    /// Ticks this market has been advanced
    #[serde(default, deserialize_with = "lenient::count")]
    pub last_updated: u64,
}

impl MarketRecord {
    /// Empty record for a location; callers seed and normalize it
    pub fn new(location: LocationDescriptor) -> Self {
        Self {
            location,
            goods: BTreeMap::new(),
            last_updated: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.location.name
    }

    pub fn get(&self, commodity: &str) -> Option<&CommodityState> {
        self.goods.get(commodity)
    }

    pub(crate) fn get_mut(&mut self, commodity: &str) -> Option<&mut CommodityState> {
        self.goods.get_mut(commodity)
    }

    pub fn supply(&self, commodity: &str) -> u64 {
        self.get(commodity).map(|s| s.supply).unwrap_or(0)
    }

    pub fn demand(&self, commodity: &str) -> u64 {
        self.get(commodity).map(|s| s.demand).unwrap_or(0)
    }

    pub fn price(&self, commodity: &str) -> Option<f64> {
        self.get(commodity).map(|s| s.price)
    }

    pub fn price_shock(&self, commodity: &str) -> f64 {
        self.get(commodity).map(|s| s.price_shock).unwrap_or(1.0)
    }

    /// Bring the record back to a valid shape.
    ///
    /// - commodities missing from the record are added with zero stock and a
    ///   neutral shock
    /// - commodities the catalog does not know are dropped
    /// - shocks are forced into `[min_shock, max_shock]`
    /// - every price is recomputed
    ///
    /// Returns the number of repairs made (a recomputed price that did not
    /// change is not a repair). A record that is already valid is left
    /// exactly as it was.
    pub fn normalize(&mut self, catalog: &CommodityCatalog, pricing_cfg: &PricingConfig) -> usize {
        let mut repairs = 0;

        let before = self.goods.len();
        self.goods.retain(|id, _| catalog.contains(id));
        repairs += before - self.goods.len();

        for commodity in catalog.iter() {
            let state = self.goods.entry(commodity.id.clone()).or_insert_with(|| {
                repairs += 1;
                CommodityState::default()
            });

            let shock = if state.price_shock.is_finite() {
                state
                    .price_shock
                    .clamp(pricing_cfg.min_shock, pricing_cfg.max_shock)
            } else {
                1.0
            };
            if shock != state.price_shock {
                state.price_shock = shock;
                repairs += 1;
            }

            let old_price = state.price;
            state.reprice(pricing_cfg, commodity.base_price);
            if (old_price - state.price).abs() > 1e-9 {
                repairs += 1;
            }
        }

        repairs
    }
}
