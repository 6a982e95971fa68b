//! Market Record Store: one record per location name

use super::profile;
use super::record::MarketRecord;
use crate::config::PricingConfig;
use crate::core::{CommodityCatalog, LocationDescriptor};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Owner of every market record, keyed by location name.
///
/// Ordered by name so iteration (and therefore seeded sampling) is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketStore {
    markets: BTreeMap<String, MarketRecord>,
}

impl MarketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a market for a location seen for the first time.
    ///
    /// Creating a market that already exists returns the existing record
    /// untouched; supply and demand are never reseeded.
    pub fn create<R: Rng>(
        &mut self,
        location: &LocationDescriptor,
        catalog: &CommodityCatalog,
        pricing_cfg: &PricingConfig,
        rng: &mut R,
    ) -> &MarketRecord {
        if self.markets.contains_key(&location.name) {
            debug!("Market for {} already exists, keeping current state", location.name);
        } else {
            let mut record = MarketRecord::new(location.clone());
            for commodity in catalog.iter() {
                record.goods.insert(
                    commodity.id.clone(),
                    profile::seed_commodity(location, commodity, rng),
                );
            }
            record.normalize(catalog, pricing_cfg);

            info!(
                "Opened market at {} ({}, pop {}, {:?} resources)",
                location.name, location.kind, location.population, location.resources
            );
            self.markets.insert(location.name.clone(), record);
        }

        &self.markets[&location.name]
    }

    pub fn get(&self, name: &str) -> Option<&MarketRecord> {
        self.markets.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut MarketRecord> {
        self.markets.get_mut(name)
    }

    /// Place a reconstructed record, replacing any record of the same name
    pub(crate) fn insert_restored(&mut self, record: MarketRecord) {
        self.markets.insert(record.name().to_string(), record);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.markets.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.markets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarketRecord> {
        self.markets.values()
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LocationKind, ResourceRating};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_create_seeds_full_record() {
        let catalog = CommodityCatalog::standard();
        let mut store = MarketStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        let vega = LocationDescriptor::new(
            "Vega",
            LocationKind::Industrial,
            4_000_000,
            ResourceRating::Rich,
        );

        let record = store.create(&vega, &catalog, &PricingConfig::default(), &mut rng);

        assert_eq!(record.goods.len(), catalog.len());
        assert!(record.get("Phasemetal").unwrap().production > 0);
        for state in record.goods.values() {
            assert!(state.price > 0.0);
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_twice_keeps_existing_state() {
        let catalog = CommodityCatalog::standard();
        let cfg = PricingConfig::default();
        let mut store = MarketStore::new();
        let mut rng = StdRng::seed_from_u64(2);
        let outpost = LocationDescriptor::new(
            "Outpost 9",
            LocationKind::Frontier,
            150_000,
            ResourceRating::Poor,
        );

        let first = store.create(&outpost, &catalog, &cfg, &mut rng).clone();
        let second = store.create(&outpost, &catalog, &cfg, &mut rng).clone();

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }
}
