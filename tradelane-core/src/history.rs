//! History Ledger: per-market, per-commodity price samples
//!
//! The ledger is usually rebuilt from a saved game, where it arrives as a
//! plain nested map with no notion of default buckets. Every write goes
//! through one private accessor, which checks for the location and
//! commodity buckets and creates them itself, so a reconstructed ledger
//! behaves exactly like a fresh one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One observed price at one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub tick: u64,
    pub price: f64,
}

type Series = BTreeMap<String, Vec<PriceSample>>;

/// Append-only price series keyed by location, then commodity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLedger {
    series: BTreeMap<String, Series>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a plain nested map, e.g. one read back from storage
    pub fn from_plain(series: BTreeMap<String, BTreeMap<String, Vec<PriceSample>>>) -> Self {
        Self { series }
    }

    /// The series for a location/commodity pair, created if absent
    fn series_mut(&mut self, location: &str, commodity: &str) -> &mut Vec<PriceSample> {
        self.series
            .entry(location.to_string())
            .or_default()
            .entry(commodity.to_string())
            .or_default()
    }

    /// Append a sample
    pub fn record(&mut self, location: &str, commodity: &str, tick: u64, price: f64) {
        self.series_mut(location, commodity)
            .push(PriceSample { tick, price });
    }

    /// Append a sample, then drop the oldest samples beyond `max_samples`
    pub fn record_bounded(
        &mut self,
        location: &str,
        commodity: &str,
        tick: u64,
        price: f64,
        max_samples: Option<usize>,
    ) {
        let series = self.series_mut(location, commodity);
        series.push(PriceSample { tick, price });

        if let Some(max) = max_samples {
            if series.len() > max {
                let excess = series.len() - max;
                series.drain(..excess);
            }
        }
    }

    /// Samples for a pair, oldest first; empty if nothing was recorded.
    /// Reads never create buckets.
    pub fn series(&self, location: &str, commodity: &str) -> &[PriceSample] {
        self.series
            .get(location)
            .and_then(|by_commodity| by_commodity.get(commodity))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn latest(&self, location: &str, commodity: &str) -> Option<PriceSample> {
        self.series(location, commodity).last().copied()
    }

    /// Locations with at least one bucket
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Total number of samples across every series
    pub fn sample_count(&self) -> usize {
        self.series
            .values()
            .flat_map(|by_commodity| by_commodity.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_on_plain_ledger() {
        let mut ledger = HistoryLedger::from_plain(BTreeMap::new());

        ledger.record("Vega", "Fuel", 3, 42.0);

        let series = ledger.series("Vega", "Fuel");
        assert_eq!(series, &[PriceSample { tick: 3, price: 42.0 }]);
    }

    #[test]
    fn test_record_into_partially_populated_plain_map() {
        let mut plain = BTreeMap::new();
        plain.insert("Vega".to_string(), BTreeMap::new());
        let mut ledger = HistoryLedger::from_plain(plain);

        ledger.record("Vega", "Fuel", 1, 40.0);
        ledger.record("Vega", "Fuel", 2, 41.0);
        ledger.record("Sol", "Art", 2, 800.0);

        assert_eq!(ledger.series("Vega", "Fuel").len(), 2);
        assert_eq!(ledger.latest("Sol", "Art").unwrap().price, 800.0);
        assert_eq!(ledger.sample_count(), 3);
    }

    #[test]
    fn test_reads_do_not_create_buckets() {
        let ledger = HistoryLedger::new();
        assert!(ledger.series("Nowhere", "Fuel").is_empty());
        assert_eq!(ledger.locations().count(), 0);
    }

    #[test]
    fn test_bounded_record_drops_oldest() {
        let mut ledger = HistoryLedger::new();
        for tick in 0..8 {
            ledger.record_bounded("Vega", "Fuel", tick, tick as f64, Some(5));
        }

        let ticks: Vec<u64> = ledger.series("Vega", "Fuel").iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_roundtrip_through_plain_json() {
        let mut ledger = HistoryLedger::new();
        ledger.record("Vega", "Fuel", 1, 40.5);

        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["Vega"]["Fuel"][0]["price"], 40.5);

        let back: HistoryLedger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }
}
