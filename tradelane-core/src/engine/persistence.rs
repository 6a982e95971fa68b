//! Snapshot and lenient restore
//!
//! The saved form is a plain nested key-value tree:
//!
//! ```text
//! {
//!   "turn": 42,
//!   "markets": { "<location>": { "location": {..}, "goods": { "<commodity>": {..} }, "last_updated": 7 } },
//!   "history": { "<location>": { "<commodity>": [ { "tick": 41, "price": 12.5 }, .. ] } },
//!   "recent_events": [ .. ]
//! }
//! ```
//!
//! Restore accepts more than it writes. Older saves keep per-field columns
//! (`supply`, `demand`, `prices`, ...) on each market and a flat
//! `market_history` keyed `"<location>_<commodity>"` holding bare prices.
//! Anything unreadable is skipped with a warning rather than failing the
//! load, and every surviving record is normalized over the catalog.

use super::macro_events::MacroEvent;
use super::Economy;
use crate::config::EconomyConfig;
use crate::core::{CommodityCatalog, EconomyError, LocationDescriptor, LocationKind};
use crate::history::HistoryLedger;
use crate::market::lenient::{Count, Price, Shock};
use crate::market::{CommodityState, MarketRecord, MarketStore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything needed to resume a game's economy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyState {
    pub turn: u64,
    pub markets: MarketStore,
    pub history: HistoryLedger,
    pub recent_events: Vec<MacroEvent>,
}

impl Economy {
    pub fn snapshot(&self) -> EconomyState {
        EconomyState {
            turn: self.turn,
            markets: self.markets.clone(),
            history: self.history.clone(),
            recent_events: self.recent_events.iter().cloned().collect(),
        }
    }

    /// Snapshot as a plain JSON tree
    pub fn to_value(&self) -> Result<Value, EconomyError> {
        Ok(serde_json::to_value(self.snapshot())?)
    }

    /// Rebuild an engine from a saved tree.
    ///
    /// Only a top level that is not an object is an error; everything
    /// below it is read on a best-effort basis.
    pub fn restore(
        catalog: Arc<CommodityCatalog>,
        config: EconomyConfig,
        state: Value,
    ) -> Result<Self, EconomyError> {
        let Value::Object(mut root) = state else {
            return Err(EconomyError::MalformedState(format!(
                "expected an object at the top level, got {}",
                kind_of(&state)
            )));
        };

        let turn = root
            .remove("turn")
            .and_then(|v| serde_json::from_value::<Count>(v).ok())
            .map(|c| c.0)
            .unwrap_or(0);

        let markets = match root.remove("markets") {
            Some(value) => read_markets(value, &catalog, &config),
            None => MarketStore::new(),
        };

        let history_value = root
            .remove("history")
            .or_else(|| root.remove("market_history"));
        let history = match history_value {
            Some(value) => read_history(value, &catalog, config.history.max_samples),
            None => HistoryLedger::new(),
        };

        let recent_events = match root.remove("recent_events") {
            Some(value) => read_events(value, config.events.recent_capacity),
            None => VecDeque::new(),
        };

        info!(
            "Restored economy at turn {}: {} markets, {} price samples",
            turn,
            markets.len(),
            history.sample_count()
        );

        Ok(Economy::from_parts(
            catalog,
            config,
            markets,
            history,
            recent_events,
            turn,
        ))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn read_markets(value: Value, catalog: &CommodityCatalog, config: &EconomyConfig) -> MarketStore {
    let mut store = MarketStore::new();
    let Value::Object(entries) = value else {
        warn!("Ignoring saved markets: expected an object, got {}", kind_of(&value));
        return store;
    };

    for (name, entry) in entries {
        let mut record = match read_record(&name, entry) {
            Ok(record) => record,
            Err(reason) => {
                warn!("Skipping unreadable market {}: {}", name, reason);
                continue;
            }
        };

        // The map key is what every other subsystem refers to
        record.location.name = name;
        let repairs = record.normalize(catalog, &config.pricing);
        if repairs > 0 {
            warn!("Repaired {} values in saved market {}", repairs, record.name());
        }
        store.insert_restored(record);
    }

    store
}

fn read_record(name: &str, entry: Value) -> Result<MarketRecord, String> {
    let is_columnar = entry.get("goods").is_none() && entry.get("supply").is_some();
    if is_columnar {
        debug!("Reading {} from the per-field column layout", name);
        let columns: ColumnarRecord = serde_json::from_value(entry).map_err(|e| e.to_string())?;
        Ok(columns.into_record(name))
    } else {
        serde_json::from_value(entry).map_err(|e| e.to_string())
    }
}

/// Older per-field market layout: one map per field, keyed by commodity
#[derive(Deserialize)]
struct ColumnarRecord {
    #[serde(alias = "type")]
    system_type: LocationKind,
    #[serde(default)]
    population: Count,
    #[serde(default)]
    resources: Value,
    #[serde(default)]
    supply: BTreeMap<String, Count>,
    #[serde(default)]
    demand: BTreeMap<String, Count>,
    #[serde(default, alias = "price")]
    prices: BTreeMap<String, Price>,
    #[serde(default)]
    production: BTreeMap<String, Count>,
    #[serde(default)]
    consumption: BTreeMap<String, Count>,
    #[serde(default)]
    price_shock: BTreeMap<String, Shock>,
    #[serde(default)]
    last_updated: Count,
}

impl ColumnarRecord {
    fn into_record(self, name: &str) -> MarketRecord {
        let resources = serde_json::from_value(self.resources).unwrap_or_default();
        let location =
            LocationDescriptor::new(name, self.system_type, self.population.0, resources);

        let ids: BTreeSet<&String> = self
            .supply
            .keys()
            .chain(self.demand.keys())
            .chain(self.prices.keys())
            .chain(self.production.keys())
            .chain(self.consumption.keys())
            .chain(self.price_shock.keys())
            .collect();

        let count = |column: &BTreeMap<String, Count>, id: &str| {
            column.get(id).map(|c| c.0).unwrap_or(0)
        };

        let mut record = MarketRecord::new(location);
        for id in ids {
            let state = CommodityState {
                supply: count(&self.supply, id),
                demand: count(&self.demand, id),
                price: self.prices.get(id).map(|p| p.0).unwrap_or(0.0),
                production: count(&self.production, id),
                consumption: count(&self.consumption, id),
                price_shock: self.price_shock.get(id).map(|s| s.0).unwrap_or(1.0),
            };
            record.goods.insert(id.clone(), state);
        }
        record.last_updated = self.last_updated.0;
        record
    }
}

fn read_history(
    value: Value,
    catalog: &CommodityCatalog,
    max_samples: Option<usize>,
) -> HistoryLedger {
    let mut ledger = HistoryLedger::new();
    let Value::Object(entries) = value else {
        warn!("Ignoring saved price history: expected an object, got {}", kind_of(&value));
        return ledger;
    };

    for (key, entry) in entries {
        match entry {
            Value::Object(by_commodity) => {
                for (commodity, samples) in by_commodity {
                    push_samples(&mut ledger, &key, &commodity, samples, max_samples);
                }
            }
            Value::Array(_) => match split_flat_key(&key, catalog) {
                Some((location, commodity)) => {
                    push_samples(&mut ledger, location, commodity, entry, max_samples)
                }
                None => warn!("Skipping price history {}: no commodity suffix", key),
            },
            other => warn!("Skipping price history {}: got {}", key, kind_of(&other)),
        }
    }

    ledger
}

/// Split `"<location>_<commodity>"`, matching the longest catalog id
fn split_flat_key<'a>(key: &'a str, catalog: &CommodityCatalog) -> Option<(&'a str, &'a str)> {
    catalog
        .iter()
        .filter_map(|c| {
            let location = key.strip_suffix(c.id.as_str())?.strip_suffix('_')?;
            (!location.is_empty()).then(|| (location, &key[key.len() - c.id.len()..]))
        })
        .max_by_key(|(_, commodity)| commodity.len())
}

/// Append samples given as objects, `[tick, price]` pairs or bare prices.
/// Bare prices take their position as the tick.
fn push_samples(
    ledger: &mut HistoryLedger,
    location: &str,
    commodity: &str,
    samples: Value,
    max_samples: Option<usize>,
) {
    let Value::Array(samples) = samples else {
        warn!("Skipping price history {}/{}: not a list", location, commodity);
        return;
    };

    let mut skipped = 0;
    for (position, sample) in samples.iter().enumerate() {
        let fallback_tick = position as u64;
        let parsed = match sample {
            Value::Number(n) => n.as_f64().map(|price| (fallback_tick, price)),
            Value::Array(pair) if pair.len() == 2 => {
                let tick = pair[0].as_u64().unwrap_or(fallback_tick);
                pair[1].as_f64().map(|price| (tick, price))
            }
            Value::Object(fields) => read_sample_object(fields, fallback_tick),
            _ => None,
        };

        match parsed {
            Some((tick, price)) if price.is_finite() => {
                ledger.record_bounded(location, commodity, tick, price, max_samples)
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(
            "Skipped {} unreadable price samples for {}/{}",
            skipped, location, commodity
        );
    }
}

fn read_sample_object(fields: &Map<String, Value>, fallback_tick: u64) -> Option<(u64, f64)> {
    let price = fields.get("price")?.as_f64()?;
    let tick = fields
        .get("tick")
        .and_then(Value::as_u64)
        .unwrap_or(fallback_tick);
    Some((tick, price))
}

fn read_events(value: Value, capacity: usize) -> VecDeque<MacroEvent> {
    let Value::Array(items) = value else {
        warn!("Ignoring saved events: expected a list, got {}", kind_of(&value));
        return VecDeque::new();
    };

    let mut events: VecDeque<MacroEvent> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    while events.len() > capacity {
        events.pop_front();
    }
    events
}
