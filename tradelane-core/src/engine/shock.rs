//! External shock: the one write path into a record outside trades and ticks
//!
//! Narrative events and the macro-event engine both adjust markets through
//! [`apply_shock`]. The record is normalized right after the write, so
//! nothing downstream ever sees an out-of-range shock or a stale price.

use super::Economy;
use crate::config::PricingConfig;
use crate::core::{Commodity, CommodityCatalog, CommodityCategory, EconomyError};
use crate::market::MarketRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which commodities a shock touches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommoditySelector {
    All,
    Category(CommodityCategory),
    One(String),
}

impl CommoditySelector {
    pub fn matches(&self, commodity: &Commodity) -> bool {
        match self {
            CommoditySelector::All => true,
            CommoditySelector::Category(category) => commodity.category == *category,
            CommoditySelector::One(id) => commodity.id == *id,
        }
    }
}

/// Multiplicative adjustment to supply, demand and/or price shock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalShock {
    pub commodities: CommoditySelector,
    #[serde(default)]
    pub supply_multiplier: Option<f64>,
    #[serde(default)]
    pub demand_multiplier: Option<f64>,
    /// Composes into `price_shock`; cached prices are always derived
    #[serde(default)]
    pub price_multiplier: Option<f64>,
}

impl ExternalShock {
    pub fn new(commodities: CommoditySelector) -> Self {
        Self {
            commodities,
            supply_multiplier: None,
            demand_multiplier: None,
            price_multiplier: None,
        }
    }

    pub fn supply(mut self, multiplier: f64) -> Self {
        self.supply_multiplier = Some(multiplier);
        self
    }

    pub fn demand(mut self, multiplier: f64) -> Self {
        self.demand_multiplier = Some(multiplier);
        self
    }

    pub fn price(mut self, multiplier: f64) -> Self {
        self.price_multiplier = Some(multiplier);
        self
    }
}

fn usable(name: &str, multiplier: Option<f64>) -> Option<f64> {
    match multiplier {
        Some(m) if m.is_finite() && m > 0.0 => Some(m),
        Some(m) => {
            warn!("Ignoring {} multiplier {}: must be a positive number", name, m);
            None
        }
        None => None,
    }
}

fn scale(units: u64, multiplier: f64) -> u64 {
    (units as f64 * multiplier).round() as u64
}

/// Apply a shock to one record and renormalize it.
/// Returns how many commodities were touched.
pub fn apply_shock(
    record: &mut MarketRecord,
    shock: &ExternalShock,
    catalog: &CommodityCatalog,
    pricing_cfg: &PricingConfig,
) -> usize {
    let supply = usable("supply", shock.supply_multiplier);
    let demand = usable("demand", shock.demand_multiplier);
    let price = usable("price", shock.price_multiplier);

    let mut touched = 0;
    for commodity in catalog.iter().filter(|c| shock.commodities.matches(c)) {
        let Some(state) = record.get_mut(&commodity.id) else {
            continue;
        };

        if let Some(m) = supply {
            state.supply = scale(state.supply, m);
        }
        if let Some(m) = demand {
            state.demand = scale(state.demand, m);
        }
        if let Some(m) = price {
            state.price_shock *= m;
        }
        touched += 1;
    }

    record.normalize(catalog, pricing_cfg);
    touched
}

impl Economy {
    /// Entry point for subsystems outside the core that need to push a
    /// market around (news events, story beats).
    ///
    /// Returns `Ok(None)` when no market exists at `location`, otherwise the
    /// number of commodities touched. Naming a commodity the catalog does
    /// not know is a hard error.
    pub fn apply_external_shock(
        &mut self,
        location: &str,
        shock: &ExternalShock,
    ) -> Result<Option<usize>, EconomyError> {
        if let CommoditySelector::One(id) = &shock.commodities {
            self.catalog.require(id)?;
        }

        let Some(record) = self.markets.get_mut(location) else {
            debug!("External shock for unknown market {}", location);
            return Ok(None);
        };

        let touched = apply_shock(record, shock, &self.catalog, &self.config.pricing);
        debug!(
            "External shock at {}: {:?} touched {} commodities",
            location, shock.commodities, touched
        );

        Ok(Some(touched))
    }
}
