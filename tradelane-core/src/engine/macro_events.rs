//! Macro-Event Engine: galaxy-wide economic events
//!
//! An event picks a template from [`MACRO_EVENTS`], rolls one set of
//! multipliers for its archetype and pushes it through the shock choke
//! point at a handful of markets. Nothing undoes an event; the tick's shock
//! decay and mean reversion bring the markets back.

use super::shock::{apply_shock, CommoditySelector, ExternalShock};
use super::Economy;
use crate::core::CommodityCategory;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventArchetype {
    /// Supply collapses and prices jump
    ScarcitySpike,
    /// Supply floods in and prices sag
    Glut,
    /// Prices jump everywhere, stock untouched
    PriceShockWave,
}

impl EventArchetype {
    /// Roll the multipliers for one occurrence
    pub fn roll<R: Rng>(&self, commodities: CommoditySelector, rng: &mut R) -> ExternalShock {
        let shock = ExternalShock::new(commodities);
        match self {
            EventArchetype::ScarcitySpike => shock
                .supply(rng.gen_range(0.3..0.6))
                .price(rng.gen_range(1.2..1.6)),
            EventArchetype::Glut => shock
                .supply(rng.gen_range(1.5..2.5))
                .price(rng.gen_range(0.7..0.9)),
            EventArchetype::PriceShockWave => shock.price(rng.gen_range(1.2..1.5)),
        }
    }
}

impl fmt::Display for EventArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventArchetype::ScarcitySpike => write!(f, "scarcity"),
            EventArchetype::Glut => write!(f, "glut"),
            EventArchetype::PriceShockWave => write!(f, "price shock"),
        }
    }
}

/// Catalog entry for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroEventTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub archetype: EventArchetype,
    /// `None` hits every commodity
    pub category: Option<CommodityCategory>,
}

impl MacroEventTemplate {
    pub fn selector(&self) -> CommoditySelector {
        match self.category {
            Some(category) => CommoditySelector::Category(category),
            None => CommoditySelector::All,
        }
    }
}

pub const MACRO_EVENTS: [MacroEventTemplate; 5] = [
    MacroEventTemplate {
        name: "Mining Boom",
        description: "Rich ore deposits discovered!",
        archetype: EventArchetype::Glut,
        category: Some(CommodityCategory::Minerals),
    },
    MacroEventTemplate {
        name: "Crop Failure",
        description: "Agricultural worlds hit by blight",
        archetype: EventArchetype::ScarcitySpike,
        category: Some(CommodityCategory::Agriculture),
    },
    MacroEventTemplate {
        name: "Trade War",
        description: "Political tensions disrupt trade routes",
        archetype: EventArchetype::PriceShockWave,
        category: None,
    },
    MacroEventTemplate {
        name: "Technology Breakthrough",
        description: "New manufacturing techniques developed",
        archetype: EventArchetype::Glut,
        category: Some(CommodityCategory::Technology),
    },
    MacroEventTemplate {
        name: "Pirate Raids",
        description: "Pirates attacking trade convoys",
        archetype: EventArchetype::ScarcitySpike,
        category: Some(CommodityCategory::Luxury),
    },
];

/// An event that actually fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroEvent {
    pub name: String,
    pub description: String,
    pub archetype: EventArchetype,
    pub affected_markets: Vec<String>,
    pub turn: u64,
}

impl MacroEvent {
    /// One-line news feed entry
    pub fn headline(&self) -> String {
        format!(
            "{}: {} ({} at {})",
            self.name,
            self.description,
            self.archetype,
            self.affected_markets.join(", ")
        )
    }
}

impl Economy {
    /// Fire a random event at 1..=`events.max_markets` markets.
    /// Returns its headline, or `None` when there are no markets.
    pub fn trigger_macro_event(&mut self) -> Option<String> {
        let template = *MACRO_EVENTS.choose(&mut self.rng)?;
        self.fire_macro_event(&template)
    }

    /// Fire a specific event template
    pub fn fire_macro_event(&mut self, template: &MacroEventTemplate) -> Option<String> {
        if self.markets.is_empty() {
            return None;
        }

        let names: Vec<String> = self.markets.names().map(str::to_string).collect();
        let most = self.config.events.max_markets.clamp(1, names.len());
        let count = self.rng.gen_range(1..=most);
        let picked = index::sample(&mut self.rng, names.len(), count);

        let shock = template.archetype.roll(template.selector(), &mut self.rng);
        let mut affected = Vec::with_capacity(count);
        for i in picked.iter() {
            if let Some(record) = self.markets.get_mut(&names[i]) {
                apply_shock(record, &shock, &self.catalog, &self.config.pricing);
                affected.push(names[i].clone());
            }
        }

        let event = MacroEvent {
            name: template.name.to_string(),
            description: template.description.to_string(),
            archetype: template.archetype,
            affected_markets: affected,
            turn: self.turn,
        };
        let headline = event.headline();
        info!("Macro event on turn {}: {}", self.turn, headline);

        self.recent_events.push_back(event);
        while self.recent_events.len() > self.config.events.recent_capacity {
            self.recent_events.pop_front();
        }

        Some(headline)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::galaxy;
    use super::*;
    use crate::config::EconomyConfig;
    use crate::core::CommodityCatalog;
    use std::sync::Arc;

    #[test]
    fn test_no_markets_no_event() {
        let mut economy = Economy::new(
            Arc::new(CommodityCatalog::standard()),
            EconomyConfig::quiet(),
        );
        assert!(economy.trigger_macro_event().is_none());
        assert_eq!(economy.recent_events().count(), 0);
    }

    #[test]
    fn test_scarcity_cuts_supply_and_raises_shock() {
        let mut economy = galaxy(31);
        let before = economy.markets().clone();
        let crop_failure = MACRO_EVENTS[1];

        let headline = economy.fire_macro_event(&crop_failure).unwrap();
        assert!(headline.starts_with("Crop Failure"));

        let event = economy.recent_events().last().unwrap().clone();
        assert!(!event.affected_markets.is_empty());
        assert!(event.affected_markets.len() <= economy.config().events.max_markets);

        for name in &event.affected_markets {
            let old = before.get(name).unwrap();
            let new = economy.market(name).unwrap();
            for commodity in economy.catalog().by_category(CommodityCategory::Agriculture) {
                assert!(new.supply(&commodity.id) <= old.supply(&commodity.id));
                assert!(new.price_shock(&commodity.id) > 1.0);
            }
            assert_eq!(new.get("Art"), old.get("Art"));
        }
    }

    #[test]
    fn test_recent_events_are_bounded() {
        let mut economy = galaxy(32);
        for _ in 0..12 {
            economy.trigger_macro_event();
        }
        assert_eq!(
            economy.recent_events().count(),
            economy.config().events.recent_capacity
        );
    }

    #[test]
    fn test_catalog_names() {
        let names: Vec<&str> = MACRO_EVENTS.iter().map(|e| e.name).collect();
        assert!(names.contains(&"Mining Boom"));
        assert!(names.contains(&"Pirate Raids"));
        assert_eq!(MACRO_EVENTS[2].selector(), CommoditySelector::All);
    }
}
