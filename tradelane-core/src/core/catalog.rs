//! Commodity catalog
//!
//! The catalog is built once at startup, wrapped in an `Arc` and handed to
//! the engine. Nothing mutates it afterwards; every market record is total
//! over its entries.

use super::errors::EconomyError;
use crate::config::constants::BASE_PRICE_JITTER;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Broad grouping of tradable goods, used by location profiles and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CommodityCategory {
    Minerals,
    Agriculture,
    Technology,
    Military,
    Luxury,
    Essentials,
    Exotic,
}

impl fmt::Display for CommodityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommodityCategory::Minerals => "Minerals",
            CommodityCategory::Agriculture => "Agriculture",
            CommodityCategory::Technology => "Technology",
            CommodityCategory::Military => "Military",
            CommodityCategory::Luxury => "Luxury",
            CommodityCategory::Essentials => "Essentials",
            CommodityCategory::Exotic => "Exotic",
        };
        f.write_str(name)
    }
}

/// A tradable good
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commodity {
    pub id: String,
    pub category: CommodityCategory,
    /// Reference price in credits, always positive
    pub base_price: f64,
}

impl Commodity {
    pub fn new(id: impl Into<String>, category: CommodityCategory, base_price: f64) -> Self {
        Self {
            id: id.into(),
            category,
            base_price,
        }
    }
}

/// Read-only lookup over every commodity in the game
#[derive(Debug, Clone)]
pub struct CommodityCatalog {
    commodities: Vec<Commodity>,
    index: HashMap<String, usize>,
}

impl CommodityCatalog {
    /// Build a catalog, rejecting duplicates and non-positive base prices
    pub fn new(commodities: Vec<Commodity>) -> Result<Self, EconomyError> {
        if commodities.is_empty() {
            return Err(EconomyError::EmptyCatalog);
        }

        let mut index = HashMap::with_capacity(commodities.len());
        for (i, commodity) in commodities.iter().enumerate() {
            if !(commodity.base_price.is_finite() && commodity.base_price > 0.0) {
                return Err(EconomyError::InvalidCommodity {
                    id: commodity.id.clone(),
                    reason: format!("base price must be positive, got {}", commodity.base_price),
                });
            }
            if index.insert(commodity.id.clone(), i).is_some() {
                return Err(EconomyError::InvalidCommodity {
                    id: commodity.id.clone(),
                    reason: "duplicate id".to_string(),
                });
            }
        }

        Ok(Self { commodities, index })
    }

    /// The galaxy's default goods list
    pub fn standard() -> Self {
        use CommodityCategory::*;

        let entries: [(&str, CommodityCategory, f64); 35] = [
            ("Zerite Crystals", Minerals, 120.0),
            ("Crythium Ore", Minerals, 85.0),
            ("Phasemetal", Minerals, 240.0),
            ("Voidglass Shards", Minerals, 310.0),
            ("Gravossils", Minerals, 95.0),
            ("Carboxite Slabs", Minerals, 60.0),
            ("Quantum Sand", Minerals, 150.0),
            ("Nullstone", Minerals, 200.0),
            ("Living Ore", Minerals, 420.0),
            ("Ethergrain", Agriculture, 25.0),
            ("Dreamroot", Agriculture, 70.0),
            ("Synthmeat Matrix", Agriculture, 45.0),
            ("Sporemilk", Agriculture, 30.0),
            ("Glowfruit", Agriculture, 55.0),
            ("Fertilizers", Agriculture, 20.0),
            ("Quantum Computing Cores", Technology, 900.0),
            ("Computing Hardware", Technology, 380.0),
            ("Machinery", Technology, 260.0),
            ("Temporal Anomaly Data", Technology, 650.0),
            ("Chrono-silt", Technology, 520.0),
            ("Weapons Components", Military, 480.0),
            ("Armor Plating", Military, 350.0),
            ("Shield Generators", Military, 720.0),
            ("Fuel", Military, 40.0),
            ("Luxury Goods", Luxury, 600.0),
            ("Art", Luxury, 800.0),
            ("Entertainment", Luxury, 150.0),
            ("Basic Supplies", Essentials, 15.0),
            ("Life Support", Essentials, 90.0),
            ("Tools", Essentials, 35.0),
            ("Raw Materials", Essentials, 18.0),
            ("Information", Exotic, 200.0),
            ("Financial Instruments", Exotic, 1000.0),
            ("Exotic Materials", Exotic, 1200.0),
            ("Energy Cells", Essentials, 65.0),
        ];

        let commodities: Vec<Commodity> = entries
            .iter()
            .map(|(id, category, price)| Commodity::new(*id, *category, *price))
            .collect();
        let index = commodities
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();

        Self { commodities, index }
    }

    /// Copy of this catalog with every base price jittered by the
    /// start-of-game variation, rounded to whole credits (never below 1)
    pub fn with_price_variation<R: Rng>(&self, rng: &mut R) -> Self {
        let (low, high) = BASE_PRICE_JITTER;
        let commodities = self
            .commodities
            .iter()
            .map(|c| Commodity {
                base_price: (c.base_price * rng.gen_range(low..=high)).round().max(1.0),
                ..c.clone()
            })
            .collect();

        Self {
            commodities,
            index: self.index.clone(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Commodity> {
        self.index.get(id).map(|&i| &self.commodities[i])
    }

    /// Catalog entry or a hard `UnknownCommodity` error
    pub fn require(&self, id: &str) -> Result<&Commodity, EconomyError> {
        self.get(id)
            .ok_or_else(|| EconomyError::UnknownCommodity(id.to_string()))
    }

    pub fn base_price(&self, id: &str) -> Option<f64> {
        self.get(id).map(|c| c.base_price)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Commodity> {
        self.commodities.iter()
    }

    pub fn by_category(&self, category: CommodityCategory) -> impl Iterator<Item = &Commodity> {
        self.commodities
            .iter()
            .filter(move |c| c.category == category)
    }

    pub fn len(&self) -> usize {
        self.commodities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commodities.is_empty()
    }
}
