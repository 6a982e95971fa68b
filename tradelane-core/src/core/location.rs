//! Location descriptors handed over by the navigation layer
//!
//! The engine only reads these once, when a market is first created. The
//! kind decides which goods a location produces and consumes; population
//! and resource rating scale the seeded stock.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a star system is known for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    #[serde(rename = "Core World")]
    CoreWorld,
    Frontier,
    Industrial,
    Military,
    Research,
    #[serde(rename = "Trading Hub")]
    TradingHub,
    Mining,
    Agricultural,
}

impl LocationKind {
    pub const ALL: [LocationKind; 8] = [
        LocationKind::CoreWorld,
        LocationKind::Frontier,
        LocationKind::Industrial,
        LocationKind::Military,
        LocationKind::Research,
        LocationKind::TradingHub,
        LocationKind::Mining,
        LocationKind::Agricultural,
    ];

    fn produced(&self) -> &'static [&'static str] {
        match self {
            LocationKind::Industrial => &[
                "Zerite Crystals",
                "Crythium Ore",
                "Phasemetal",
                "Voidglass Shards",
                "Machinery",
            ],
            LocationKind::Mining => &[
                "Gravossils",
                "Carboxite Slabs",
                "Quantum Sand",
                "Nullstone",
                "Living Ore",
            ],
            LocationKind::Agricultural => &[
                "Ethergrain",
                "Dreamroot",
                "Synthmeat Matrix",
                "Sporemilk",
                "Glowfruit",
            ],
            LocationKind::Research => &[
                "Chrono-silt",
                "Temporal Anomaly Data",
                "Quantum Computing Cores",
            ],
            LocationKind::TradingHub => &[],
            LocationKind::Military => &["Weapons Components", "Armor Plating", "Shield Generators"],
            LocationKind::CoreWorld => &["Luxury Goods", "Information", "Financial Instruments"],
            LocationKind::Frontier => &["Basic Supplies", "Raw Materials"],
        }
    }

    fn consumed(&self) -> &'static [&'static str] {
        match self {
            LocationKind::Industrial => &["Raw Materials", "Energy Cells", "Fuel"],
            LocationKind::Mining => &["Machinery", "Life Support", "Tools"],
            LocationKind::Agricultural => &["Machinery", "Fertilizers"],
            LocationKind::Research => &["Exotic Materials", "Computing Hardware"],
            LocationKind::TradingHub => &[],
            LocationKind::Military => &["Weapons Components", "Armor Plating", "Fuel"],
            LocationKind::CoreWorld => &["Luxury Goods", "Art", "Entertainment"],
            LocationKind::Frontier => &["Basic Supplies", "Tools", "Life Support"],
        }
    }

    /// Whether locations of this kind generate the commodity each tick
    pub fn produces(&self, commodity: &str) -> bool {
        self.produced().contains(&commodity)
    }

    /// Whether locations of this kind draw down demand for the commodity.
    /// Trading hubs consume everything.
    pub fn consumes(&self, commodity: &str) -> bool {
        *self == LocationKind::TradingHub || self.consumed().contains(&commodity)
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocationKind::CoreWorld => "Core World",
            LocationKind::Frontier => "Frontier",
            LocationKind::Industrial => "Industrial",
            LocationKind::Military => "Military",
            LocationKind::Research => "Research",
            LocationKind::TradingHub => "Trading Hub",
            LocationKind::Mining => "Mining",
            LocationKind::Agricultural => "Agricultural",
        };
        f.write_str(name)
    }
}

/// How rich a location's local resources are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceRating {
    Depleted,
    Poor,
    #[default]
    Moderate,
    Rich,
    Abundant,
}

impl ResourceRating {
    pub const ALL: [ResourceRating; 5] = [
        ResourceRating::Depleted,
        ResourceRating::Poor,
        ResourceRating::Moderate,
        ResourceRating::Rich,
        ResourceRating::Abundant,
    ];

    /// Supply multiplier for produced goods
    pub fn factor(&self) -> f64 {
        match self {
            ResourceRating::Depleted => 0.2,
            ResourceRating::Poor => 0.5,
            ResourceRating::Moderate => 1.0,
            ResourceRating::Rich => 1.5,
            ResourceRating::Abundant => 2.0,
        }
    }
}

/// Everything the engine needs to know about a location to seed its market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub resources: ResourceRating,
}

impl LocationDescriptor {
    pub fn new(
        name: impl Into<String>,
        kind: LocationKind,
        population: u64,
        resources: ResourceRating,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            population,
            resources,
        }
    }
}
