//! Tradelane Core - Market Simulation and Trading Engine
//!
//! Models supply, demand and price for a catalog of tradable goods at every
//! known location in the galaxy, evolves that state once per game turn and
//! mediates every buy and sell.
//!
//! ## Architecture
//! - **Single owner**: [`Economy`] owns every market record and the price
//!   history; nothing else mutates them
//! - **Total records**: each market holds every catalog commodity, so no
//!   lookup has a "missing key" branch
//! - **One choke point** for outside writes ([`Economy::apply_external_shock`]),
//!   with normalization right behind it
//! - **Turn driven**: no threads, no locks, no I/O
//!
//! ## Core Modules
//! - `core`: commodity catalog, location descriptors, errors
//! - `pricing`: the bounded pricing formula
//! - `market`: market records, seeding profiles and the record store
//! - `history`: per-market price ledger
//! - `engine`: trades, ticks, macro events, the opportunity scanner and
//!   persistence
//! - `config`: tunables and their validation
//! - `utils`: logging setup
//!
//! ## Example
//!
//! ```
//! use tradelane_core::prelude::*;
//!
//! let mut economy = Economy::with_defaults();
//! let vega = LocationDescriptor::new("Vega", LocationKind::Mining, 2_000_000, ResourceRating::Rich);
//! economy.create_market(&vega);
//!
//! let outcome = economy.buy("Vega", "Crythium Ore", 5, 10_000.0).unwrap();
//! println!("{}", outcome.message());
//!
//! for line in economy.tick_global_state(12) {
//!     println!("{}", line);
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod history;
pub mod market;
pub mod pricing;
pub mod utils;

pub use crate::config::EconomyConfig;
pub use crate::core::{
    Commodity, CommodityCatalog, CommodityCategory, EconomyError, LocationDescriptor,
    LocationKind, ResourceRating,
};
pub use engine::{
    CargoHold, CommoditySelector, Deal, Economy, EconomyState, ExternalShock, MacroEvent,
    MarketInfo, Side, TradeOutcome, TradeReceipt, TradeRejection, TradeRoute,
};
pub use history::{HistoryLedger, PriceSample};
pub use market::{CommodityState, MarketRecord, MarketStore};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::EconomyConfig;
    pub use crate::core::{
        CommodityCatalog, CommodityCategory, EconomyError, LocationDescriptor, LocationKind,
        ResourceRating,
    };
    pub use crate::engine::{
        CargoHold, CommoditySelector, Economy, ExternalShock, TradeOutcome, TradeRejection,
        TradeRoute,
    };
    pub use crate::history::HistoryLedger;
}
