//! Market simulation engine
//!
//! [`Economy`] owns the market store, the history ledger and the RNG, and is
//! the only thing that mutates market records. It is driven from a single
//! turn loop; nothing here spawns, locks or blocks.
//!
//! ## Turn Pipeline
//!
//! ```text
//!  turn driver ──► tick_global_state(n)
//!                    │
//!                    ├─ sample min(n, markets) records
//!                    │    └─ per commodity: production/consumption
//!                    │                      → noise → mean reversion
//!                    │                      → shock decay → reprice
//!                    │                      → ledger sample
//!                    │
//!                    └─ maybe fire a macro event ──► apply_shock (choke point)
//!
//!  traders ───────► buy / sell ──► validate ──► mutate ──► reprice
//!
//!  event layer ───► apply_external_shock ─────► apply_shock (choke point)
//! ```
//!
//! Modules:
//! - `info`: market snapshot with best buy/sell lists
//! - `transaction`: buy and sell
//! - `tick`: per-market and global advance
//! - `shock`: the single write path for external and macro adjustments
//! - `macro_events`: galaxy-wide event catalog
//! - `scanner`: cross-market trade opportunities
//! - `persistence`: snapshot and lenient restore

pub mod info;
pub mod macro_events;
pub mod persistence;
pub mod scanner;
pub mod shock;
pub mod tick;
pub mod transaction;

pub use info::{Deal, MarketInfo};
pub use macro_events::{EventArchetype, MacroEvent, MacroEventTemplate, MACRO_EVENTS};
pub use persistence::EconomyState;
pub use scanner::TradeRoute;
pub use shock::{CommoditySelector, ExternalShock};
pub use transaction::{CargoHold, Side, TradeOutcome, TradeReceipt, TradeRejection};

use crate::config::EconomyConfig;
use crate::core::{CommodityCatalog, LocationDescriptor};
use crate::history::HistoryLedger;
use crate::market::{MarketRecord, MarketStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::sync::Arc;

/// The economy core: markets, their history and the dynamics between them
pub struct Economy {
    catalog: Arc<CommodityCatalog>,
    config: EconomyConfig,
    markets: MarketStore,
    history: HistoryLedger,
    recent_events: VecDeque<MacroEvent>,
    turn: u64,
    rng: StdRng,
}

impl Economy {
    /// Create an engine with no markets
    pub fn new(catalog: Arc<CommodityCatalog>, config: EconomyConfig) -> Self {
        let rng = seeded_rng(&config);
        Self {
            catalog,
            config,
            markets: MarketStore::new(),
            history: HistoryLedger::new(),
            recent_events: VecDeque::new(),
            turn: 0,
            rng,
        }
    }

    /// Standard catalog, default tuning
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(CommodityCatalog::standard()),
            EconomyConfig::default(),
        )
    }

    pub(crate) fn from_parts(
        catalog: Arc<CommodityCatalog>,
        config: EconomyConfig,
        markets: MarketStore,
        history: HistoryLedger,
        recent_events: VecDeque<MacroEvent>,
        turn: u64,
    ) -> Self {
        let rng = seeded_rng(&config);
        Self {
            catalog,
            config,
            markets,
            history,
            recent_events,
            turn,
            rng,
        }
    }

    pub fn catalog(&self) -> &CommodityCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn markets(&self) -> &MarketStore {
        &self.markets
    }

    pub fn market(&self, name: &str) -> Option<&MarketRecord> {
        self.markets.get(name)
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Global ticks completed so far
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Most recent macro events, oldest first
    pub fn recent_events(&self) -> impl Iterator<Item = &MacroEvent> {
        self.recent_events.iter()
    }

    /// Open a market for a location the first time navigation reports it.
    /// Later calls for the same name return the existing record unchanged.
    pub fn create_market(&mut self, location: &LocationDescriptor) -> &MarketRecord {
        self.markets
            .create(location, &self.catalog, &self.config.pricing, &mut self.rng)
    }
}

fn seeded_rng(config: &EconomyConfig) -> StdRng {
    match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
