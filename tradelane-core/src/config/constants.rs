//! Centralized tunables for the market simulation
//!
//! Every number the engine uses to shape prices, trades and ticks lives here.
//! `EconomyConfig::default()` is built from these values, so a config file
//! only needs to name what it changes.

// ===== PRICING =====

/// Lower bound of the supply/demand multiplier applied to base price
pub const MIN_PRICE_RATIO: f64 = 0.2;

/// Upper bound of the supply/demand multiplier applied to base price
pub const MAX_PRICE_RATIO: f64 = 3.0;

/// Smallest price shock a record may carry after normalization
pub const MIN_PRICE_SHOCK: f64 = 0.05;

/// Largest price shock a record may carry after normalization
pub const MAX_PRICE_SHOCK: f64 = 20.0;

// ===== TRADING =====

/// Fraction of a traded quantity that nudges local demand
/// Buying raises demand by this share, selling lowers it (floored at zero)
pub const DEMAND_NUDGE_FRACTION: f64 = 0.1;

// ===== TICK DYNAMICS =====

/// Default number of markets advanced per global tick
pub const DEFAULT_MARKETS_PER_TICK: usize = 12;

/// Chance per commodity per tick that random noise is applied
pub const NOISE_PROBABILITY: f64 = 0.1;

/// Maximum absolute supply change from one noise draw
pub const SUPPLY_NOISE: i64 = 20;

/// Maximum absolute demand change from one noise draw
pub const DEMAND_NOISE: i64 = 15;

/// Fraction of the gap to baseline closed by mean reversion each tick
pub const MEAN_REVERSION_RATE: f64 = 0.05;

/// Fraction of the distance between price shock and 1.0 removed each tick
pub const SHOCK_DECAY_RATE: f64 = 0.15;

/// Shocks within this distance of 1.0 snap to exactly 1.0
pub const SHOCK_EPSILON: f64 = 1e-3;

// ===== MACRO EVENTS =====

/// Chance that a global tick fires a macro event
pub const MACRO_EVENT_CHANCE: f64 = 0.05;

/// Upper bound on markets touched by one macro event
pub const MACRO_EVENT_MAX_MARKETS: usize = 4;

/// Number of fired macro events remembered for display
pub const RECENT_EVENT_CAPACITY: usize = 5;

// ===== ANALYSIS =====

/// Relative spread at or above which a route is reported (30%)
pub const OPPORTUNITY_SPREAD_THRESHOLD: f64 = 0.30;

/// Minimum stock for a commodity to count as a best buy
pub const BEST_BUY_MIN_SUPPLY: u64 = 100;

/// Price below `base * ratio` qualifies as a best buy
pub const BEST_BUY_PRICE_RATIO: f64 = 0.8;

/// Minimum demand for a commodity to count as a best sell
pub const BEST_SELL_MIN_DEMAND: u64 = 100;

/// Price above `base * ratio` qualifies as a best sell
pub const BEST_SELL_PRICE_RATIO: f64 = 1.2;

/// Entries returned per best-deal list
pub const BEST_DEAL_LIMIT: usize = 5;

// ===== HISTORY =====

/// Samples retained per location/commodity series
pub const HISTORY_MAX_SAMPLES: usize = 100;

// ===== MARKET SEEDING =====

/// Baseline stock for supply and demand before location modifiers
pub const BASELINE_STOCK: f64 = 125.0;

/// Supply multiplier for commodities a location produces
pub const PRODUCER_SUPPLY_FACTOR: f64 = 2.25;

/// Demand multiplier for commodities a location consumes
pub const CONSUMER_DEMAND_FACTOR: f64 = 1.85;

/// Population that corresponds to a population factor of 1.0
pub const POPULATION_UNIT: f64 = 1_000_000.0;

/// Bounds for the population factor
pub const MIN_POPULATION_FACTOR: f64 = 0.1;
pub const MAX_POPULATION_FACTOR: f64 = 10.0;

/// Jitter applied to baselines when a market is first seeded
pub const SEED_JITTER_LOW: f64 = 0.4;
pub const SEED_JITTER_HIGH: f64 = 1.6;

/// Production rate range (units per tick) for produced commodities
pub const PRODUCTION_RANGE: (u64, u64) = (10, 50);

/// Consumption rate range (units per tick) for consumed commodities
pub const CONSUMPTION_RANGE: (u64, u64) = (5, 30);

/// Start-of-game base price jitter
pub const BASE_PRICE_JITTER: (f64, f64) = (0.8, 1.2);
