use super::constants::*;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub pricing: PricingConfig,
    pub trade: TradeConfig,
    pub tick: TickConfig,
    pub events: EventConfig,
    pub scanner: ScannerConfig,
    pub history: HistoryConfig,

    /// Seed for the engine RNG; `None` seeds from entropy
    pub rng_seed: Option<u64>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            trade: TradeConfig::default(),
            tick: TickConfig::default(),
            events: EventConfig::default(),
            scanner: ScannerConfig::default(),
            history: HistoryConfig::default(),
            rng_seed: None,
        }
    }
}

impl EconomyConfig {
    /// Deterministic dynamics: no noise, no mean reversion, no macro events.
    ///
    /// Production, consumption and shock decay still run.
    pub fn quiet() -> Self {
        Self {
            tick: TickConfig {
                noise_probability: 0.0,
                mean_reversion_rate: 0.0,
                ..TickConfig::default()
            },
            events: EventConfig {
                chance: 0.0,
                ..EventConfig::default()
            },
            rng_seed: Some(0),
            ..Self::default()
        }
    }

    /// Same config with a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

/// Pricing bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Lowest supply/demand multiplier (e.g. 0.2 = 20% of base)
    pub min_ratio: f64,

    /// Highest supply/demand multiplier (e.g. 3.0 = 300% of base)
    pub max_ratio: f64,

    /// Clamp range for price shock during normalization
    pub min_shock: f64,
    pub max_shock: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            min_ratio: MIN_PRICE_RATIO,
            max_ratio: MAX_PRICE_RATIO,
            min_shock: MIN_PRICE_SHOCK,
            max_shock: MAX_PRICE_SHOCK,
        }
    }
}

/// Transaction tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeConfig {
    /// Share of traded quantity applied to local demand
    pub demand_nudge: f64,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            demand_nudge: DEMAND_NUDGE_FRACTION,
        }
    }
}

/// Per-tick market dynamics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Markets advanced per `tick_global_state` call when the caller
    /// does not say otherwise
    pub markets_per_tick: usize,

    /// Chance per commodity per tick of a noise draw
    pub noise_probability: f64,

    /// Maximum absolute noise on supply
    pub supply_noise: i64,

    /// Maximum absolute noise on demand
    pub demand_noise: i64,

    /// Fraction of the gap to baseline closed per tick
    pub mean_reversion_rate: f64,

    /// Fraction of shock distance from 1.0 removed per tick
    pub shock_decay_rate: f64,

    /// Snap distance for shock settling
    pub shock_epsilon: f64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            markets_per_tick: DEFAULT_MARKETS_PER_TICK,
            noise_probability: NOISE_PROBABILITY,
            supply_noise: SUPPLY_NOISE,
            demand_noise: DEMAND_NOISE,
            mean_reversion_rate: MEAN_REVERSION_RATE,
            shock_decay_rate: SHOCK_DECAY_RATE,
            shock_epsilon: SHOCK_EPSILON,
        }
    }
}

/// Macro-event generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Chance per global tick that an event fires
    pub chance: f64,

    /// Upper bound on markets touched by one event
    pub max_markets: usize,

    /// How many fired events are remembered
    pub recent_capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            chance: MACRO_EVENT_CHANCE,
            max_markets: MACRO_EVENT_MAX_MARKETS,
            recent_capacity: RECENT_EVENT_CAPACITY,
        }
    }
}

/// Cross-market and per-market analysis thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Relative spread reported as an opportunity (0.30 = 30%)
    pub spread_threshold: f64,

    pub best_buy_min_supply: u64,
    pub best_buy_price_ratio: f64,
    pub best_sell_min_demand: u64,
    pub best_sell_price_ratio: f64,
    pub best_deal_limit: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            spread_threshold: OPPORTUNITY_SPREAD_THRESHOLD,
            best_buy_min_supply: BEST_BUY_MIN_SUPPLY,
            best_buy_price_ratio: BEST_BUY_PRICE_RATIO,
            best_sell_min_demand: BEST_SELL_MIN_DEMAND,
            best_sell_price_ratio: BEST_SELL_PRICE_RATIO,
            best_deal_limit: BEST_DEAL_LIMIT,
        }
    }
}

/// History retention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Samples kept per series; `None` keeps everything
    pub max_samples: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_samples: Some(HISTORY_MAX_SAMPLES),
        }
    }
}
