pub mod constants;
pub mod types;

pub use types::*;

use anyhow::{Context, Result};
use ::config::{Config as ConfigLoader, Environment, File, FileFormat};
use std::path::Path;

/// Prefix for environment overrides, e.g. `TRADELANE_TICK__MARKETS_PER_TICK=4`
pub const ENV_PREFIX: &str = "TRADELANE";

impl EconomyConfig {
    /// Parse a JSON config; missing sections and fields fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: EconomyConfig =
            serde_json::from_str(json).context("Failed to deserialize economy configuration")?;

        cfg.validate()?;

        Ok(cfg)
    }

    /// Load configuration from a JSON file with environment variable overrides.
    ///
    /// Sections nest with `__`, so `TRADELANE_EVENTS__CHANCE=0.2` replaces
    /// `events.chance` from the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();

        let config = ConfigLoader::builder()
            // Load from JSON file
            .add_source(File::from(config_path).format(FileFormat::Json))
            // Override with environment variables (TRADELANE_)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| {
                format!("Failed to build configuration from {}", config_path.display())
            })?;

        let cfg: EconomyConfig = config
            .try_deserialize()
            .context("Failed to deserialize economy configuration")?;

        cfg.validate()?;

        Ok(cfg)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let p = &self.pricing;
        if not_positive(p.min_ratio) {
            anyhow::bail!("pricing.min_ratio must be positive, got {}", p.min_ratio);
        }
        if p.min_ratio >= p.max_ratio {
            anyhow::bail!(
                "pricing.min_ratio ({}) must be below pricing.max_ratio ({})",
                p.min_ratio,
                p.max_ratio
            );
        }
        if not_positive(p.min_shock) || p.min_shock > 1.0 || p.max_shock < 1.0 {
            anyhow::bail!(
                "pricing shock bounds must satisfy 0 < min_shock <= 1 <= max_shock, got [{}, {}]",
                p.min_shock,
                p.max_shock
            );
        }

        check_fraction("trade.demand_nudge", self.trade.demand_nudge)?;

        let t = &self.tick;
        check_fraction("tick.noise_probability", t.noise_probability)?;
        check_fraction("tick.mean_reversion_rate", t.mean_reversion_rate)?;
        check_fraction("tick.shock_decay_rate", t.shock_decay_rate)?;
        if t.shock_decay_rate == 0.0 {
            anyhow::bail!("tick.shock_decay_rate must be positive or shocks never settle");
        }
        if t.supply_noise < 0 || t.demand_noise < 0 {
            anyhow::bail!("tick noise magnitudes must not be negative");
        }
        if not_positive(t.shock_epsilon) {
            anyhow::bail!("tick.shock_epsilon must be positive");
        }

        check_fraction("events.chance", self.events.chance)?;
        if self.events.max_markets == 0 {
            anyhow::bail!("events.max_markets must be at least 1");
        }

        let s = &self.scanner;
        if s.spread_threshold.is_nan() || s.spread_threshold < 0.0 {
            anyhow::bail!("scanner.spread_threshold must not be negative");
        }
        if not_positive(s.best_buy_price_ratio) || not_positive(s.best_sell_price_ratio) {
            anyhow::bail!("scanner best-deal price ratios must be positive");
        }

        if self.history.max_samples == Some(0) {
            anyhow::bail!("history.max_samples must be at least 1 when set");
        }

        Ok(())
    }
}

/// True for zero, negatives and NaN
fn not_positive(value: f64) -> bool {
    value.is_nan() || value <= 0.0
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        anyhow::bail!("{} must be within [0, 1], got {}", name, value);
    }
    Ok(())
}
