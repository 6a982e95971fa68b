//! Common utilities for all binaries
//!
//! Shared initialization, CLI parsing, and setup code.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tradelane_core::{Economy, EconomyConfig, LocationDescriptor, LocationKind, ResourceRating};

/// Common CLI arguments for all binaries
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CommonArgs {
    /// Seed for galaxy generation and market dynamics
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of markets in the synthetic galaxy
    #[arg(short, long, default_value = "20")]
    pub markets: usize,

    /// Turns to simulate (0 runs until Ctrl+C)
    #[arg(short, long, default_value = "100")]
    pub turns: u64,

    /// Markets advanced per turn (defaults to the config value)
    #[arg(long)]
    pub markets_per_tick: Option<usize>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Economy config file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Initialize tracing/logging
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()?;
    }

    Ok(())
}

/// Config from file (or defaults) with the CLI seed applied
pub fn load_config(args: &CommonArgs) -> Result<EconomyConfig> {
    let config = match &args.config {
        Some(path) => EconomyConfig::load(path)
            .with_context(|| format!("loading economy config {}", path.display()))?,
        None => EconomyConfig::default(),
    };

    Ok(match args.seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}

/// RNG for the binary's own decisions (galaxy layout, catalog jitter)
pub fn driver_rng(seed: Option<u64>) -> StdRng {
    match seed {
        // Offset so layout draws differ from the engine's own stream
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(0x5eed)),
        None => StdRng::from_entropy(),
    }
}

const STAR_NAMES: [&str; 12] = [
    "Vega", "Sol", "Kepler", "Altair", "Deneb", "Rigel", "Sirius", "Procyon", "Lyra", "Tau Ceti",
    "Arcturus", "Polaris",
];

/// Stand-in for the navigation layer: report `count` random locations
pub fn build_galaxy<R: Rng>(economy: &mut Economy, count: usize, rng: &mut R) -> Vec<String> {
    let mut names = Vec::with_capacity(count);

    for i in 0..count {
        let star = STAR_NAMES[i % STAR_NAMES.len()];
        let name = format!("{} {}", star, i / STAR_NAMES.len() + 1);
        let kind = LocationKind::ALL[rng.gen_range(0..LocationKind::ALL.len())];
        let resources = ResourceRating::ALL[rng.gen_range(0..ResourceRating::ALL.len())];
        let population = rng.gen_range(100_000..20_000_000);

        economy.create_market(&LocationDescriptor::new(
            name.clone(),
            kind,
            population,
            resources,
        ));
        names.push(name);
    }

    names
}

/// Print final statistics
pub fn print_summary(economy: &Economy) {
    tracing::info!("=== Final Economy ===");
    tracing::info!("Turns simulated: {}", economy.turn());
    tracing::info!("Markets: {}", economy.markets().len());
    tracing::info!("Price samples: {}", economy.history().sample_count());

    for event in economy.recent_events() {
        tracing::info!("Recent event (turn {}): {}", event.turn, event.headline());
    }

    let routes = economy.top_trade_opportunities(5);
    if routes.is_empty() {
        tracing::info!("No trade routes above the spread threshold");
    }
    for route in routes {
        tracing::info!(
            "Route: {} from {} @ {:.2} to {} @ {:.2} ({:.0}% spread, {} available)",
            route.commodity,
            route.buy_location,
            route.buy_price,
            route.sell_location,
            route.sell_price,
            route.spread * 100.0,
            route.available_supply
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_installs_once() {
        let _ = init_logging("debug", false);
        assert!(init_logging("info", true).is_err());
        tracing::info!("still logging after the rejected second install");
    }

    #[test]
    fn test_seed_flows_into_config() {
        let args = CommonArgs::parse_from(["galaxy-sim", "--seed", "42", "--markets", "3"]);
        let config = load_config(&args).unwrap();

        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(args.markets, 3);
    }
}
