//! Galaxy Simulation - turn driver for the market engine
//!
//! Generates a synthetic galaxy, then runs the turn loop:
//! - `tick_global_state` once per turn, logging its news lines
//! - one scripted [`Trader`] who buys on the widest route and sells at the
//!   other end on a later turn
//!
//! Stops after `--turns` turns or on Ctrl+C, then prints a summary.

use anyhow::Result;
use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use tradelane_bins::common::{
    build_galaxy, driver_rng, init_logging, load_config, print_summary, CommonArgs,
};
use tradelane_bins::trader::Trader;
use tradelane_core::{CommodityCatalog, Economy};

const STARTING_CREDITS: f64 = 5_000.0;
const HOLD_CAPACITY: u64 = 60;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = CommonArgs::parse();

    // Initialize logging
    init_logging(&args.log_level, args.json_logs)?;

    info!("=== Tradelane: Galaxy Simulation ===");

    let config = load_config(&args)?;
    let markets_per_tick = args
        .markets_per_tick
        .unwrap_or(config.tick.markets_per_tick);
    info!(
        "Seed: {:?}, markets: {}, turns: {}, markets per tick: {}",
        args.seed, args.markets, args.turns, markets_per_tick
    );

    let mut rng = driver_rng(args.seed);
    let catalog = Arc::new(CommodityCatalog::standard().with_price_variation(&mut rng));
    let mut economy = Economy::new(catalog, config);
    build_galaxy(&mut economy, args.markets, &mut rng);

    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_ctrlc = running.clone();
    ctrlc::set_handler(move || {
        warn!("Received Ctrl+C, finishing the current turn...");
        running_ctrlc.store(false, Ordering::SeqCst);
    })?;

    let mut trader = Trader::new(STARTING_CREDITS, HOLD_CAPACITY);

    while running.load(Ordering::SeqCst) {
        if args.turns > 0 && economy.turn() >= args.turns {
            break;
        }

        for line in economy.tick_global_state(markets_per_tick) {
            info!("[turn {}] {}", economy.turn(), line);
        }

        trader.act(&mut economy)?;
    }

    print_summary(&economy);
    info!("Trader finished with {:.2} credits", trader.credits);

    Ok(())
}
