//! Scripted trader used by the turn driver
//!
//! Runs one route at a time: buy on the widest route, then sell at the
//! other end on a later turn. A sell market that keeps refusing the cargo is
//! abandoned for the best-paying market that still has demand.

use anyhow::Result;
use std::collections::HashMap;
use tracing::{info, warn};
use tradelane_core::{CargoHold, Economy, TradeOutcome, TradeRoute};

/// Refused sells tolerated at one market before looking elsewhere
pub const MAX_SELL_ATTEMPTS: u32 = 3;

/// A trader running one route at a time
#[derive(Debug)]
pub struct Trader {
    pub credits: f64,
    pub cargo: HashMap<String, u64>,
    pub hold_capacity: u64,
    route: Option<TradeRoute>,
    failed_sells: u32,
}

impl Trader {
    pub fn new(credits: f64, hold_capacity: u64) -> Self {
        Self {
            credits,
            cargo: HashMap::new(),
            hold_capacity,
            route: None,
            failed_sells: 0,
        }
    }

    /// The route currently being run, if any
    pub fn route(&self) -> Option<&TradeRoute> {
        self.route.as_ref()
    }

    pub fn act(&mut self, economy: &mut Economy) -> Result<()> {
        match self.route.take() {
            None => self.open_route(economy),
            Some(route) => self.close_route(economy, route),
        }
    }

    fn open_route(&mut self, economy: &mut Economy) -> Result<()> {
        let Some(route) = economy.top_trade_opportunities(1).into_iter().next() else {
            return Ok(());
        };

        let affordable = (self.credits / route.buy_price).floor() as u64;
        let quantity = affordable
            .min(route.available_supply)
            .min(self.hold_capacity);
        if quantity == 0 {
            return Ok(());
        }

        let outcome = economy.buy(&route.buy_location, &route.commodity, quantity, self.credits)?;
        info!("[turn {}] {}", economy.turn(), outcome.message());

        if let TradeOutcome::Filled(receipt) = outcome {
            self.credits -= receipt.total;
            *self.cargo.entry(receipt.commodity).or_default() += receipt.quantity;
            self.route = Some(route);
            self.failed_sells = 0;
        }
        Ok(())
    }

    fn close_route(&mut self, economy: &mut Economy, mut route: TradeRoute) -> Result<()> {
        let quantity = self.cargo.held(&route.commodity);
        if quantity == 0 {
            return Ok(());
        }

        let outcome = economy.sell(&route.sell_location, &route.commodity, quantity, &self.cargo)?;
        info!("[turn {}] {}", economy.turn(), outcome.message());

        match outcome {
            TradeOutcome::Filled(receipt) => {
                self.credits += receipt.total;
                self.cargo.remove(&receipt.commodity);
                self.failed_sells = 0;
            }
            TradeOutcome::Rejected(_) => {
                self.failed_sells += 1;
                if self.failed_sells < MAX_SELL_ATTEMPTS {
                    self.route = Some(route);
                    return Ok(());
                }

                self.failed_sells = 0;
                match best_outlet(economy, &route.commodity, &route.sell_location) {
                    Some(outlet) => {
                        info!(
                            "Giving up on {} for {}, heading to {}",
                            route.sell_location, route.commodity, outlet
                        );
                        route.sell_location = outlet;
                        self.route = Some(route);
                    }
                    None => {
                        warn!(
                            "No market wants {}, jettisoning {} units",
                            route.commodity, quantity
                        );
                        self.cargo.remove(&route.commodity);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Highest-priced market other than `exclude` with demand for `commodity`
fn best_outlet(economy: &Economy, commodity: &str, exclude: &str) -> Option<String> {
    economy
        .markets()
        .iter()
        .filter(|record| record.name() != exclude && record.demand(commodity) > 0)
        .filter_map(|record| record.price(commodity).map(|price| (price, record.name())))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, name)| name.to_string())
}
