//! Trade Opportunity Scanner
//!
//! Read-only comparison of every pair of markets. A route is reported when
//! the relative spread `|a - b| / min(a, b)` reaches the configured
//! threshold (30% by default). The cheaper side is always the buy side.

use super::Economy;
use serde::{Deserialize, Serialize};

/// Rounding slack on the threshold, in units of machine epsilon.
/// Covers the few ulps lost computing `(sell - buy) / buy`, nothing more.
const SPREAD_ULPS: f64 = 8.0;

/// A profitable buy-here, sell-there route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRoute {
    pub commodity: String,
    pub buy_location: String,
    pub sell_location: String,
    pub buy_price: f64,
    pub sell_price: f64,
    /// Relative spread, 0.3 means 30%
    pub spread: f64,
    /// Supply at the buy location
    pub available_supply: u64,
}

impl TradeRoute {
    /// Gross profit per unit
    pub fn margin(&self) -> f64 {
        self.sell_price - self.buy_price
    }
}

impl Economy {
    /// Every route at or above the spread threshold, widest first
    pub fn get_trade_opportunities(&self) -> Vec<TradeRoute> {
        let threshold = self.config.scanner.spread_threshold;
        let threshold = threshold - SPREAD_ULPS * f64::EPSILON * (1.0 + threshold);
        let markets: Vec<_> = self.markets.iter().collect();
        let mut routes = Vec::new();

        for (i, a) in markets.iter().enumerate() {
            for b in &markets[i + 1..] {
                for (commodity, state_a) in &a.goods {
                    let Some(state_b) = b.get(commodity) else {
                        continue;
                    };

                    let (buy, sell, buy_state) = if state_a.price <= state_b.price {
                        (a, b, state_a)
                    } else {
                        (b, a, state_b)
                    };
                    let buy_price = state_a.price.min(state_b.price);
                    let sell_price = state_a.price.max(state_b.price);
                    if buy_price <= 0.0 || !buy_price.is_finite() {
                        continue;
                    }

                    let spread = (sell_price - buy_price) / buy_price;
                    if spread >= threshold {
                        routes.push(TradeRoute {
                            commodity: commodity.clone(),
                            buy_location: buy.name().to_string(),
                            sell_location: sell.name().to_string(),
                            buy_price,
                            sell_price,
                            spread,
                            available_supply: buy_state.supply,
                        });
                    }
                }
            }
        }

        routes.sort_by(|x, y| {
            y.spread
                .total_cmp(&x.spread)
                .then_with(|| x.commodity.cmp(&y.commodity))
                .then_with(|| x.buy_location.cmp(&y.buy_location))
        });
        routes
    }

    /// The `n` widest routes
    pub fn top_trade_opportunities(&self, n: usize) -> Vec<TradeRoute> {
        let mut routes = self.get_trade_opportunities();
        routes.truncate(n);
        routes
    }
}
