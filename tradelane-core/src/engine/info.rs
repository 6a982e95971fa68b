//! Market snapshots for display

use super::Economy;
use crate::market::MarketRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A commodity worth a trader's attention at one market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub commodity: String,
    pub price: f64,
    /// Supply for a buy, demand for a sell
    pub quantity: u64,
}

/// Snapshot of one market plus its standout deals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInfo {
    pub market: MarketRecord,
    /// Plentiful and cheap, cheapest first
    pub best_buys: Vec<Deal>,
    /// Wanted and expensive, dearest first
    pub best_sells: Vec<Deal>,
}

impl Economy {
    /// Snapshot of a market with its best buys and sells, `None` if no
    /// market exists at that location
    pub fn get_market_info(&self, location: &str) -> Option<MarketInfo> {
        let mut market = self.markets.get(location)?.clone();
        market.normalize(&self.catalog, &self.config.pricing);

        let cfg = &self.config.scanner;
        let mut best_buys = Vec::new();
        let mut best_sells = Vec::new();

        for commodity in self.catalog.iter() {
            let Some(state) = market.get(&commodity.id) else {
                continue;
            };

            if state.supply > cfg.best_buy_min_supply
                && state.price < commodity.base_price * cfg.best_buy_price_ratio
            {
                best_buys.push(Deal {
                    commodity: commodity.id.clone(),
                    price: state.price,
                    quantity: state.supply,
                });
            }

            if state.demand > cfg.best_sell_min_demand
                && state.price > commodity.base_price * cfg.best_sell_price_ratio
            {
                best_sells.push(Deal {
                    commodity: commodity.id.clone(),
                    price: state.price,
                    quantity: state.demand,
                });
            }
        }

        best_buys.sort_by(|a, b| by_price(a, b));
        best_sells.sort_by(|a, b| by_price(b, a));
        best_buys.truncate(cfg.best_deal_limit);
        best_sells.truncate(cfg.best_deal_limit);

        Some(MarketInfo {
            market,
            best_buys,
            best_sells,
        })
    }
}

fn by_price(a: &Deal, b: &Deal) -> Ordering {
    a.price
        .total_cmp(&b.price)
        .then_with(|| a.commodity.cmp(&b.commodity))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::galaxy;
    use super::super::{CommoditySelector, ExternalShock};

    #[test]
    fn test_unknown_location_is_none() {
        let economy = galaxy(1);
        assert!(economy.get_market_info("Nowhere").is_none());
    }

    #[test]
    fn test_best_deals_respect_thresholds() {
        let mut economy = galaxy(9);
        let name = economy.markets().names().next().unwrap().to_string();

        // flood one market and starve another commodity's supply
        economy
            .apply_external_shock(
                &name,
                &ExternalShock::new(CommoditySelector::One("Ethergrain".into())).supply(50.0),
            )
            .unwrap();
        economy
            .apply_external_shock(
                &name,
                &ExternalShock::new(CommoditySelector::One("Art".into()))
                    .supply(0.01)
                    .demand(4.0),
            )
            .unwrap();

        let info = economy.get_market_info(&name).unwrap();
        assert!(info.best_buys.len() <= 5);
        assert!(info.best_sells.len() <= 5);

        for deal in &info.best_buys {
            let base = economy.catalog().base_price(&deal.commodity).unwrap();
            assert!(deal.quantity > 100);
            assert!(deal.price < base * 0.8);
        }
        for deal in &info.best_sells {
            let base = economy.catalog().base_price(&deal.commodity).unwrap();
            assert!(deal.quantity > 100);
            assert!(deal.price > base * 1.2);
        }

        assert!(info.best_buys.iter().any(|d| d.commodity == "Ethergrain"));
        assert!(info.best_sells.iter().any(|d| d.commodity == "Art"));

        // ordering: buys cheapest first, sells dearest first
        assert!(info.best_buys.windows(2).all(|w| w[0].price <= w[1].price));
        assert!(info.best_sells.windows(2).all(|w| w[0].price >= w[1].price));
    }
}
