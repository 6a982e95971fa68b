//! Tick Engine: per-market advance and the global turn
//!
//! Each commodity goes through the same fixed pipeline every tick:
//!
//! 1. production adds to supply, consumption depletes standing demand
//! 2. occasional bounded noise on supply and demand
//! 3. mean reversion toward the location's baseline
//! 4. price shock decays toward 1.0
//! 5. reprice
//! 6. ledger sample
//!
//! and the record's `last_updated` counter advances once at the end.

use super::Economy;
use crate::config::{EconomyConfig, TickConfig};
use crate::market::{Baseline, CommodityState};
use rand::seq::index;
use rand::Rng;
use tracing::{debug, warn};

impl Economy {
    /// Advance one market by a tick. Returns false if no market exists at
    /// `location`.
    pub fn update_market(&mut self, location: &str) -> bool {
        let mut log = Vec::new();
        self.advance_market(location, &mut log)
    }

    /// One turn of the galaxy: advance a random sample of at most
    /// `markets_per_tick` markets, then maybe fire a macro event.
    ///
    /// Returns the notable things that happened, in order, for the caller's
    /// news feed. Asking for more markets than exist just updates them all.
    pub fn tick_global_state(&mut self, markets_per_tick: usize) -> Vec<String> {
        self.turn += 1;
        let mut log = Vec::new();

        let names: Vec<String> = self.markets.names().map(str::to_string).collect();
        let amount = markets_per_tick.min(names.len());
        let picked = index::sample(&mut self.rng, names.len(), amount);
        for i in picked.iter() {
            self.advance_market(&names[i], &mut log);
        }

        if self.rng.gen::<f64>() < self.config.events.chance {
            if let Some(line) = self.trigger_macro_event() {
                log.push(line);
            }
        }

        debug!(
            "Turn {}: advanced {} of {} markets, {} log lines",
            self.turn,
            amount,
            names.len(),
            log.len()
        );
        log
    }

    /// `tick_global_state` with the configured markets per tick
    pub fn tick(&mut self) -> Vec<String> {
        self.tick_global_state(self.config.tick.markets_per_tick)
    }

    fn advance_market(&mut self, location: &str, log: &mut Vec<String>) -> bool {
        let Some(record) = self.markets.get_mut(location) else {
            debug!("Tick for unknown market {}", location);
            return false;
        };

        let repairs = record.normalize(&self.catalog, &self.config.pricing);
        if repairs > 0 {
            warn!("Repaired {} values at {} before tick", repairs, location);
        }

        for commodity in self.catalog.iter() {
            let target = crate::market::baseline(&record.location, &commodity.id);
            let Some(state) = record.goods.get_mut(&commodity.id) else {
                continue;
            };

            let had_stock = state.supply > 0;
            advance_commodity(state, target, &self.config, &mut self.rng);
            state.reprice(&self.config.pricing, commodity.base_price);

            if had_stock && state.supply == 0 {
                log.push(format!("{} has run out of {}", location, commodity.id));
            }

            // Direct update_market calls within one turn still move the series forward
            let stamp = match self.history.latest(location, &commodity.id) {
                Some(last) => self.turn.max(last.tick + 1),
                None => self.turn,
            };
            self.history.record_bounded(
                location,
                &commodity.id,
                stamp,
                state.price,
                self.config.history.max_samples,
            );
        }

        record.last_updated += 1;
        true
    }
}

/// Steps 1-4 for one commodity; the caller reprices
fn advance_commodity<R: Rng>(
    state: &mut CommodityState,
    target: Baseline,
    cfg: &EconomyConfig,
    rng: &mut R,
) {
    let tick = &cfg.tick;

    state.supply = state.supply.saturating_add(state.production);
    state.demand -= state.consumption.min(state.demand);

    if rng.gen::<f64>() < tick.noise_probability {
        state.supply = jitter(state.supply, tick.supply_noise, rng);
        state.demand = jitter(state.demand, tick.demand_noise, rng);
    }

    state.supply = revert(state.supply, target.supply, tick.mean_reversion_rate);
    state.demand = revert(state.demand, target.demand, tick.mean_reversion_rate);

    state.price_shock = decay_shock(state.price_shock, tick);
}

fn jitter<R: Rng>(value: u64, magnitude: i64, rng: &mut R) -> u64 {
    let magnitude = magnitude.max(0);
    let delta = rng.gen_range(-magnitude..=magnitude);
    if delta < 0 {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta as u64)
    }
}

/// Move `value` a fraction of the way to `target`
pub(crate) fn revert(value: u64, target: u64, rate: f64) -> u64 {
    let delta = ((target as f64 - value as f64) * rate).round();
    (value as f64 + delta).max(0.0) as u64
}

/// Exponential decay toward 1.0 that snaps once within epsilon
pub(crate) fn decay_shock(shock: f64, tick: &TickConfig) -> f64 {
    let keep = (1.0 - tick.shock_decay_rate).clamp(0.0, 1.0);
    let next = 1.0 + (shock - 1.0) * keep;
    if (next - 1.0).abs() < tick.shock_epsilon {
        1.0
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::galaxy;
    use super::super::{CommoditySelector, ExternalShock};
    use super::*;

    #[test]
    fn test_production_and_consumption() {
        let mut economy = galaxy(21);
        let name = economy.markets().names().next().unwrap().to_string();
        let before = economy.market(&name).unwrap().clone();

        assert!(economy.update_market(&name));

        let after = economy.market(&name).unwrap();
        assert_eq!(after.last_updated, before.last_updated + 1);
        for (id, old) in &before.goods {
            let new = after.get(id).unwrap();
            assert_eq!(new.supply, old.supply + old.production);
            assert_eq!(new.demand, old.demand - old.consumption.min(old.demand));
        }
    }

    #[test]
    fn test_shock_decays_monotonically_to_one() {
        let mut economy = galaxy(21);
        let name = economy.markets().names().next().unwrap().to_string();
        economy
            .apply_external_shock(&name, &ExternalShock::new(CommoditySelector::All).price(4.0))
            .unwrap();

        let mut last = economy.market(&name).unwrap().price_shock("Fuel");
        let mut ticks = 0;
        while last != 1.0 {
            economy.update_market(&name);
            let now = economy.market(&name).unwrap().price_shock("Fuel");
            assert!(now < last);
            assert!(now >= 1.0);
            last = now;
            ticks += 1;
            assert!(ticks < 100, "shock never settled");
        }
    }

    #[test]
    fn test_decay_from_below() {
        let cfg = TickConfig::default();
        let mut shock = 0.2;
        for _ in 0..200 {
            let next = decay_shock(shock, &cfg);
            assert!(next >= shock);
            assert!(next <= 1.0);
            shock = next;
        }
        assert_eq!(shock, 1.0);
    }

    #[test]
    fn test_revert_moves_toward_target() {
        assert_eq!(revert(200, 100, 0.1), 190);
        assert_eq!(revert(0, 100, 0.1), 10);
        assert_eq!(revert(100, 100, 0.1), 100);
        assert_eq!(revert(57, 3, 0.0), 57);
    }

    #[test]
    fn test_global_tick_caps_sample_and_records_history() {
        let mut economy = galaxy(5);
        let markets = economy.markets().len();

        let log = economy.tick_global_state(markets + 10);

        assert_eq!(economy.turn(), 1);
        assert!(log.is_empty());
        for record in economy.markets().iter() {
            assert_eq!(record.last_updated, 1);
            assert_eq!(economy.history().series(record.name(), "Fuel").len(), 1);
        }
    }

    #[test]
    fn test_repeated_updates_stamp_increasing_ticks() {
        let mut economy = galaxy(5);
        let name = economy.markets().names().next().unwrap().to_string();

        for _ in 0..3 {
            economy.update_market(&name);
        }
        let ticks: Vec<u64> = economy
            .history()
            .series(&name, "Fuel")
            .iter()
            .map(|s| s.tick)
            .collect();
        assert_eq!(ticks, vec![0, 1, 2]);
        assert_eq!(economy.market(&name).unwrap().last_updated, 3);

        // the global turn takes over again once it is ahead
        economy.tick_global_state(0);
        economy.tick_global_state(0);
        economy.tick_global_state(0);
        economy.tick_global_state(0);
        economy.update_market(&name);
        assert_eq!(economy.history().latest(&name, "Fuel").unwrap().tick, 4);
    }

    #[test]
    fn test_unknown_market() {
        let mut economy = galaxy(5);
        assert!(!economy.update_market("Nowhere"));
    }
}
