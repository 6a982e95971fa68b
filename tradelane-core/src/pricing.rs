//! Pricing Engine
//!
//! ```text
//! price = base × clamp(0.5 + 0.5 × demand / max(supply, 1), 0.2, 3.0) × shock
//! ```
//!
//! Scarcity (demand above supply) pushes the multiplier up, surplus pushes it
//! down. The clamp keeps every good between 20% and 300% of its base before
//! the shock layer is applied. Zero supply is read as one unit, i.e. acute
//! scarcity rather than an undefined ratio.
//!
//! Every price the engine stores or quotes goes through this module, so the
//! bounds cannot be bypassed.

use crate::config::constants::{MAX_PRICE_RATIO, MIN_PRICE_RATIO};
use crate::config::PricingConfig;

/// Supply/demand multiplier, clamped to `[min_ratio, max_ratio]`
#[inline]
pub fn ratio_multiplier(supply: u64, demand: u64, min_ratio: f64, max_ratio: f64) -> f64 {
    let effective_supply = supply.max(1) as f64;
    let raw = 0.5 + 0.5 * (demand as f64 / effective_supply);
    raw.clamp(min_ratio, max_ratio)
}

/// Price with the default `[0.2, 3.0]` bounds
#[inline]
pub fn price(base_price: f64, supply: u64, demand: u64, shock: f64) -> f64 {
    price_within(base_price, supply, demand, shock, MIN_PRICE_RATIO, MAX_PRICE_RATIO)
}

/// Price with the bounds from a `PricingConfig`
#[inline]
pub fn price_with(
    config: &PricingConfig,
    base_price: f64,
    supply: u64,
    demand: u64,
    shock: f64,
) -> f64 {
    price_within(
        base_price,
        supply,
        demand,
        shock,
        config.min_ratio,
        config.max_ratio,
    )
}

fn price_within(
    base_price: f64,
    supply: u64,
    demand: u64,
    shock: f64,
    min_ratio: f64,
    max_ratio: f64,
) -> f64 {
    // A shock that is not a positive number carries no information
    let shock = if shock.is_finite() && shock > 0.0 {
        shock
    } else {
        1.0
    };
    base_price * ratio_multiplier(supply, demand, min_ratio, max_ratio) * shock
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scarcity_scenario() {
        // demand twice the supply: 0.5 + 0.5 × 2 = 1.5
        assert_relative_eq!(price(100.0, 10, 20, 1.0), 150.0);
    }

    #[test]
    fn test_zero_supply_caps_at_max_ratio() {
        // 0.5 + 0.5 × 5 = 3.0, right on the ceiling
        assert_relative_eq!(price(50.0, 0, 5, 1.0), 150.0);
        // far beyond the ceiling still clamps
        assert_relative_eq!(price(50.0, 0, 5_000, 1.0), 150.0);
    }

    #[test]
    fn test_zero_supply_equals_unit_supply() {
        for demand in [0, 1, 3, 17, 250] {
            assert_eq!(price(80.0, 0, demand, 1.0), price(80.0, 1, demand, 1.0));
        }
    }

    #[test]
    fn test_surplus_floors_at_half_base() {
        // no demand at all: multiplier is 0.5, above the 0.2 floor
        assert_relative_eq!(price(100.0, 1_000, 0, 1.0), 50.0);
    }

    #[test]
    fn test_floor_reachable_with_narrow_config() {
        let cfg = PricingConfig {
            min_ratio: 0.6,
            ..PricingConfig::default()
        };
        assert_relative_eq!(price_with(&cfg, 100.0, 1_000, 0, 1.0), 60.0);
    }

    #[test]
    fn test_shock_multiplies_final_price() {
        let calm = price(100.0, 10, 20, 1.0);
        let shocked = price(100.0, 10, 20, 1.4);
        assert_relative_eq!(shocked, calm * 1.4);
    }

    #[test]
    fn test_invalid_shock_treated_as_neutral() {
        let calm = price(100.0, 40, 40, 1.0);
        assert_eq!(price(100.0, 40, 40, 0.0), calm);
        assert_eq!(price(100.0, 40, 40, -2.0), calm);
        assert_eq!(price(100.0, 40, 40, f64::NAN), calm);
    }
}
