//! Transaction Engine: buy and sell against one market record
//!
//! Every precondition is checked before the record is touched, so a
//! rejected trade leaves the market exactly as it was.
//!
//! ## Effects
//!
//! ```text
//!            supply        demand                  price
//! buy   q    -= q          += floor(q × nudge)     recomputed
//! sell  q    += q          -= floor(q × nudge)     recomputed (quote is pre-trade)
//! ```
//!
//! Supply moves by the full quantity while demand only moves by the nudge.
//! A buy followed by a sell of the same size restores supply but not
//! necessarily demand.
//!
//! The engine never touches the trader's credits or cargo; it only reads
//! them. Applying the receipt is the caller's job.

use super::Economy;
use crate::core::EconomyError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// What a filled trade did, for the caller to settle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub side: Side,
    pub location: String,
    pub commodity: String,
    pub quantity: u64,
    /// Price quoted before the trade moved the market
    pub unit_price: f64,
    /// Cost of a buy, proceeds of a sell
    pub total: f64,
}

/// Why a trade was refused
#[derive(Debug, Clone, PartialEq)]
pub enum TradeRejection {
    UnknownLocation { location: String },
    ZeroQuantity,
    /// Market has none of the commodity at all
    OutOfStock,
    InsufficientSupply { requested: u64, available: u64 },
    InsufficientCredits { required: f64, available: f64 },
    InsufficientCargo { requested: u64, held: u64 },
    /// Market does not want the commodity
    NoDemand,
}

impl fmt::Display for TradeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeRejection::UnknownLocation { location } => {
                write!(f, "No market at {}", location)
            }
            TradeRejection::ZeroQuantity => write!(f, "Quantity must be at least 1"),
            TradeRejection::OutOfStock => write!(f, "None available at this market"),
            TradeRejection::InsufficientSupply {
                requested,
                available,
            } => write!(
                f,
                "Insufficient supply: requested {}, only {} available",
                requested, available
            ),
            TradeRejection::InsufficientCredits {
                required,
                available,
            } => write!(
                f,
                "Insufficient credits: need {:.2}, have {:.2}",
                required, available
            ),
            TradeRejection::InsufficientCargo { requested, held } => write!(
                f,
                "Insufficient cargo: selling {}, holding {}",
                requested, held
            ),
            TradeRejection::NoDemand => write!(f, "No demand for this commodity here"),
        }
    }
}

/// Result of a buy or sell
#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    Filled(TradeReceipt),
    Rejected(TradeRejection),
}

impl TradeOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, TradeOutcome::Filled(_))
    }

    pub fn receipt(&self) -> Option<&TradeReceipt> {
        match self {
            TradeOutcome::Filled(receipt) => Some(receipt),
            TradeOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&TradeRejection> {
        match self {
            TradeOutcome::Filled(_) => None,
            TradeOutcome::Rejected(reason) => Some(reason),
        }
    }

    /// Amount to credit the seller, `None` unless this is a filled sell
    pub fn credited(&self) -> Option<f64> {
        match self {
            TradeOutcome::Filled(receipt) if receipt.side == Side::Sell => Some(receipt.total),
            _ => None,
        }
    }

    /// Human-readable summary, suitable for a status line
    pub fn message(&self) -> String {
        match self {
            TradeOutcome::Filled(r) => {
                let verb = match r.side {
                    Side::Buy => "Bought",
                    Side::Sell => "Sold",
                };
                format!(
                    "{} {} {} at {} for {:.2} credits",
                    verb, r.quantity, r.commodity, r.location, r.total
                )
            }
            TradeOutcome::Rejected(reason) => reason.to_string(),
        }
    }
}

/// Read-only view of what a trader is carrying
pub trait CargoHold {
    fn held(&self, commodity: &str) -> u64;
}

impl<S: BuildHasher> CargoHold for HashMap<String, u64, S> {
    fn held(&self, commodity: &str) -> u64 {
        self.get(commodity).copied().unwrap_or(0)
    }
}

impl CargoHold for BTreeMap<String, u64> {
    fn held(&self, commodity: &str) -> u64 {
        self.get(commodity).copied().unwrap_or(0)
    }
}

impl Economy {
    /// Buy `quantity` units at `location`.
    ///
    /// Business refusals come back as [`TradeOutcome::Rejected`]; only a
    /// commodity missing from the catalog is an error.
    pub fn buy(
        &mut self,
        location: &str,
        commodity: &str,
        quantity: u64,
        available_credits: f64,
    ) -> Result<TradeOutcome, EconomyError> {
        let base_price = self.catalog.require(commodity)?.base_price;
        let Some(record) = self.markets.get_mut(location) else {
            return Ok(reject_unknown(location));
        };
        record.normalize(&self.catalog, &self.config.pricing);

        let Some(state) = record.get_mut(commodity) else {
            return Err(EconomyError::UnknownCommodity(commodity.to_string()));
        };

        if quantity == 0 {
            return Ok(TradeOutcome::Rejected(TradeRejection::ZeroQuantity));
        }
        if state.supply == 0 {
            return Ok(TradeOutcome::Rejected(TradeRejection::OutOfStock));
        }
        if quantity > state.supply {
            return Ok(TradeOutcome::Rejected(TradeRejection::InsufficientSupply {
                requested: quantity,
                available: state.supply,
            }));
        }

        let unit_price = state.price;
        let total = quantity as f64 * unit_price;
        if available_credits.is_nan() || total > available_credits {
            return Ok(TradeOutcome::Rejected(TradeRejection::InsufficientCredits {
                required: total,
                available: available_credits,
            }));
        }

        let nudge = demand_nudge(quantity, self.config.trade.demand_nudge);
        state.supply -= quantity;
        state.demand = state.demand.saturating_add(nudge);
        state.reprice(&self.config.pricing, base_price);

        debug!(
            "BUY {} x{} at {} @ {:.2} -> supply {}, demand {}, price {:.2}",
            commodity, quantity, location, unit_price, state.supply, state.demand, state.price
        );

        Ok(TradeOutcome::Filled(TradeReceipt {
            side: Side::Buy,
            location: location.to_string(),
            commodity: commodity.to_string(),
            quantity,
            unit_price,
            total,
        }))
    }

    /// Sell `quantity` units at `location` out of `cargo`.
    ///
    /// The seller is credited at the price quoted before the sale; the
    /// receipt's `total` is that amount.
    pub fn sell<H: CargoHold + ?Sized>(
        &mut self,
        location: &str,
        commodity: &str,
        quantity: u64,
        cargo: &H,
    ) -> Result<TradeOutcome, EconomyError> {
        let base_price = self.catalog.require(commodity)?.base_price;
        let Some(record) = self.markets.get_mut(location) else {
            return Ok(reject_unknown(location));
        };
        record.normalize(&self.catalog, &self.config.pricing);

        let Some(state) = record.get_mut(commodity) else {
            return Err(EconomyError::UnknownCommodity(commodity.to_string()));
        };

        if quantity == 0 {
            return Ok(TradeOutcome::Rejected(TradeRejection::ZeroQuantity));
        }
        let held = cargo.held(commodity);
        if held < quantity {
            return Ok(TradeOutcome::Rejected(TradeRejection::InsufficientCargo {
                requested: quantity,
                held,
            }));
        }
        if state.demand == 0 {
            return Ok(TradeOutcome::Rejected(TradeRejection::NoDemand));
        }

        let unit_price = state.price;
        let total = quantity as f64 * unit_price;

        let nudge = demand_nudge(quantity, self.config.trade.demand_nudge);
        state.supply = state.supply.saturating_add(quantity);
        state.demand = state.demand.saturating_sub(nudge);
        state.reprice(&self.config.pricing, base_price);

        debug!(
            "SELL {} x{} at {} @ {:.2} -> supply {}, demand {}, price {:.2}",
            commodity, quantity, location, unit_price, state.supply, state.demand, state.price
        );

        Ok(TradeOutcome::Filled(TradeReceipt {
            side: Side::Sell,
            location: location.to_string(),
            commodity: commodity.to_string(),
            quantity,
            unit_price,
            total,
        }))
    }
}

fn reject_unknown(location: &str) -> TradeOutcome {
    debug!("Trade at unknown market {}", location);
    TradeOutcome::Rejected(TradeRejection::UnknownLocation {
        location: location.to_string(),
    })
}

fn demand_nudge(quantity: u64, fraction: f64) -> u64 {
    (quantity as f64 * fraction).floor() as u64
}
