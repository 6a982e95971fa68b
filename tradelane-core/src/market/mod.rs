//! Market state
//!
//! - `record`: per-location state, total over the catalog
//! - `profile`: how a location's kind, population and resources shape it
//! - `store`: the keyed collection of records
//! - `lenient`: field readers for state reconstructed from storage

pub mod lenient;
pub mod profile;
pub mod record;
pub mod store;

pub use profile::{baseline, Baseline};
pub use record::{CommodityState, MarketRecord};
pub use store::MarketStore;
