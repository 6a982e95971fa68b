//! Domain types shared by every engine component
//!
//! - `CommodityCatalog`: immutable list of tradable goods and base prices
//! - `LocationDescriptor`: what the navigation layer reports about a system
//! - `EconomyError`: hard failures (catalog mismatch, unreadable state)

pub mod catalog;
pub mod errors;
pub mod location;

// Re-export commonly used types
pub use catalog::{Commodity, CommodityCatalog, CommodityCategory};
pub use errors::EconomyError;
pub use location::{LocationDescriptor, LocationKind, ResourceRating};
