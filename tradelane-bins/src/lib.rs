//! Shared pieces of the tradelane binaries

pub mod common;
pub mod trader;
