//! Hard failures of the economy core
//!
//! Business outcomes (unknown market, not enough credits, no demand) are
//! never errors; they come back as [`TradeOutcome`](crate::engine::TradeOutcome)
//! values. The variants here signal a mismatch between the caller and the
//! catalog, or state that cannot be interpreted at all.

use thiserror::Error;

/// Errors raised by catalog construction, engine calls and state restore
#[derive(Debug, Error)]
pub enum EconomyError {
    /// Commodity id is not part of the catalog the engine was built with
    #[error("unknown commodity '{0}' (not in catalog)")]
    UnknownCommodity(String),

    /// Catalog was built with no commodities
    #[error("commodity catalog is empty")]
    EmptyCatalog,

    /// Catalog entry rejected at construction
    #[error("invalid commodity '{id}': {reason}")]
    InvalidCommodity {
        /// Offending commodity id
        id: String,
        /// Why it was rejected
        reason: String,
    },

    /// Persisted state whose top-level shape cannot be read
    #[error("malformed economy state: {0}")]
    MalformedState(String),

    /// JSON encoding failure while producing a snapshot
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_commodity_display() {
        let err = EconomyError::UnknownCommodity("Moonshine".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Moonshine"));
        assert!(msg.contains("not in catalog"));
    }

    #[test]
    fn test_invalid_commodity_display() {
        let err = EconomyError::InvalidCommodity {
            id: "Dust".to_string(),
            reason: "base price must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid commodity 'Dust': base price must be positive"
        );
    }

    #[test]
    fn test_serialization_error_from_serde() {
        let serde_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: EconomyError = serde_err.into();

        match err {
            EconomyError::Serialization(_) => {}
            _ => panic!("Expected Serialization variant"),
        }
    }
}
