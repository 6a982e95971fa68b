//! Forgiving field readers for market state coming back from storage
//!
//! Saved games are plain JSON and may have been edited, truncated or written
//! by an older build. Counts accept any number (or a numeric string) and
//! clamp to zero; shocks accept the same and fall back to 1.0.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberInput {
    Number(f64),
    String(String),
    Other(serde::de::IgnoredAny),
}

fn read_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberInput::deserialize(deserializer)? {
        NumberInput::Number(n) => Some(n),
        NumberInput::String(raw) => raw.trim().parse::<f64>().ok(),
        NumberInput::Other(_) => None,
    };
    Ok(value.filter(|n| n.is_finite()))
}

/// Non-negative unit count; negatives and garbage become 0
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(read_number(deserializer)?
        .map(|n| if n > 0.0 { n.round() as u64 } else { 0 })
        .unwrap_or(0))
}

/// Price shock; anything unreadable becomes the neutral 1.0.
/// Range clamping happens in record normalization.
pub fn shock<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(read_number(deserializer)?.unwrap_or(1.0))
}

/// Cached price; unreadable values become 0.0 and get recomputed
pub fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(read_number(deserializer)?.unwrap_or(0.0))
}

/// A [`count`] standing on its own, e.g. as a map value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Count(#[serde(deserialize_with = "count")] pub u64);

/// A [`shock`] standing on its own
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Shock(#[serde(deserialize_with = "shock")] pub f64);

/// A [`price`] standing on its own
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Price(#[serde(deserialize_with = "price")] pub f64);
