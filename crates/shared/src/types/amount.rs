//! Lenient monetary amount as delivered by the upstream report API.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! JSON numbers are parsed from their textual form straight into `Decimal`,
//! so `0.1` stays exactly `0.1`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// An amount read from an upstream payload.
///
/// Upstream rows are not trusted to carry well-formed numbers. Anything that
/// is not a finite number (missing, `null`, empty string, garbage) becomes
/// zero and is flagged as coerced so the caller can count malformed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    value: Decimal,
    coerced: bool,
}

impl Amount {
    /// Creates a well-formed amount.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self {
            value,
            coerced: false,
        }
    }

    /// A zero that stands in for a field the payload did not carry.
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            value: Decimal::ZERO,
            coerced: true,
        }
    }

    /// Returns the decimal value (zero when coerced).
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.value
    }

    /// Returns true if the source value was absent or not numeric.
    #[must_use]
    pub const fn is_coerced(self) -> bool {
        self.coerced
    }

    /// Interprets an arbitrary JSON value as an amount.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => parse_decimal(&n.to_string()).map_or_else(Self::missing, Self::new),
            Value::String(s) => parse_decimal(s).map_or_else(Self::missing, Self::new),
            Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => Self::missing(),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::new(Decimal::ZERO)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&self.value, serializer)
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
