use rust_decimal::Decimal;
use std::{fmt::Display, str::FromStr};

/// An exact monetary amount.
///
/// Prices are compared with decimal semantics, so `150` and `150.00` are the
/// same price. When the `serde` feature is enabled a price serializes as a
/// string and deserializes from either a string or a JSON number.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(pub Decimal);

impl Price {
    /// The zero price, used as the floor of a listing with no starting price
    pub const ZERO: Self = Self(Decimal::ZERO);
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Price {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(s.trim())?))
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Price {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Price".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": ["string", "number"],
            "format": "decimal",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_does_not_affect_equality() {
        let a: Price = "150".parse().unwrap();
        let b: Price = "150.00".parse().unwrap();
        assert_eq!(a, b);
        assert!(!(a < b) && !(a > b));
    }

    #[test]
    fn deserializes_from_number_or_string() {
        let from_number: Price = serde_json::from_str("100.5").unwrap();
        let from_string: Price = serde_json::from_str("\"100.5\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"100.5\"");
    }
}
