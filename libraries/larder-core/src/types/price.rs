/// Fixed-point price value object
use crate::error::{CoreError, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum representable amount: five significant digits, two of them
/// fractional (999.99).
const MAX_CENTS: i64 = 99_999;

/// A non-negative currency amount held as a count of cents.
///
/// Serialized as a decimal string (`"12.50"`) so clients never see the
/// internal representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Parse a decimal string such as `"12"`, `"12.5"`, or `"12.50"`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` for negative amounts, non-numeric
    /// input, more than two fraction digits, or amounts above 999.99.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let raw = raw.as_ref().trim();
        let invalid = || CoreError::invalid_input(format!("not a price: {raw}"));

        let (whole, frac) = match raw.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (raw, ""),
        };

        if whole.is_empty() || whole.len() > 3 || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let cents = whole * 100 + frac_cents;
        if cents > MAX_CENTS {
            return Err(invalid());
        }

        Ok(Self(cents))
    }

    /// Reconstruct a price from a stored cent count.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in cents
    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
