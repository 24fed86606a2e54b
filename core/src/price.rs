//! Price type in integer minor units.
//!
//! Prices are held as integer cents internally so filter brackets and sort
//! comparisons stay exact, while the persisted JSON keeps the catalog's
//! major-unit number form (`249.99`).

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog price in minor units (cents).
///
/// # Design
///
/// `Price` is a newtype wrapper around `u64` cents, so equality and ordering
/// are exact. Persisted JSON carries prices as major-unit numbers (the shape
/// produced by the catalog documents), and serde conversion happens at the
/// boundary.
///
/// # Examples
///
/// ```
/// use storefront_core::price::Price;
///
/// let price = Price::from_major(75);
/// assert_eq!(price.cents(), 7500);
/// assert!(price < Price::from_major(100));
/// assert_eq!(format!("{price}"), "75.00");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    /// A zero price (the default for newly mirrored products).
    pub const ZERO: Self = Self(0);

    /// Create a `Price` from minor units.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Create a `Price` from whole major units.
    #[must_use]
    pub const fn from_major(major: u64) -> Self {
        Self(major * 100)
    }

    /// The price in minor units.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// The price in major units, truncating any cent remainder.
    #[must_use]
    pub const fn major(self) -> u64 {
        self.0 / 100
    }

    /// Check if this price is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Persisted shape is a major-unit number. Cent values stay exact up
        // to 2^52 cents, far beyond any catalog price.
        #[allow(clippy::cast_precision_loss)]
        let major = self.0 as f64 / 100.0;
        serializer.serialize_f64(major)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let major = f64::deserialize(deserializer)?;
        if !major.is_finite() || major < 0.0 {
            return Err(de::Error::custom(format!("invalid price: {major}")));
        }
        // Round rather than truncate so 19.99 survives the f64 round trip.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cents = (major * 100.0).round() as u64;
        Ok(Self(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_and_cents_accessors() {
        let price = Price::from_cents(1999);
        assert_eq!(price.major(), 19);
        assert_eq!(price.cents(), 1999);
    }

    #[test]
    fn display_pads_cents() {
        assert_eq!(format!("{}", Price::from_cents(1905)), "19.05");
        assert_eq!(format!("{}", Price::from_major(40)), "40.00");
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Panics: Test will fail if serde fails
    fn serializes_as_major_unit_number() {
        let json = serde_json::to_string(&Price::from_cents(1999)).unwrap();
        assert_eq!(json, "19.99");

        let back: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(back, Price::from_cents(1999));
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Panics: Test will fail if serde fails
    fn deserializes_whole_numbers() {
        let price: Price = serde_json::from_str("75").unwrap();
        assert_eq!(price, Price::from_major(75));
    }

    #[test]
    fn rejects_negative_prices() {
        let result = serde_json::from_str::<Price>("-5");
        assert!(result.is_err());
    }

    #[test]
    fn ordering_is_exact() {
        assert!(Price::from_cents(4000) < Price::from_cents(4001));
    }
}
