//! Identifier types shared between the inventory and catalog views.
//!
//! This module defines strong types for product identification ([`ProductId`])
//! and stock-keeping units ([`Sku`]). Both views of an entity (the inventory
//! record and the catalog product) share one `ProductId`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for `ProductId` parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid product ID: {0}")]
pub struct ParseProductIdError(String);

/// Unique, stable identifier shared by a catalog product and its inventory
/// record.
///
/// # Design
///
/// `ProductId` is a newtype wrapper around `String` that provides:
/// - Type safety (can't accidentally use a regular string)
/// - Clear intent in function signatures
/// - Serialization support for storage
///
/// # Validation
///
/// - `FromStr::from_str()`: Validates input (rejects empty strings)
/// - `From::from()` and `new()`: No validation (for internal use with trusted input)
///
/// Use `FromStr` when parsing external/user input. Use `new()` or `From` when
/// constructing ids from application-controlled data.
///
/// # Examples
///
/// ```
/// use storefront_core::ids::ProductId;
///
/// let id = ProductId::new("7");
/// assert_eq!(id.as_str(), "7");
///
/// let parsed: ProductId = "hat-red".parse().unwrap();
/// assert_eq!(parsed, ProductId::new("hat-red"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new `ProductId` from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the `ProductId` into its inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ParseProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseProductIdError("Product ID cannot be empty".to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Stock-keeping unit for an inventory record.
///
/// A SKU is either carried in the persisted record or derived from the
/// product id when absent. Derivation is deterministic so repeated loads of
/// the same catalog produce the same SKUs.
///
/// # Examples
///
/// ```
/// use storefront_core::ids::{ProductId, Sku};
///
/// assert_eq!(Sku::derive(&ProductId::new("7")).as_str(), "SKU-0007");
/// assert_eq!(Sku::derive(&ProductId::new("hat-red")).as_str(), "SKU-HAT-RED");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Create a `Sku` from an already-formatted string.
    #[must_use]
    pub fn new(sku: impl Into<String>) -> Self {
        Self(sku.into())
    }

    /// Derive the canonical SKU for a product id.
    ///
    /// Numeric ids are zero-padded to four digits (`"7"` becomes
    /// `"SKU-0007"`); other ids are uppercased verbatim after the prefix.
    #[must_use]
    pub fn derive(id: &ProductId) -> Self {
        match id.as_str().parse::<u64>() {
            Ok(n) => Self(format!("SKU-{n:04}")),
            Err(_) => Self(format!("SKU-{}", id.as_str().to_uppercase())),
        }
    }

    /// Get the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Sku {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Sku {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod product_id_tests {
        use super::*;

        #[test]
        fn new_creates_product_id() {
            let id = ProductId::new("42");
            assert_eq!(id.as_str(), "42");
        }

        #[test]
        #[allow(clippy::expect_used)] // Panics: Test will fail if parse fails
        fn parse_from_str() {
            let id: ProductId = "scarf-blue".parse().expect("parse should succeed");
            assert_eq!(id, ProductId::new("scarf-blue"));
        }

        #[test]
        fn parse_empty_string_fails() {
            let result = "".parse::<ProductId>();
            assert!(result.is_err());
        }

        #[test]
        fn display() {
            let id = ProductId::new("42");
            assert_eq!(format!("{id}"), "42");
        }

        #[test]
        fn into_inner() {
            let id = ProductId::new("42");
            assert_eq!(id.into_inner(), "42");
        }
    }

    mod sku_tests {
        use super::*;

        #[test]
        fn derive_pads_numeric_ids() {
            assert_eq!(Sku::derive(&ProductId::new("1")).as_str(), "SKU-0001");
            assert_eq!(Sku::derive(&ProductId::new("12")).as_str(), "SKU-0012");
            assert_eq!(Sku::derive(&ProductId::new("12345")).as_str(), "SKU-12345");
        }

        #[test]
        fn derive_uppercases_text_ids() {
            assert_eq!(
                Sku::derive(&ProductId::new("hat-red")).as_str(),
                "SKU-HAT-RED"
            );
        }

        #[test]
        fn derivation_is_deterministic() {
            let id = ProductId::new("9");
            assert_eq!(Sku::derive(&id), Sku::derive(&id));
        }
    }
}
