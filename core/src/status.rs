//! Stock status derivation.
//!
//! The status of an inventory record is a pure function of its stock level
//! and low-stock threshold. It is recomputed after every mutation and on
//! every load; the persisted value is never trusted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state stock status derived from `(stock, threshold)`.
///
/// The derivation rule:
///
/// - `stock <= 0` is out of stock (negative values are treated as zero)
/// - `0 < stock <= threshold` is low stock (the boundary is inclusive on the
///   low side, so `stock == threshold` classifies as low)
/// - anything above the threshold is in stock
///
/// # Examples
///
/// ```
/// use storefront_core::status::StockStatus;
///
/// assert_eq!(StockStatus::for_levels(-3, 10), StockStatus::OutOfStock);
/// assert_eq!(StockStatus::for_levels(10, 10), StockStatus::LowStock);
/// assert_eq!(StockStatus::for_levels(25, 10), StockStatus::InStock);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    /// Stock is above the low-stock threshold.
    #[default]
    InStock,

    /// Stock is positive but at or below the threshold.
    LowStock,

    /// No units available (stock at or below zero).
    OutOfStock,
}

impl StockStatus {
    /// Derive the status for a stock level and threshold.
    ///
    /// Pure and total over all integer inputs; callers must re-apply it
    /// after any mutation of stock or threshold.
    #[must_use]
    pub const fn for_levels(stock: i64, threshold: i64) -> Self {
        if stock <= 0 {
            Self::OutOfStock
        } else if stock <= threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Check if any units can be sold.
    #[must_use]
    pub const fn is_available(self) -> bool {
        !matches!(self, Self::OutOfStock)
    }

    /// Check if the record is flagged for replenishment.
    #[must_use]
    pub const fn needs_restock(self) -> bool {
        matches!(self, Self::LowStock | Self::OutOfStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InStock => write!(f, "in-stock"),
            Self::LowStock => write!(f, "low-stock"),
            Self::OutOfStock => write!(f, "out-of-stock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_stock_is_out_of_stock() {
        assert_eq!(StockStatus::for_levels(0, 10), StockStatus::OutOfStock);
    }

    #[test]
    fn negative_stock_is_out_of_stock() {
        assert_eq!(StockStatus::for_levels(-1, 10), StockStatus::OutOfStock);
        assert_eq!(StockStatus::for_levels(i64::MIN, 0), StockStatus::OutOfStock);
    }

    #[test]
    fn boundary_is_inclusive_on_the_low_side() {
        assert_eq!(StockStatus::for_levels(10, 10), StockStatus::LowStock);
        assert_eq!(StockStatus::for_levels(11, 10), StockStatus::InStock);
    }

    #[test]
    fn stock_of_one_with_zero_threshold_is_in_stock() {
        assert_eq!(StockStatus::for_levels(1, 0), StockStatus::InStock);
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Panics: Test will fail if serde fails
    fn wire_names_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&StockStatus::OutOfStock).unwrap(),
            "\"out-of-stock\""
        );
        let parsed: StockStatus = serde_json::from_str("\"low-stock\"").unwrap();
        assert_eq!(parsed, StockStatus::LowStock);
    }

    proptest! {
        /// Status monotonicity: for every stock level and non-negative
        /// threshold, the derivation lands in exactly the region the rule
        /// dictates.
        #[test]
        fn status_matches_its_region(stock in i64::MIN..=i64::MAX, threshold in 0_i64..=i64::MAX) {
            let status = StockStatus::for_levels(stock, threshold);
            if stock <= 0 {
                prop_assert_eq!(status, StockStatus::OutOfStock);
            } else if stock <= threshold {
                prop_assert_eq!(status, StockStatus::LowStock);
            } else {
                prop_assert_eq!(status, StockStatus::InStock);
            }
        }

        #[test]
        fn available_iff_positive_stock(stock in i64::MIN..=i64::MAX, threshold in 0_i64..=i64::MAX) {
            let status = StockStatus::for_levels(stock, threshold);
            prop_assert_eq!(status.is_available(), stock > 0);
        }
    }
}
