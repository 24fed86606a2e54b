//! Size labels and the per-size stock break-down.
//!
//! Catalog data carries sizes as either strings (`"S"`, `"M"`) or numbers
//! (`38`, `40`). [`SizeLabel`] normalizes both to one key type, and
//! [`SizeStockMap`] tracks an optional per-size stock view that folds back
//! into a single total per product.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A size label, normalized to its string form.
///
/// Numeric labels keep numeric equality semantics through
/// [`SizeLabel::as_number`]: a filter for size `38` matches a product whose
/// size list carries `"38"`.
///
/// # Examples
///
/// ```
/// use storefront_core::sizes::SizeLabel;
///
/// let numeric = SizeLabel::from(38_u32);
/// let text = SizeLabel::from("38");
/// assert_eq!(numeric, text);
/// assert_eq!(text.as_number(), Some(38));
/// assert_eq!(SizeLabel::from("M").as_number(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SizeLabel(String);

impl SizeLabel {
    /// Create a label from its string form.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value, if this label is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SizeLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SizeLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u32> for SizeLabel {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for SizeLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Persisted size lists mix strings and bare numbers.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u64),
            Text(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Self(n.to_string()),
            Repr::Text(s) => Self(s),
        })
    }
}

/// Per-size stock break-down, keyed by product id and then size label.
///
/// The map is an optional expanded view: a product only has an entry while
/// an editor has expanded it. Entries for multiple products may coexist.
/// The soft invariant is that the sum of a product's size stocks equals the
/// record's total stock; the fold direction is always sizes-to-total.
///
/// # Examples
///
/// ```
/// use storefront_core::ids::ProductId;
/// use storefront_core::sizes::{SizeLabel, SizeStockMap};
///
/// let id = ProductId::new("1");
/// let sizes = [SizeLabel::from("S"), SizeLabel::from("M"), SizeLabel::from("L")];
///
/// let mut map = SizeStockMap::default();
/// // 20 units over 3 sizes: floor split, remainder dropped.
/// let entry = map.expand_entry(&id, &sizes, 20);
/// assert!(entry.values().all(|&v| v == 6));
///
/// let total = map.set_size_stock(&id, SizeLabel::from("S"), 10);
/// assert_eq!(total, 22);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeStockMap {
    entries: HashMap<ProductId, HashMap<SizeLabel, u32>>,
}

impl SizeStockMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a product currently has an expanded entry.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.contains_key(id)
    }

    /// The tracked per-size stocks for a product, if expanded.
    #[must_use]
    pub fn entry(&self, id: &ProductId) -> Option<&HashMap<SizeLabel, u32>> {
        self.entries.get(id)
    }

    /// Expand a product into its per-size view, initializing on first use.
    ///
    /// On first expansion each known size starts at
    /// `total_stock / size_count` (floor division; the remainder is
    /// deliberately dropped). An
    /// existing entry is returned untouched, so explicit per-size edits are
    /// never overwritten by re-expansion.
    pub fn expand_entry(
        &mut self,
        id: &ProductId,
        sizes: &[SizeLabel],
        total_stock: u32,
    ) -> &HashMap<SizeLabel, u32> {
        self.entries.entry(id.clone()).or_insert_with(|| {
            let count = u32::try_from(sizes.len()).unwrap_or(u32::MAX);
            let per_size = if count == 0 { 0 } else { total_stock / count };
            sizes.iter().map(|s| (s.clone(), per_size)).collect()
        })
    }

    /// Set one size's stock and return the product's new total.
    ///
    /// The total is recomputed as the sum across all sizes currently tracked
    /// for the product, saturating at `u32::MAX`. Setting a size on a
    /// product with no entry creates one holding just that size.
    pub fn set_size_stock(&mut self, id: &ProductId, size: SizeLabel, value: u32) -> u32 {
        let entry = self.entries.entry(id.clone()).or_default();
        entry.insert(size, value);
        entry.values().fold(0_u32, |acc, v| acc.saturating_add(*v))
    }

    /// The current total for a product, if expanded.
    #[must_use]
    pub fn total(&self, id: &ProductId) -> Option<u32> {
        self.entries
            .get(id)
            .map(|entry| entry.values().fold(0_u32, |acc, v| acc.saturating_add(*v)))
    }

    /// Drop a product's expanded view. Totals already folded back into the
    /// inventory record are unaffected.
    pub fn collapse(&mut self, id: &ProductId) {
        self.entries.remove(id);
    }
}
