//! The stock-tracking view of a product.

use crate::ids::{ProductId, Sku};
use crate::sizes::SizeLabel;
use crate::status::StockStatus;
use serde::{Deserialize, Serialize};

/// Default low-stock threshold applied when a persisted record omits one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// The inventory record for a catalog product.
///
/// Shares its [`ProductId`] with the catalog-facing
/// [`Product`](crate::product::Product). `status` is derived from
/// `(stock, low_stock_threshold)` and never authoritative: the mutators
/// rederive it, and loaders call [`InventoryRecord::refresh_status`] so a
/// stale persisted value cannot survive a round trip.
///
/// Persisted JSON carries camelCase field names
/// (`lowStockThreshold`, ...) and tolerates partially-populated records:
/// a missing threshold defaults to [`DEFAULT_LOW_STOCK_THRESHOLD`], a
/// missing SKU is derived from the id, and missing lists default to empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Identifier shared with the catalog product.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Display brand.
    pub brand: String,

    /// Total units available.
    pub stock: u32,

    /// Stock at or below this (but above zero) classifies as low stock.
    #[serde(default = "default_threshold")]
    pub low_stock_threshold: u32,

    /// Derived tri-state status; recomputed, never trusted from storage.
    #[serde(default)]
    pub status: StockStatus,

    /// Stock-keeping unit; derived from the id when absent.
    #[serde(default)]
    pub sku: Option<Sku>,

    /// Ordered size labels, empty when the product is not sized.
    #[serde(default)]
    pub sizes: Vec<SizeLabel>,

    /// Image URLs; the first element is the primary thumbnail.
    #[serde(default)]
    pub images: Vec<String>,
}

const fn default_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl InventoryRecord {
    /// Create a record with a derived SKU and status.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, brand: impl Into<String>, stock: u32) -> Self {
        let sku = Sku::derive(&id);
        let mut record = Self {
            id,
            name: name.into(),
            brand: brand.into(),
            stock,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            status: StockStatus::InStock,
            sku: Some(sku),
            sizes: Vec::new(),
            images: Vec::new(),
        };
        record.refresh_status();
        record
    }

    /// Attach size labels.
    #[must_use]
    pub fn with_sizes(mut self, sizes: Vec<SizeLabel>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Attach image URLs.
    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Set the stock level and rederive the status.
    pub fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
        self.refresh_status();
    }

    /// Set the low-stock threshold and rederive the status.
    pub fn set_threshold(&mut self, threshold: u32) {
        self.low_stock_threshold = threshold;
        self.refresh_status();
    }

    /// Re-establish the status invariant from the current levels.
    ///
    /// Called by every mutator and after deserialization; also fills in a
    /// missing SKU so records loaded from older payloads are complete.
    pub fn refresh_status(&mut self) {
        self.status = StockStatus::for_levels(i64::from(self.stock), i64::from(self.low_stock_threshold));
        if self.sku.is_none() {
            self.sku = Some(Sku::derive(&self.id));
        }
    }

    /// The record's SKU, deriving it on the fly if still unset.
    #[must_use]
    pub fn sku(&self) -> Sku {
        self.sku.clone().unwrap_or_else(|| Sku::derive(&self.id))
    }

    /// The primary thumbnail URL, if any images exist.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_sku_and_status() {
        let record = InventoryRecord::new(ProductId::new("3"), "Scarf", "Northwind", 25);
        assert_eq!(record.sku().as_str(), "SKU-0003");
        assert_eq!(record.status, StockStatus::InStock);
    }

    #[test]
    fn set_stock_rederives_status() {
        let mut record = InventoryRecord::new(ProductId::new("1"), "Hat", "Acme", 25);
        record.set_stock(10);
        assert_eq!(record.status, StockStatus::LowStock);
        record.set_stock(0);
        assert_eq!(record.status, StockStatus::OutOfStock);
    }

    #[test]
    fn set_threshold_rederives_status() {
        let mut record = InventoryRecord::new(ProductId::new("1"), "Hat", "Acme", 12);
        assert_eq!(record.status, StockStatus::InStock);
        record.set_threshold(12);
        assert_eq!(record.status, StockStatus::LowStock);
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Panics: Test will fail if serde fails
    fn partial_record_deserializes_with_defaults() {
        let json = r#"{"id": "7", "name": "Belt", "brand": "Acme", "stock": 4}"#;
        let mut record: InventoryRecord = serde_json::from_str(json).unwrap();
        record.refresh_status();

        assert_eq!(record.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(record.status, StockStatus::LowStock);
        assert_eq!(record.sku().as_str(), "SKU-0007");
        assert!(record.sizes.is_empty());
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Panics: Test will fail if serde fails
    fn persisted_field_names_are_camel_case() {
        let record = InventoryRecord::new(ProductId::new("1"), "Hat", "Acme", 5);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("lowStockThreshold").is_some());
        assert_eq!(json["status"], "low-stock");
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Panics: Test will fail if serde fails
    fn stale_persisted_status_is_recomputed_on_refresh() {
        let json = r#"{"id": "1", "name": "Hat", "brand": "Acme", "stock": 0, "status": "in-stock"}"#;
        let mut record: InventoryRecord = serde_json::from_str(json).unwrap();
        record.refresh_status();
        assert_eq!(record.status, StockStatus::OutOfStock);
    }
}
