//! The catalog-facing view of a product and the inventory mirror rules.
//!
//! `products` and `inventory` are two persisted views of the same entities.
//! There is no single writer: every component that mutates one list must
//! mirror the change into the other. The mirror derivation here is the one
//! place that rule is implemented.

use crate::ids::{ProductId, Sku};
use crate::inventory::InventoryRecord;
use crate::price::Price;
use crate::sizes::SizeLabel;
use crate::status::StockStatus;
use serde::{Deserialize, Serialize};

/// Storefront section a product is shown in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayLocation {
    /// Homepage grid.
    Homepage,

    /// Top banner slot.
    Banner,

    /// Rotating highlight carousel.
    Highlight,

    /// Catalog pages only.
    #[default]
    Catalog,
}

/// Catalog-facing product record.
///
/// A superset of the fields on [`InventoryRecord`]: the shared fields
/// (`id`, `name`, `brand`, `stock`, `status`, `sku`, `sizes`, `images`) are
/// owned by the inventory side and copied in on every mirror pass; the
/// catalog-only fields (`price`, `currency`, display flags, ...) are owned
/// here and preserved across mirror passes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier shared with the inventory record.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Display brand.
    pub brand: String,

    /// Unit price in the store currency.
    #[serde(default)]
    pub price: Price,

    /// ISO currency code; defaults from the store settings.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Available colors, empty when not applicable.
    #[serde(default)]
    pub colors: Vec<String>,

    /// Marketing description.
    #[serde(default)]
    pub description: String,

    /// Total units available, mirrored from inventory.
    #[serde(default)]
    pub stock: u32,

    /// Derived status, mirrored from inventory.
    #[serde(default)]
    pub status: StockStatus,

    /// Stock-keeping unit, mirrored from inventory.
    #[serde(default)]
    pub sku: Option<Sku>,

    /// Ordered size labels.
    #[serde(default)]
    pub sizes: Vec<SizeLabel>,

    /// Image URLs; first element is the primary thumbnail.
    #[serde(default)]
    pub images: Vec<String>,

    /// Featured on the homepage.
    #[serde(default)]
    pub featured: bool,

    /// Currently discounted.
    #[serde(default)]
    pub on_sale: bool,

    /// Discount percentage when on sale.
    #[serde(default, rename = "discount")]
    pub discount_percent: u8,

    /// Storefront section this product is shown in.
    #[serde(default)]
    pub display_location: DisplayLocation,

    /// Visible in the storefront at all; recomputed on every mirror pass.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_currency() -> String {
    "USD".to_string()
}

const fn default_active() -> bool {
    true
}

/// Catalog-side defaults applied when mirroring a record that has no
/// existing product entry.
///
/// Stated once here rather than re-implemented at each write site; the
/// currency default comes from the store settings of the running system.
#[derive(Clone, Debug)]
pub struct MirrorDefaults {
    /// Currency applied to newly mirrored products.
    pub currency: String,
}

impl Default for MirrorDefaults {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

impl MirrorDefaults {
    /// Defaults using a specific currency (usually the store setting).
    #[must_use]
    pub fn with_currency(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }
}

impl Product {
    /// Mirror an inventory record into the catalog view.
    ///
    /// Shared fields always come from the record. Catalog-only fields are
    /// preserved from `existing` when present, otherwise defaulted. `active`
    /// is recomputed on every pass: exhausted products are hidden.
    #[must_use]
    pub fn mirror_from(
        record: &InventoryRecord,
        existing: Option<&Self>,
        defaults: &MirrorDefaults,
    ) -> Self {
        let mut product = existing.cloned().unwrap_or_else(|| Self {
            id: record.id.clone(),
            name: String::new(),
            brand: String::new(),
            price: Price::ZERO,
            currency: defaults.currency.clone(),
            colors: Vec::new(),
            description: String::new(),
            stock: 0,
            status: StockStatus::InStock,
            sku: None,
            sizes: Vec::new(),
            images: Vec::new(),
            featured: false,
            on_sale: false,
            discount_percent: 0,
            display_location: DisplayLocation::default(),
            active: true,
        });

        product.id = record.id.clone();
        product.name = record.name.clone();
        product.brand = record.brand.clone();
        product.stock = record.stock;
        product.status = record.status;
        product.sku = Some(record.sku());
        product.sizes = record.sizes.clone();
        product.images = record.images.clone();
        product.active = record.status.is_available();
        product
    }

    /// The primary thumbnail URL, if any images exist.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
