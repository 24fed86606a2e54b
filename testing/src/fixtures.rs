//! Deterministic catalog fixtures.
//!
//! The seeding path derives inventory from a product catalog; tests and the
//! demo need one that never changes between runs.

use storefront_core::ids::ProductId;
use storefront_core::inventory::InventoryRecord;
use storefront_core::price::Price;
use storefront_core::product::{MirrorDefaults, Product};
use storefront_core::sizes::SizeLabel;

/// A small fixed catalog: four products across two brands, two of them
/// sized, one with no images.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    let entries: [(&str, &str, &str, u64, &[&str]); 4] = [
        ("1", "Wool Hat", "Northwind", 40, &[]),
        ("2", "Leather Boot", "Northwind", 75, &["38", "40", "42"]),
        ("3", "Denim Jacket", "Atlas", 120, &["S", "M", "L"]),
        ("4", "Canvas Tote", "Atlas", 25, &[]),
    ];

    entries
        .into_iter()
        .map(|(id, name, brand, price, sizes)| {
            let record = InventoryRecord::new(ProductId::new(id), name, brand, 0)
                .with_sizes(sizes.iter().map(|s| SizeLabel::from(*s)).collect())
                .with_images(vec![format!("/images/{id}-main.jpg")]);
            let mut product = Product::mirror_from(&record, None, &MirrorDefaults::default());
            product.price = Price::from_major(price);
            product.description = format!("{name} by {brand}");
            product
        })
        .collect()
}

/// The ids of [`sample_catalog`], in catalog order.
#[must_use]
pub fn sample_ids() -> Vec<ProductId> {
    sample_catalog().into_iter().map(|p| p.id).collect()
}
