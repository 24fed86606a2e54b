//! Admin back-office walk-through.
//!
//! Wires the file-backed store and the change hub, then plays the full
//! edit -> derive -> persist -> notify -> reload loop: seeding inventory
//! from the catalog, editing a stock level, splitting stock across sizes,
//! featuring a product, and filling a cart, while a "dashboard" subscriber
//! prints every change notice it observes.

use std::sync::Arc;
use storefront_core::bus::ChangePublisher;
use storefront_core::catalog::{self, CatalogFilter, PriceBracket, SortKey};
use storefront_core::environment::SystemClock;
use storefront_core::ids::ProductId;
use storefront_core::inventory::InventoryRecord;
use storefront_core::price::Price;
use storefront_core::product::{MirrorDefaults, Product};
use storefront_core::sizes::SizeLabel;
use storefront_jsonfile::JsonFileStore;
use storefront_runtime::{
    CartService, ChangeHub, InventoryStore, SeedPolicy, SiteContentService, SizeStockEditor,
};

/// The static fallback catalog a real deployment would ship as seed data.
fn demo_catalog() -> Vec<Product> {
    let entries: [(&str, &str, &str, u64, &[&str]); 3] = [
        ("1", "Wool Hat", "Northwind", 40, &[]),
        ("2", "Leather Boot", "Northwind", 75, &["38", "40", "42"]),
        ("3", "Denim Jacket", "Atlas", 120, &["S", "M", "L"]),
    ];

    entries
        .into_iter()
        .map(|(id, name, brand, price, sizes)| {
            let record = InventoryRecord::new(ProductId::new(id), name, brand, 0)
                .with_sizes(sizes.iter().map(|s| SizeLabel::from(*s)).collect());
            let mut product = Product::mirror_from(&record, None, &MirrorDefaults::default());
            product.price = Price::from_major(price);
            product
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Storefront Admin Simulation ===\n");

    let data_dir = tempfile::tempdir()?;
    let store = Arc::new(JsonFileStore::open(data_dir.path()).await?);
    let hub = Arc::new(ChangeHub::new());

    // Dashboard task: prints every notice as it arrives.
    let mut dashboard_rx = hub.subscribe();
    let dashboard = tokio::spawn(async move {
        while let Ok(notice) = dashboard_rx.recv().await {
            println!("  [dashboard] {notice}");
        }
    });

    let publisher: Arc<dyn ChangePublisher> = hub.clone();
    let inventory = InventoryStore::new(Arc::clone(&store), Arc::clone(&publisher), demo_catalog())
        .with_seed_policy(SeedPolicy::pinned(2024));

    println!("Seeding inventory from the catalog...");
    let records = inventory.load().await?;
    for record in &records {
        println!(
            "  {} {} ({}): {} units, {}",
            record.sku(),
            record.name,
            record.brand,
            record.stock,
            record.status
        );
    }

    println!("\nMarking the hat low on stock...");
    let hat = ProductId::new("1");
    let status = inventory.set_stock(&hat, 3).await?;
    println!("  new status: {status}");

    println!("\nSplitting the boot's stock per size...");
    let boot = ProductId::new("2");
    let mut editor = SizeStockEditor::new(inventory.clone());
    let split = editor.expand(&boot).await?;
    println!("  initial split: {split:?}");
    let total = editor
        .set_size_stock(&boot, SizeLabel::from("40"), Some(9))
        .await?;
    println!("  new total after editing size 40: {total}");

    println!("\nFeaturing the jacket on the homepage...");
    let content_service = SiteContentService::new(
        Arc::clone(&store),
        Arc::clone(&publisher),
        Arc::new(SystemClock),
    );
    let jacket = ProductId::new("3");
    content_service.set_featured(&jacket, true).await?;

    println!("\nCatalog view, 50-100 price bracket, featured first:");
    let products = inventory.load_products().await?;
    let filter = CatalogFilter::any().with_price(PriceBracket::parse("50-100")?);
    for product in catalog::apply(&products, &filter, SortKey::Featured) {
        println!("  {} - {} {}", product.name, product.price, product.currency);
    }

    println!("\nFilling a cart (same pair twice merges)...");
    let cart_service = CartService::new(Arc::clone(&store), Arc::clone(&publisher));
    cart_service
        .add(boot.clone(), Some(SizeLabel::from("40")), 1)
        .await?;
    let cart = cart_service
        .add(boot.clone(), Some(SizeLabel::from("40")), 1)
        .await?;
    println!(
        "  {} line(s), {} unit(s)",
        cart.lines().len(),
        cart.total_quantity()
    );

    // Give the dashboard a moment to drain, then shut it down.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    dashboard.abort();

    println!("\n=== Demo Complete ===");
    Ok(())
}
