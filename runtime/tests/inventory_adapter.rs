//! Integration tests for the inventory store adapter
//!
//! Exercises the load/seed/save/mirror cycle against the in-memory backend
//! and asserts on the notices the adapter publishes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use storefront_core::bus::ChangeTopic;
use storefront_core::ids::ProductId;
use storefront_core::inventory::InventoryRecord;
use storefront_core::product::Product;
use storefront_core::status::StockStatus;
use storefront_core::storage::{KeyValueStore, StorageKey};
use storefront_runtime::{InventoryStore, NewProduct, SeedPolicy, ServiceError};
use storefront_testing::{MemoryStore, RecordingBus, fixtures};

fn adapter(
    store: &Arc<MemoryStore>,
    bus: &Arc<RecordingBus>,
) -> InventoryStore<MemoryStore> {
    let publisher: Arc<dyn storefront_core::bus::ChangePublisher> = bus.clone();
    InventoryStore::new(Arc::clone(store), publisher, fixtures::sample_catalog())
        .with_seed_policy(SeedPolicy::pinned(42))
}

async fn stored_products(store: &MemoryStore) -> Vec<Product> {
    let bytes = store.get(StorageKey::Products).await.unwrap().unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn stored_inventory(store: &MemoryStore) -> Vec<InventoryRecord> {
    let bytes = store.get(StorageKey::Inventory).await.unwrap().unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Seeding
// ============================================================================

/// Loading an empty store seeds from the catalog and persists immediately,
/// so a second load observes the same ids and the same stocks.
#[tokio::test]
async fn test_seeding_is_stable_across_loads() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);

    let first = inventory.load().await.unwrap();
    let second = inventory.load().await.unwrap();

    assert_eq!(first, second);
    let ids: Vec<&str> = first.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_seeded_records_carry_derived_skus_and_threshold() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let records = adapter(&store, &bus).load().await.unwrap();

    for record in &records {
        assert_eq!(record.low_stock_threshold, 10);
        assert!(record.sku().as_str().starts_with("SKU-"));
        assert!(record.stock <= 49);
    }
}

#[tokio::test]
async fn test_corrupt_inventory_payload_fails_open_to_reseed() {
    let store = Arc::new(MemoryStore::with_payload(
        StorageKey::Inventory,
        b"{not json at all",
    ));
    let bus = Arc::new(RecordingBus::new());
    let records = adapter(&store, &bus).load().await.unwrap();

    assert_eq!(records.len(), fixtures::sample_catalog().len());
    // The reseed replaced the corrupt payload with a parsable one.
    assert!(serde_json::from_slice::<Vec<InventoryRecord>>(
        &store.payload(StorageKey::Inventory).unwrap()
    )
    .is_ok());
}

// ============================================================================
// Save and mirror
// ============================================================================

/// save(load()) with no intervening mutation leaves the persisted document
/// byte-for-byte identical.
#[tokio::test]
async fn test_save_of_unmodified_load_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);

    let records = inventory.load().await.unwrap();
    let before = store.payload(StorageKey::Inventory).unwrap();

    inventory.save(&records).await.unwrap();
    let after = store.payload(StorageKey::Inventory).unwrap();

    assert_eq!(before, after);
}

/// Every id in the saved inventory appears in the products mirror with
/// matching stock and status.
#[tokio::test]
async fn test_mirror_consistency_after_save() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);

    let mut records = inventory.load().await.unwrap();
    records[0].set_stock(3);
    records[1].set_stock(0);
    inventory.save(&records).await.unwrap();

    let products = stored_products(&store).await;
    for record in &records {
        let product = products
            .iter()
            .find(|p| p.id == record.id)
            .expect("every inventory id must have a product entry");
        assert_eq!(product.stock, record.stock);
        assert_eq!(product.status, record.status);
    }
}

#[tokio::test]
async fn test_mirror_preserves_catalog_prices() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);

    let records = inventory.load().await.unwrap();
    inventory.save(&records).await.unwrap();

    let products = stored_products(&store).await;
    let boot = products.iter().find(|p| p.id.as_str() == "2").unwrap();
    assert_eq!(boot.price.major(), 75);
}

#[tokio::test]
async fn test_save_publishes_inventory_then_products() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);

    let records = inventory.load().await.unwrap();
    bus.clear();

    inventory.save(&records).await.unwrap();
    assert_eq!(
        bus.topics(),
        vec![ChangeTopic::InventoryUpdated, ChangeTopic::ProductsUpdated]
    );
}

// ============================================================================
// Targeted mutations
// ============================================================================

#[tokio::test]
async fn test_set_stock_rederives_status_and_mirror() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);

    let records = inventory.load().await.unwrap();
    let id = records[0].id.clone();

    let status = inventory.set_stock(&id, 0).await.unwrap();
    assert_eq!(status, StockStatus::OutOfStock);

    let products = stored_products(&store).await;
    let mirrored = products.iter().find(|p| p.id == id).unwrap();
    assert_eq!(mirrored.status, StockStatus::OutOfStock);
    assert!(!mirrored.active);

    let status = inventory.set_stock(&id, 7).await.unwrap();
    assert_eq!(status, StockStatus::LowStock);
}

#[tokio::test]
async fn test_set_threshold_reclassifies_stock() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);

    let records = inventory.load().await.unwrap();
    let id = records[0].id.clone();
    inventory.set_stock(&id, 15).await.unwrap();

    let status = inventory.set_threshold(&id, 15).await.unwrap();
    assert_eq!(status, StockStatus::LowStock);
}

#[tokio::test]
async fn test_unknown_id_is_rejected_without_write_or_notice() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);

    inventory.load().await.unwrap();
    let before = store.payload(StorageKey::Inventory).unwrap();
    bus.clear();

    let result = inventory.set_stock(&ProductId::new("ghost"), 5).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert_eq!(store.payload(StorageKey::Inventory).unwrap(), before);
    assert!(bus.topics().is_empty());
}

// ============================================================================
// Create / update / delete
// ============================================================================

#[tokio::test]
async fn test_create_product_lands_in_both_documents() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);
    inventory.load().await.unwrap();

    let id = inventory
        .create_product(NewProduct {
            name: "Rain Poncho".into(),
            brand: "Atlas".into(),
            initial_stock: 12,
            ..NewProduct::default()
        })
        .await
        .unwrap();

    assert_eq!(id.as_str(), "5");
    assert!(stored_inventory(&store).await.iter().any(|r| r.id == id));
    assert!(stored_products(&store).await.iter().any(|p| p.id == id));
}

#[tokio::test]
async fn test_create_product_rejects_blank_names() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);
    inventory.load().await.unwrap();
    bus.clear();

    let result = inventory
        .create_product(NewProduct {
            name: "   ".into(),
            brand: "Atlas".into(),
            ..NewProduct::default()
        })
        .await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
    assert!(bus.topics().is_empty());
}

#[tokio::test]
async fn test_delete_product_removes_from_both_documents() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);
    let records = inventory.load().await.unwrap();
    let id = records[0].id.clone();

    inventory.delete_product(&id).await.unwrap();

    assert!(!stored_inventory(&store).await.iter().any(|r| r.id == id));
    assert!(!stored_products(&store).await.iter().any(|p| p.id == id));
}

#[tokio::test]
async fn test_update_product_syncs_shared_fields_into_inventory() {
    let store = Arc::new(MemoryStore::new());
    let bus = Arc::new(RecordingBus::new());
    let inventory = adapter(&store, &bus);
    inventory.load().await.unwrap();

    let mut products = stored_products(&store).await;
    let mut edited = products.remove(0);
    edited.name = "Wool Hat (Winter)".into();
    edited.description = "New copy".into();
    let id = edited.id.clone();

    inventory.update_product(edited).await.unwrap();

    let record = inventory.get(&id).await.unwrap();
    assert_eq!(record.name, "Wool Hat (Winter)");

    let product = stored_products(&store)
        .await
        .into_iter()
        .find(|p| p.id == id)
        .unwrap();
    assert_eq!(product.description, "New copy");
}
