//! The inventory store adapter.
//!
//! Owns the `inventory` document and the invariant that every write to it
//! is mirrored into the `products` document before anyone is notified.
//! The reverse direction (admin edits to a product) flows through
//! [`InventoryStore::update_product`], which syncs the shared fields back
//! into the inventory record, so neither view can drift no matter which
//! side a writer starts from.
//!
//! # Failure semantics
//!
//! Absent or unparsable persisted payloads are treated as absent data: the
//! adapter reseeds from the fallback catalog and persists the result
//! immediately, so the next load observes a stable document. Only genuine
//! storage transport failures surface as errors.

use crate::error::{Result, ServiceError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use storefront_core::bus::{ChangeNotice, ChangePublisher, ChangeTopic};
use storefront_core::ids::ProductId;
use storefront_core::inventory::{DEFAULT_LOW_STOCK_THRESHOLD, InventoryRecord};
use storefront_core::price::Price;
use storefront_core::product::{DisplayLocation, MirrorDefaults, Product};
use storefront_core::sizes::SizeLabel;
use storefront_core::status::StockStatus;
use storefront_core::storage::{KeyValueStore, StorageKey};

/// How initial stock levels are assigned when seeding from the catalog.
#[derive(Clone, Debug)]
pub struct SeedPolicy {
    /// Fixed RNG seed; `None` draws from entropy. Tests pin this so the
    /// seeded stocks are reproducible across runs.
    pub rng_seed: Option<u64>,

    /// Upper bound (inclusive) for the pseudo-random initial stock.
    pub max_initial_stock: u32,

    /// Threshold assigned to every seeded record.
    pub threshold: u32,
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            rng_seed: None,
            max_initial_stock: 49,
            threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl SeedPolicy {
    /// A policy with a pinned RNG seed for deterministic tests.
    #[must_use]
    pub const fn pinned(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            max_initial_stock: 49,
            threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

/// Input for the admin "create product" action.
///
/// The id is assigned by the store (next numeric id across both documents);
/// everything else comes from the form.
#[derive(Clone, Debug, Default)]
pub struct NewProduct {
    /// Display name (required).
    pub name: String,

    /// Display brand (required).
    pub brand: String,

    /// Unit price.
    pub price: Price,

    /// Marketing description.
    pub description: String,

    /// Size labels, empty for unsized products.
    pub sizes: Vec<SizeLabel>,

    /// Image URLs.
    pub images: Vec<String>,

    /// Units on hand at creation.
    pub initial_stock: u32,

    /// Storefront section.
    pub display_location: DisplayLocation,
}

/// The inventory store adapter.
///
/// Generic over the key-value backend; the change bus is held as a trait
/// object so production and tests wire different implementations through
/// the same code path.
pub struct InventoryStore<S> {
    store: Arc<S>,
    bus: Arc<dyn ChangePublisher>,
    catalog: Vec<Product>,
    seed: SeedPolicy,
    defaults: MirrorDefaults,
}

impl<S> Clone for InventoryStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            bus: Arc::clone(&self.bus),
            catalog: self.catalog.clone(),
            seed: self.seed.clone(),
            defaults: self.defaults.clone(),
        }
    }
}

impl<S: KeyValueStore> InventoryStore<S> {
    /// Create an adapter over a backend, a change bus, and the fallback
    /// catalog used for seeding.
    #[must_use]
    pub fn new(store: Arc<S>, bus: Arc<dyn ChangePublisher>, catalog: Vec<Product>) -> Self {
        Self {
            store,
            bus,
            catalog,
            seed: SeedPolicy::default(),
            defaults: MirrorDefaults::default(),
        }
    }

    /// Override the seeding policy.
    #[must_use]
    pub fn with_seed_policy(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    /// Override the catalog-side mirror defaults (usually to carry the
    /// store settings currency).
    #[must_use]
    pub fn with_mirror_defaults(mut self, defaults: MirrorDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Load the inventory list.
    ///
    /// Absent or unparsable payloads trigger the seeding path, which
    /// persists immediately so a second load observes the same ids and
    /// stocks. Statuses are rederived on every load; the persisted value
    /// is never trusted.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] only if the backend itself fails.
    #[tracing::instrument(skip(self), name = "inventory_load")]
    pub async fn load(&self) -> Result<Vec<InventoryRecord>> {
        metrics::counter!("inventory.load").increment(1);

        if let Some(bytes) = self.store.get(StorageKey::Inventory).await? {
            match serde_json::from_slice::<Vec<InventoryRecord>>(&bytes) {
                Ok(mut records) => {
                    for record in &mut records {
                        record.refresh_status();
                    }
                    return Ok(records);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "unparsable inventory payload, reseeding");
                }
            }
        }

        self.reseed().await
    }

    /// Load the mirrored catalog product list.
    ///
    /// Falls back to the static catalog when the document is absent or
    /// unparsable, matching the storefront's seeding behavior.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] only if the backend itself fails.
    pub async fn load_products(&self) -> Result<Vec<Product>> {
        if let Some(bytes) = self.store.get(StorageKey::Products).await? {
            match serde_json::from_slice::<Vec<Product>>(&bytes) {
                Ok(products) => return Ok(products),
                Err(err) => {
                    tracing::warn!(error = %err, "unparsable products payload, using catalog fallback");
                }
            }
        }
        Ok(self.catalog.clone())
    }

    /// Look up a single record.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no record carries the id.
    pub async fn get(&self, id: &ProductId) -> Result<InventoryRecord> {
        self.load()
            .await?
            .into_iter()
            .find(|r| r.id == *id)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }

    /// Persist the full inventory list and its product mirror.
    ///
    /// Serializes the list to the `inventory` document, re-derives the
    /// `products` document from it (preserving catalog-only fields of
    /// existing entries), persists both, then publishes `inventoryUpdated`
    /// followed by `productsUpdated`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if either write fails; a failed
    /// write publishes nothing.
    #[tracing::instrument(skip_all, name = "inventory_save", fields(records = records.len()))]
    pub async fn save(&self, records: &[InventoryRecord]) -> Result<()> {
        let baseline = self.load_products().await?;
        self.persist(records, &baseline, "save").await
    }

    /// Set one record's stock level and persist.
    ///
    /// Returns the rederived status.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown id; nothing is
    /// written and nothing is published in that case.
    pub async fn set_stock(&self, id: &ProductId, stock: u32) -> Result<StockStatus> {
        self.mutate_record(id, |record| record.set_stock(stock)).await
    }

    /// Set one record's low-stock threshold and persist.
    ///
    /// Returns the rederived status.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown id; nothing is
    /// written and nothing is published in that case.
    pub async fn set_threshold(&self, id: &ProductId, threshold: u32) -> Result<StockStatus> {
        self.mutate_record(id, |record| record.set_threshold(threshold))
            .await
    }

    /// Create a product in both documents.
    ///
    /// Returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] when the name or brand is
    /// blank; the mutation is rejected and no write occurs.
    pub async fn create_product(&self, input: NewProduct) -> Result<ProductId> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::Validation("product name is required".into()));
        }
        if input.brand.trim().is_empty() {
            return Err(ServiceError::Validation("product brand is required".into()));
        }

        let mut records = self.load().await?;
        let mut products = self.load_products().await?;
        let id = next_numeric_id(&records, &products);

        let record = InventoryRecord::new(id.clone(), input.name, input.brand, input.initial_stock)
            .with_sizes(input.sizes)
            .with_images(input.images);

        let mut product = Product::mirror_from(&record, None, &self.defaults);
        product.price = input.price;
        product.description = input.description;
        product.display_location = input.display_location;

        records.push(record);
        products.push(product);

        tracing::info!(id = %id, "created product");
        self.persist(&records, &products, "create").await?;
        Ok(id)
    }

    /// Delete a product from both documents.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no record carries the id.
    pub async fn delete_product(&self, id: &ProductId) -> Result<()> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != *id);
        if records.len() == before {
            return Err(ServiceError::NotFound(id.clone()));
        }

        let mut products = self.load_products().await?;
        products.retain(|p| p.id != *id);

        tracing::info!(id = %id, "deleted product");
        self.persist(&records, &products, "delete").await
    }

    /// Apply an admin edit to a catalog product.
    ///
    /// The catalog-only fields are taken from `product` as-is; the shared
    /// fields (name, brand, sizes, images) are synced back into the
    /// inventory record, and stock/threshold stay owned by the inventory
    /// side. Persists both documents and notifies.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no record carries the id.
    pub async fn update_product(&self, product: Product) -> Result<()> {
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == product.id)
            .ok_or_else(|| ServiceError::NotFound(product.id.clone()))?;

        record.name = product.name.clone();
        record.brand = product.brand.clone();
        record.sizes = product.sizes.clone();
        record.images = product.images.clone();
        record.refresh_status();

        let mut products = self.load_products().await?;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }

        self.persist(&records, &products, "edit").await
    }

    async fn mutate_record(
        &self,
        id: &ProductId,
        apply: impl FnOnce(&mut InventoryRecord),
    ) -> Result<StockStatus> {
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))?;

        apply(record);
        let status = record.status;

        let baseline = self.load_products().await?;
        self.persist(&records, &baseline, "stock-edit").await?;
        Ok(status)
    }

    /// Derive, persist, and announce a fresh inventory from the catalog.
    async fn reseed(&self) -> Result<Vec<InventoryRecord>> {
        metrics::counter!("inventory.reseed").increment(1);

        let mut rng = match self.seed.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let records: Vec<InventoryRecord> = self
            .catalog
            .iter()
            .map(|product| {
                let stock = rng.gen_range(0..=self.seed.max_initial_stock);
                let mut record = InventoryRecord::new(
                    product.id.clone(),
                    product.name.clone(),
                    product.brand.clone(),
                    stock,
                )
                .with_sizes(product.sizes.clone())
                .with_images(product.images.clone());
                record.set_threshold(self.seed.threshold);
                record
            })
            .collect();

        tracing::info!(records = records.len(), "seeded inventory from catalog");
        let baseline = self.load_products().await?;
        self.persist(&records, &baseline, "seed").await?;
        Ok(records)
    }

    /// Write both documents, then notify. The mirror preserves catalog-only
    /// fields of entries already present in the baseline and keeps baseline
    /// entries that have no inventory record (callers that intend removal
    /// pass a filtered baseline).
    async fn persist(
        &self,
        records: &[InventoryRecord],
        products_baseline: &[Product],
        detail: &str,
    ) -> Result<()> {
        let inventory_payload =
            serde_json::to_vec(records).map_err(|e| ServiceError::serialization(&e))?;
        self.store
            .set(StorageKey::Inventory, &inventory_payload)
            .await?;

        let mut products = products_baseline.to_vec();
        for record in records {
            match products.iter_mut().find(|p| p.id == record.id) {
                Some(existing) => *existing = Product::mirror_from(record, Some(existing), &self.defaults),
                None => products.push(Product::mirror_from(record, None, &self.defaults)),
            }
        }

        let products_payload =
            serde_json::to_vec(&products).map_err(|e| ServiceError::serialization(&e))?;
        self.store
            .set(StorageKey::Products, &products_payload)
            .await?;

        metrics::counter!("inventory.save").increment(1);
        self.bus
            .publish(ChangeNotice::with_detail(ChangeTopic::InventoryUpdated, detail));
        self.bus
            .publish(ChangeNotice::with_detail(ChangeTopic::ProductsUpdated, detail));
        Ok(())
    }
}

/// Next id across both documents: one past the highest numeric id.
/// Non-numeric ids are ignored for the purpose of assignment.
fn next_numeric_id(records: &[InventoryRecord], products: &[Product]) -> ProductId {
    let highest = records
        .iter()
        .map(|r| &r.id)
        .chain(products.iter().map(|p| &p.id))
        .filter_map(|id| id.as_str().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    ProductId::new((highest + 1).to_string())
}
