//! Site content and store settings services.
//!
//! Both documents are admin-managed. Site content is the one writer that
//! touches the `products` document from outside the inventory adapter:
//! featuring a product flips its `featured` flag in the catalog mirror,
//! which is why `set_featured` publishes on two topics.

use crate::error::{Result, ServiceError};
use std::sync::Arc;
use storefront_core::bus::{ChangeNotice, ChangePublisher, ChangeTopic};
use storefront_core::content::{SiteContent, StoreSettings};
use storefront_core::environment::Clock;
use storefront_core::ids::ProductId;
use storefront_core::product::Product;
use storefront_core::storage::{KeyValueStore, StorageKey};

/// Service owning the `siteContent` document.
pub struct SiteContentService<S> {
    store: Arc<S>,
    bus: Arc<dyn ChangePublisher>,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> SiteContentService<S> {
    /// Create a service over a backend, change bus, and clock.
    ///
    /// The clock stamps `lastUpdated` on every save; tests inject a fixed
    /// one.
    #[must_use]
    pub fn new(store: Arc<S>, bus: Arc<dyn ChangePublisher>, clock: Arc<dyn Clock>) -> Self {
        Self { store, bus, clock }
    }

    /// Load the site content, failing open to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] only if the backend itself fails.
    pub async fn load(&self) -> Result<SiteContent> {
        if let Some(bytes) = self.store.get(StorageKey::SiteContent).await? {
            match serde_json::from_slice::<SiteContent>(&bytes) {
                Ok(content) => return Ok(content),
                Err(err) => {
                    tracing::warn!(error = %err, "unparsable site content payload, using defaults");
                }
            }
        }
        Ok(SiteContent::default())
    }

    /// Persist the site content with a fresh `lastUpdated` stamp.
    ///
    /// Returns the stamped content.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the write fails.
    pub async fn save(&self, mut content: SiteContent) -> Result<SiteContent> {
        content.last_updated = self.clock.now();
        let payload = serde_json::to_vec(&content).map_err(|e| ServiceError::serialization(&e))?;
        self.store.set(StorageKey::SiteContent, &payload).await?;
        self.bus.publish(ChangeNotice::new(ChangeTopic::SiteContentUpdated));
        Ok(content)
    }

    /// Feature or unfeature a product on the homepage.
    ///
    /// Updates the featured list and syncs the `featured` flag on the
    /// mirrored catalog entry, publishing `siteContentUpdated` and, when
    /// the catalog changed, `productsUpdated`. A no-op toggle (already in
    /// the requested state) writes and publishes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if a write fails.
    pub async fn set_featured(&self, id: &ProductId, featured: bool) -> Result<SiteContent> {
        let mut content = self.load().await?;
        if !content.set_featured(id, featured) {
            return Ok(content);
        }

        let content = self.save(content).await?;
        self.sync_product_flag(id, featured).await?;
        Ok(content)
    }

    /// Mirror the featured flag into the `products` document.
    async fn sync_product_flag(&self, id: &ProductId, featured: bool) -> Result<()> {
        let Some(bytes) = self.store.get(StorageKey::Products).await? else {
            return Ok(());
        };
        let Ok(mut products) = serde_json::from_slice::<Vec<Product>>(&bytes) else {
            // Nothing to sync into; the inventory adapter reseeds the
            // catalog mirror on its next load.
            return Ok(());
        };

        let Some(product) = products.iter_mut().find(|p| p.id == *id) else {
            return Ok(());
        };
        if product.featured == featured {
            return Ok(());
        }
        product.featured = featured;

        let payload = serde_json::to_vec(&products).map_err(|e| ServiceError::serialization(&e))?;
        self.store.set(StorageKey::Products, &payload).await?;
        self.bus.publish(ChangeNotice::with_detail(
            ChangeTopic::ProductsUpdated,
            "featured-sync",
        ));
        Ok(())
    }
}

/// Service owning the `storeSettings` document.
pub struct StoreSettingsService<S> {
    store: Arc<S>,
    bus: Arc<dyn ChangePublisher>,
}

impl<S: KeyValueStore> StoreSettingsService<S> {
    /// Create a service over a backend and change bus.
    #[must_use]
    pub fn new(store: Arc<S>, bus: Arc<dyn ChangePublisher>) -> Self {
        Self { store, bus }
    }

    /// Load the settings, failing open to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] only if the backend itself fails.
    pub async fn load(&self) -> Result<StoreSettings> {
        if let Some(bytes) = self.store.get(StorageKey::StoreSettings).await? {
            match serde_json::from_slice::<StoreSettings>(&bytes) {
                Ok(settings) => return Ok(settings),
                Err(err) => {
                    tracing::warn!(error = %err, "unparsable settings payload, using defaults");
                }
            }
        }
        Ok(StoreSettings::default())
    }

    /// Persist the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the write fails.
    pub async fn save(&self, settings: &StoreSettings) -> Result<()> {
        let payload = serde_json::to_vec(settings).map_err(|e| ServiceError::serialization(&e))?;
        self.store.set(StorageKey::StoreSettings, &payload).await?;
        self.bus
            .publish(ChangeNotice::new(ChangeTopic::StoreSettingsUpdated));
        Ok(())
    }
}
