//! Cart persistence with line merging.

use crate::error::{Result, ServiceError};
use std::sync::Arc;
use storefront_core::bus::{ChangeNotice, ChangePublisher, ChangeTopic};
use storefront_core::content::Cart;
use storefront_core::ids::ProductId;
use storefront_core::sizes::SizeLabel;
use storefront_core::storage::{KeyValueStore, StorageKey};

/// Service owning the `cart` document.
///
/// Every mutation is one read-modify-write cycle followed by a
/// `cartUpdated` notice. An absent or unparsable payload fails open to an
/// empty cart.
pub struct CartService<S> {
    store: Arc<S>,
    bus: Arc<dyn ChangePublisher>,
}

impl<S: KeyValueStore> CartService<S> {
    /// Create a service over a backend and change bus.
    #[must_use]
    pub fn new(store: Arc<S>, bus: Arc<dyn ChangePublisher>) -> Self {
        Self { store, bus }
    }

    /// Load the cart, failing open to empty.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] only if the backend itself fails.
    pub async fn load(&self) -> Result<Cart> {
        if let Some(bytes) = self.store.get(StorageKey::Cart).await? {
            match serde_json::from_slice::<Cart>(&bytes) {
                Ok(cart) => return Ok(cart),
                Err(err) => {
                    tracing::warn!(error = %err, "unparsable cart payload, starting empty");
                }
            }
        }
        Ok(Cart::new())
    }

    /// Add units of a product/size pair, merging into an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the write fails.
    pub async fn add(
        &self,
        product_id: ProductId,
        size: Option<SizeLabel>,
        quantity: u32,
    ) -> Result<Cart> {
        let mut cart = self.load().await?;
        cart.add(product_id, size, quantity);
        metrics::counter!("cart.add").increment(1);
        self.save(cart, "add").await
    }

    /// Set a line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the write fails.
    pub async fn set_quantity(
        &self,
        product_id: &ProductId,
        size: Option<&SizeLabel>,
        quantity: u32,
    ) -> Result<Cart> {
        let mut cart = self.load().await?;
        cart.set_quantity(product_id, size, quantity);
        self.save(cart, "quantity").await
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the write fails.
    pub async fn remove(&self, product_id: &ProductId, size: Option<&SizeLabel>) -> Result<Cart> {
        let mut cart = self.load().await?;
        cart.remove(product_id, size);
        self.save(cart, "remove").await
    }

    /// Empty the cart (checkout or explicit clear).
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the write fails.
    pub async fn clear(&self) -> Result<Cart> {
        self.save(Cart::new(), "clear").await
    }

    async fn save(&self, cart: Cart, detail: &str) -> Result<Cart> {
        let payload = serde_json::to_vec(&cart).map_err(|e| ServiceError::serialization(&e))?;
        self.store.set(StorageKey::Cart, &payload).await?;
        self.bus
            .publish(ChangeNotice::with_detail(ChangeTopic::CartUpdated, detail));
        Ok(cart)
    }
}
