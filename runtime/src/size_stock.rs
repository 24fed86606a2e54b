//! Per-size stock editing folded back into record totals.

use crate::error::Result;
use crate::inventory_store::InventoryStore;
use std::collections::HashMap;
use storefront_core::ids::ProductId;
use storefront_core::sizes::{SizeLabel, SizeStockMap};
use storefront_core::storage::KeyValueStore;

/// Editor for the optional per-size stock view of products.
///
/// Expanding a product initializes an even split of its total stock across
/// its sizes (first expansion only); editing a single size recomputes the
/// total as the sum across all tracked sizes and forwards it through the
/// inventory store, which rederives the status, persists both documents,
/// and notifies.
///
/// The editor can hold expanded views for several products at once even
/// when a UI only ever expands one at a time.
pub struct SizeStockEditor<S> {
    inventory: InventoryStore<S>,
    map: SizeStockMap,
}

impl<S: KeyValueStore> SizeStockEditor<S> {
    /// Create an editor writing through the given inventory store.
    #[must_use]
    pub fn new(inventory: InventoryStore<S>) -> Self {
        Self {
            inventory,
            map: SizeStockMap::new(),
        }
    }

    /// Expand a product into its per-size view.
    ///
    /// The first expansion splits the record's total stock evenly across
    /// its sizes (floor division, remainder dropped). Re-expanding returns
    /// the tracked view untouched, so explicit edits survive.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`](crate::ServiceError::NotFound)
    /// when no record carries the id.
    pub async fn expand(&mut self, id: &ProductId) -> Result<HashMap<SizeLabel, u32>> {
        let record = self.inventory.get(id).await?;
        let entry = self.map.expand_entry(id, &record.sizes, record.stock);
        Ok(entry.clone())
    }

    /// Set one size's stock from raw form input and persist the new total.
    ///
    /// Non-numeric input arrives as `None` and clamps to zero, as does any
    /// negative value. Returns the product's new total stock.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`](crate::ServiceError::NotFound)
    /// when no record carries the id; the map is not modified in that case.
    pub async fn set_size_stock(
        &mut self,
        id: &ProductId,
        size: SizeLabel,
        input: Option<i64>,
    ) -> Result<u32> {
        // Reject unknown products before touching the tracked view.
        let _ = self.inventory.get(id).await?;

        let clamped = input.unwrap_or(0).clamp(0, i64::from(u32::MAX));
        let value = u32::try_from(clamped).unwrap_or(u32::MAX);

        let total = self.map.set_size_stock(id, size, value);
        self.inventory.set_stock(id, total).await?;
        Ok(total)
    }

    /// The tracked per-size view for a product, if currently expanded.
    #[must_use]
    pub fn expanded(&self, id: &ProductId) -> Option<&HashMap<SizeLabel, u32>> {
        self.map.entry(id)
    }

    /// Drop a product's expanded view. The totals already folded into the
    /// inventory record are unaffected.
    pub fn collapse(&mut self, id: &ProductId) {
        self.map.collapse(id);
    }
}
