//! Site content, store settings, and cart documents.
//!
//! These are the remaining persisted documents of the storage layout: the
//! homepage content block, the theme/settings block, and the cart. Each is
//! a plain serde record with defaulting rules stated once, so a missing or
//! partial payload always deserializes into something usable.

use crate::ids::ProductId;
use crate::price::Price;
use crate::sizes::SizeLabel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Homepage content managed from the admin back-office.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    /// Product ids featured on the homepage.
    #[serde(default)]
    pub featured_products: Vec<ProductId>,

    /// Main hero headline.
    #[serde(default)]
    pub hero_headline: String,

    /// Supporting hero text.
    #[serde(default)]
    pub hero_subheadline: String,

    /// About-page body text.
    #[serde(default)]
    pub about_text: String,

    /// Stamped by the service on every save.
    #[serde(default = "epoch")]
    pub last_updated: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            featured_products: Vec::new(),
            hero_headline: String::new(),
            hero_subheadline: String::new(),
            about_text: String::new(),
            last_updated: epoch(),
        }
    }
}

impl SiteContent {
    /// Check whether a product is featured.
    #[must_use]
    pub fn is_featured(&self, id: &ProductId) -> bool {
        self.featured_products.contains(id)
    }

    /// Add or remove a product from the featured list. Returns `true` when
    /// the list changed.
    pub fn set_featured(&mut self, id: &ProductId, featured: bool) -> bool {
        let currently = self.is_featured(id);
        if featured && !currently {
            self.featured_products.push(id.clone());
            true
        } else if !featured && currently {
            self.featured_products.retain(|p| p != id);
            true
        } else {
            false
        }
    }
}

/// A social media link in the store footer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    /// Platform name (e.g. `instagram`).
    pub platform: String,

    /// Profile URL.
    pub url: String,
}

/// Store-wide settings: currency and theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    /// ISO currency code applied to new products.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Primary theme color (CSS color value).
    #[serde(default = "default_primary")]
    pub primary_color: String,

    /// Accent theme color (CSS color value).
    #[serde(default = "default_accent")]
    pub accent_color: String,

    /// Footer social links.
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_primary() -> String {
    "#1a1a2e".to_string()
}

fn default_accent() -> String {
    "#e94560".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            primary_color: default_primary(),
            accent_color: default_accent(),
            social_links: Vec::new(),
        }
    }
}

/// One cart line: a product in a chosen size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,

    /// Chosen size, when the product is sized.
    #[serde(default)]
    pub size: Option<SizeLabel>,

    /// Units of this product/size pair.
    pub quantity: u32,
}

/// The shopper's cart.
///
/// Lines are keyed by `(product_id, size)`: adding an existing pair merges
/// quantities instead of appending a duplicate line.
///
/// # Examples
///
/// ```
/// use storefront_core::content::Cart;
/// use storefront_core::ids::ProductId;
/// use storefront_core::sizes::SizeLabel;
///
/// let mut cart = Cart::default();
/// cart.add(ProductId::new("1"), Some(SizeLabel::from("M")), 1);
/// cart.add(ProductId::new("1"), Some(SizeLabel::from("M")), 2);
/// cart.add(ProductId::new("1"), Some(SizeLabel::from("L")), 1);
///
/// assert_eq!(cart.lines().len(), 2);
/// assert_eq!(cart.total_quantity(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Check whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add units of a product/size pair, merging into an existing line.
    ///
    /// Adding zero units of a new pair is a no-op.
    pub fn add(&mut self, product_id: ProductId, size: Option<SizeLabel>, quantity: u32) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id && l.size == size)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else if quantity > 0 {
            self.lines.push(CartLine {
                product_id,
                size,
                quantity,
            });
        }
    }

    /// Set the quantity of a line; zero removes the line entirely.
    pub fn set_quantity(&mut self, product_id: &ProductId, size: Option<&SizeLabel>, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id, size);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == *product_id && l.size.as_ref() == size)
        {
            line.quantity = quantity;
        }
    }

    /// Remove a line.
    pub fn remove(&mut self, product_id: &ProductId, size: Option<&SizeLabel>) {
        self.lines
            .retain(|l| !(l.product_id == *product_id && l.size.as_ref() == size));
    }

    /// Drop all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Subtotal given a price lookup; lines with no known price count as
    /// zero (the product was deleted after the line was added).
    #[must_use]
    pub fn subtotal(&self, price_of: impl Fn(&ProductId) -> Option<Price>) -> Price {
        let cents = self.lines.iter().fold(0_u64, |acc, l| {
            let unit = price_of(&l.product_id).unwrap_or(Price::ZERO);
            acc.saturating_add(unit.cents().saturating_mul(u64::from(l.quantity)))
        });
        Price::from_cents(cents)
    }
}
