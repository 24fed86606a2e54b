//! Catalog filter and sort pipeline.
//!
//! Pure, stateless transformations over a product list. Views recompute the
//! whole pipeline on every filter change rather than maintaining an index;
//! catalogs here are small enough that rescanning is the simpler invariant.

use crate::price::Price;
use crate::product::Product;
use crate::sizes::SizeLabel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for filter specification parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterParseError {
    /// A price bracket key did not have the `min-max` shape.
    #[error("Invalid price bracket: {0}")]
    InvalidPriceBracket(String),
}

/// Half-open price range `[min, max)` in major units.
///
/// Parsed from the combined `"min-max"` keys the filter UI produces. An
/// unbounded upper end is written `"200-"` or `"200+"`.
///
/// # Examples
///
/// ```
/// use storefront_core::catalog::PriceBracket;
/// use storefront_core::price::Price;
///
/// let bracket = PriceBracket::parse("50-100").unwrap();
/// assert!(!bracket.contains(Price::from_major(40)));
/// assert!(bracket.contains(Price::from_major(75)));
/// assert!(bracket.contains(Price::from_major(50)));
/// assert!(!bracket.contains(Price::from_major(100))); // upper bound exclusive
///
/// let open = PriceBracket::parse("200+").unwrap();
/// assert!(open.contains(Price::from_major(5000)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceBracket {
    min: Price,
    max: Option<Price>,
}

impl PriceBracket {
    /// A bracket spanning `[min, max)`.
    #[must_use]
    pub const fn new(min: Price, max: Option<Price>) -> Self {
        Self { min, max }
    }

    /// Parse a combined `"min-max"` key.
    ///
    /// `"50-100"` yields `[50, 100)`; `"200-"` and `"200+"` yield a bracket
    /// with no upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`FilterParseError::InvalidPriceBracket`] when either bound
    /// fails to parse as a non-negative number.
    pub fn parse(key: &str) -> Result<Self, FilterParseError> {
        let invalid = || FilterParseError::InvalidPriceBracket(key.to_string());

        let (min_part, max_part) = if let Some(stripped) = key.strip_suffix('+') {
            (stripped, None)
        } else if let Some((min, max)) = key.split_once('-') {
            (min, if max.is_empty() { None } else { Some(max) })
        } else {
            return Err(invalid());
        };

        let min = min_part.trim().parse::<u64>().map_err(|_| invalid())?;
        let max = match max_part {
            Some(raw) => Some(Price::from_major(
                raw.trim().parse::<u64>().map_err(|_| invalid())?,
            )),
            None => None,
        };

        Ok(Self {
            min: Price::from_major(min),
            max,
        })
    }

    /// Check whether a price falls inside the bracket.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        price >= self.min && self.max.is_none_or(|max| price < max)
    }
}

/// Filter criteria for the catalog view.
///
/// All fields are optional; an omitted field places no constraint. The
/// default value filters nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogFilter {
    /// Exact brand match.
    pub brand: Option<String>,

    /// Membership test against the product's size list.
    pub size: Option<SizeLabel>,

    /// Half-open price range.
    pub price: Option<PriceBracket>,
}

impl CatalogFilter {
    /// A filter that matches everything.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to an exact brand.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Restrict to products carrying a size.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<SizeLabel>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Restrict to a price bracket.
    #[must_use]
    pub const fn with_price(mut self, bracket: PriceBracket) -> Self {
        self.price = Some(bracket);
        self
    }

    /// Check whether a single product passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(brand) = &self.brand {
            if product.brand != *brand {
                return false;
            }
        }
        if let Some(size) = &self.size {
            let found = product.sizes.iter().any(|s| {
                s == size
                    || match (s.as_number(), size.as_number()) {
                        (Some(a), Some(b)) => a == b,
                        _ => false,
                    }
            });
            if !found {
                return false;
            }
        }
        if let Some(bracket) = &self.price {
            if !bracket.contains(product.price) {
                return false;
            }
        }
        true
    }
}

/// Sort order for the catalog view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Featured products first; ties preserve the original order.
    #[default]
    Featured,

    /// Cheapest first.
    PriceAsc,

    /// Most expensive first.
    PriceDesc,

    /// Name A to Z, case-insensitive.
    NameAsc,

    /// Name Z to A, case-insensitive.
    NameDesc,
}

fn name_key(product: &Product) -> String {
    product.name.to_lowercase()
}

/// Run the filter/sort pipeline over a product list.
///
/// Returns a fresh `Vec`; the input slice is never mutated. Sorting is
/// stable, so equal keys keep their relative input order (the featured sort
/// relies on this for its tie-break rule).
///
/// # Examples
///
/// ```
/// use storefront_core::catalog::{apply, CatalogFilter, PriceBracket, SortKey};
/// # use storefront_core::ids::ProductId;
/// # use storefront_core::inventory::InventoryRecord;
/// # use storefront_core::price::Price;
/// # use storefront_core::product::{MirrorDefaults, Product};
/// # fn product(id: &str, price: u64) -> Product {
/// #     let record = InventoryRecord::new(ProductId::new(id), id, "Acme", 10);
/// #     let mut p = Product::mirror_from(&record, None, &MirrorDefaults::default());
/// #     p.price = Price::from_major(price);
/// #     p
/// # }
///
/// let products = vec![product("a", 40), product("b", 75), product("c", 120)];
/// let filter = CatalogFilter::any().with_price(PriceBracket::parse("50-100").unwrap());
///
/// let view = apply(&products, &filter, SortKey::PriceAsc);
/// assert_eq!(view.len(), 1);
/// assert_eq!(view[0].price, Price::from_major(75));
/// ```
#[must_use]
pub fn apply(products: &[Product], filter: &CatalogFilter, sort: SortKey) -> Vec<Product> {
    let mut view: Vec<Product> = products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();

    match sort {
        SortKey::Featured => view.sort_by_key(|p| !p.featured),
        SortKey::PriceAsc => view.sort_by_key(|p| p.price),
        SortKey::PriceDesc => view.sort_by_key(|p| std::cmp::Reverse(p.price)),
        SortKey::NameAsc => view.sort_by(|a, b| name_key(a).cmp(&name_key(b))),
        SortKey::NameDesc => view.sort_by(|a, b| name_key(b).cmp(&name_key(a))),
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::inventory::InventoryRecord;
    use crate::product::MirrorDefaults;

    fn product(id: &str, name: &str, brand: &str, price_major: u64) -> Product {
        let record = InventoryRecord::new(ProductId::new(id), name, brand, 10)
            .with_sizes(vec![SizeLabel::from(38_u32), SizeLabel::from("M")]);
        let mut p = Product::mirror_from(&record, None, &MirrorDefaults::default());
        p.price = Price::from_major(price_major);
        p
    }

    mod bracket_tests {
        use super::*;

        #[test]
        #[allow(clippy::unwrap_used)] // Panics: Test will fail if parse fails
        fn bounded_bracket_is_half_open() {
            let bracket = PriceBracket::parse("50-100").unwrap();
            assert!(bracket.contains(Price::from_major(50)));
            assert!(bracket.contains(Price::from_major(99)));
            assert!(!bracket.contains(Price::from_major(100)));
            assert!(!bracket.contains(Price::from_major(40)));
        }

        #[test]
        #[allow(clippy::unwrap_used)] // Panics: Test will fail if parse fails
        fn open_bracket_has_no_upper_bound() {
            for key in ["200-", "200+"] {
                let bracket = PriceBracket::parse(key).unwrap();
                assert!(bracket.contains(Price::from_major(200)));
                assert!(bracket.contains(Price::from_cents(u64::MAX)));
                assert!(!bracket.contains(Price::from_major(199)));
            }
        }

        #[test]
        fn malformed_keys_are_rejected() {
            for key in ["", "abc", "10-abc", "-", "100"] {
                assert!(PriceBracket::parse(key).is_err(), "expected {key:?} to fail");
            }
        }
    }

    mod filter_tests {
        use super::*;

        #[test]
        fn empty_filter_matches_everything() {
            let p = product("1", "Hat", "Acme", 40);
            assert!(CatalogFilter::any().matches(&p));
        }

        #[test]
        fn brand_filter_is_exact() {
            let p = product("1", "Hat", "Acme", 40);
            assert!(CatalogFilter::any().with_brand("Acme").matches(&p));
            assert!(!CatalogFilter::any().with_brand("acme").matches(&p));
            assert!(!CatalogFilter::any().with_brand("Northwind").matches(&p));
        }

        #[test]
        fn size_filter_compares_numerically() {
            let p = product("1", "Boot", "Acme", 80);
            assert!(CatalogFilter::any().with_size(38_u32).matches(&p));
            assert!(CatalogFilter::any().with_size("38").matches(&p));
            assert!(CatalogFilter::any().with_size("M").matches(&p));
            assert!(!CatalogFilter::any().with_size(44_u32).matches(&p));
        }

        #[test]
        #[allow(clippy::unwrap_used)] // Panics: Test will fail if parse fails
        fn price_bracket_keeps_only_members() {
            let products = vec![
                product("1", "A", "Acme", 40),
                product("2", "B", "Acme", 75),
                product("3", "C", "Acme", 120),
            ];
            let filter =
                CatalogFilter::any().with_price(PriceBracket::parse("50-100").unwrap());
            let view = apply(&products, &filter, SortKey::Featured);
            assert_eq!(view.len(), 1);
            assert_eq!(view[0].price, Price::from_major(75));
        }
    }

    mod sort_tests {
        use super::*;

        #[test]
        fn featured_sort_is_stable() {
            let mut b = product("1", "B", "Acme", 10);
            let mut a = product("2", "A", "Acme", 20);
            let mut c = product("3", "C", "Acme", 30);
            b.featured = false;
            a.featured = true;
            c.featured = false;

            let view = apply(&[b, a, c], &CatalogFilter::any(), SortKey::Featured);
            let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, ["A", "B", "C"]);
        }

        #[test]
        fn price_sorts_both_directions() {
            let products = vec![
                product("1", "B", "Acme", 75),
                product("2", "A", "Acme", 40),
                product("3", "C", "Acme", 120),
            ];

            let asc = apply(&products, &CatalogFilter::any(), SortKey::PriceAsc);
            let prices: Vec<u64> = asc.iter().map(|p| p.price.major()).collect();
            assert_eq!(prices, [40, 75, 120]);

            let desc = apply(&products, &CatalogFilter::any(), SortKey::PriceDesc);
            let prices: Vec<u64> = desc.iter().map(|p| p.price.major()).collect();
            assert_eq!(prices, [120, 75, 40]);
        }

        #[test]
        fn name_sort_ignores_case() {
            let products = vec![
                product("1", "banana", "Acme", 1),
                product("2", "Apple", "Acme", 2),
                product("3", "cherry", "Acme", 3),
            ];

            let view = apply(&products, &CatalogFilter::any(), SortKey::NameAsc);
            let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, ["Apple", "banana", "cherry"]);
        }

        #[test]
        fn input_list_is_never_mutated() {
            let products = vec![
                product("1", "B", "Acme", 75),
                product("2", "A", "Acme", 40),
            ];
            let before = products.clone();
            let _ = apply(&products, &CatalogFilter::any(), SortKey::PriceAsc);
            assert_eq!(products, before);
        }
    }
}
