//! Read-only product catalog.
//!
//! Loaded once from the database at startup and shared behind an `Arc`. All
//! browsing queries and the cart's product lookups run against this snapshot.

pub mod price_range;
pub mod seed;

pub use price_range::{PriceRange, PriceRangeError};

use crate::domain::{Product, ProductId, ProductLookup};

/// Number of products on the storefront's featured shelf.
pub const FEATURED_LIMIT: usize = 8;
/// Number of "you may also like" suggestions on a product page.
pub const RELATED_LIMIT: usize = 4;

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

/// Optional browsing filters. All set filters must match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price_range: Option<PriceRange>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let category = self.category.as_deref().map_or(true, |c| product.category().eq_ignore_ascii_case(c));
        let brand = self.brand.as_deref().map_or(true, |b| product.brand().eq_ignore_ascii_case(b));
        let price = self.price_range.map_or(true, |r| r.contains(product.price()));
        category && brand && price
    }
}

impl Catalog {
    pub fn new(mut products: Vec<Product>) -> Self {
        products.sort_by_key(Product::id);
        products.dedup_by_key(|p| p.id());
        Self { products }
    }

    pub fn all(&self) -> &[Product] { &self.products }
    pub fn len(&self) -> usize { self.products.len() }
    pub fn is_empty(&self) -> bool { self.products.is_empty() }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.binary_search_by_key(&id, Product::id).ok().map(|i| &self.products[i])
    }

    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        self.filter(&ProductFilter { category: Some(category.to_string()), ..Default::default() })
    }

    pub fn by_brand(&self, brand: &str) -> Vec<&Product> {
        self.filter(&ProductFilter { brand: Some(brand.to_string()), ..Default::default() })
    }

    pub fn featured(&self) -> &[Product] {
        &self.products[..self.products.len().min(FEATURED_LIMIT)]
    }

    /// Other products in the same category as `id`. Empty if `id` is unknown.
    pub fn related(&self, id: ProductId) -> Vec<&Product> {
        let Some(product) = self.get(id) else { return vec![] };
        self.products
            .iter()
            .filter(|p| p.id() != id && p.category() == product.category())
            .take(RELATED_LIMIT)
            .collect()
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&str> { distinct(self.products.iter().map(Product::category)) }

    /// Distinct brands in catalog order.
    pub fn brands(&self) -> Vec<&str> { distinct(self.products.iter().map(Product::brand)) }
}

impl ProductLookup for Catalog {
    fn find_by_id(&self, id: ProductId) -> Option<&Product> { self.get(id) }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = vec![];
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
