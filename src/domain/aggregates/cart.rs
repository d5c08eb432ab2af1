//! Cart Aggregate
//!
//! One cart per session. Line items are kept in the order their product was
//! first added, and the cart carries a running subtotal that every mutation
//! adjusts in place. [`Cart::recomputed_subtotal`] derives the same figure from
//! the lines; the two never disagree.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::aggregates::Product;
use crate::domain::value_objects::{Money, ProductId, Quantity};

/// Read-only product lookup the cart consults when a product is first added.
pub trait ProductLookup {
    fn find_by_id(&self, id: ProductId) -> Option<&Product>;
}

/// One distinct product in the cart, with the details captured when it was added.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub unit_price: Money,
    pub image_url: String,
    pub quantity: u32,
    /// Stock level of the product the last time the catalog was consulted.
    pub available: u32,
}

impl LineItem {
    fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id(),
            name: product.name().to_string(),
            brand: product.brand().to_string(),
            unit_price: product.price(),
            image_url: product.image_url().to_string(),
            quantity,
            available: product.stock(),
        }
    }

    pub fn line_total(&self) -> Money { self.unit_price.multiply(self.quantity) }
}

#[derive(Clone, Debug)]
pub struct Cart {
    id: Uuid,
    items: Vec<LineItem>,
    subtotal: Money,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self { Self::new() }
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self { id: Uuid::new_v4(), items: vec![], subtotal: Money::ZERO, created_at: now, updated_at: now }
    }

    pub fn id(&self) -> Uuid { self.id }
    pub fn items(&self) -> &[LineItem] { &self.items }
    pub fn subtotal(&self) -> Money { self.subtotal }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 { self.items.iter().map(|i| u64::from(i.quantity)).sum() }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize { self.items.len() }

    pub fn recomputed_subtotal(&self) -> Money { self.items.iter().map(LineItem::line_total).sum() }

    /// Adds `quantity` units of a catalog product, merging into an existing line.
    ///
    /// A merged line keeps the unit price it was first added at. The resulting
    /// quantity may not exceed the product's current stock. On error the cart
    /// is left untouched.
    pub fn add_item<C>(&mut self, catalog: &C, product_id: ProductId, quantity: i64) -> Result<&LineItem, CartError>
    where
        C: ProductLookup + ?Sized,
    {
        let requested = Quantity::positive(quantity).ok_or(CartError::InvalidQuantity(quantity))?;
        let product = catalog.find_by_id(product_id).ok_or(CartError::ProductNotFound(product_id))?;

        let index = match self.position(product_id) {
            Some(index) => {
                let line = &mut self.items[index];
                let merged = line.quantity
                    .checked_add(requested.value())
                    .ok_or(CartError::InvalidQuantity(quantity))?;
                ensure_in_stock(product_id, merged, product.stock())?;
                line.quantity = merged;
                line.available = product.stock();
                self.subtotal += line.unit_price.multiply(requested.value());
                index
            }
            None => {
                ensure_in_stock(product_id, requested.value(), product.stock())?;
                let line = LineItem::snapshot(product, requested.value());
                self.subtotal += line.line_total();
                self.items.push(line);
                self.items.len() - 1
            }
        };
        self.touch();
        Ok(&self.items[index])
    }

    /// Removes the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let Some(index) = self.position(product_id) else { return false };
        let line = self.items.remove(index);
        self.subtotal -= line.line_total();
        self.touch();
        true
    }

    /// Sets a line's quantity. Zero or negative removes the line instead.
    ///
    /// Returns the updated line, or `None` when the product is no longer in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<Option<&LineItem>, CartError> {
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(None);
        }
        let quantity = Quantity::positive(quantity).ok_or(CartError::InvalidQuantity(quantity))?.value();
        let line = self.items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or(CartError::ProductNotInCart(product_id))?;
        ensure_in_stock(product_id, quantity, line.available)?;

        self.subtotal -= line.line_total();
        line.quantity = quantity;
        self.subtotal += line.line_total();
        self.updated_at = Utc::now();
        Ok(Some(&*line))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.subtotal = Money::ZERO;
        self.touch();
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|i| i.product_id == product_id)
    }

    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

fn ensure_in_stock(product_id: ProductId, requested: u32, available: u32) -> Result<(), CartError> {
    if requested > available {
        return Err(CartError::InsufficientInventory { product_id, requested, available });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),
    #[error("quantity must be a positive whole number, got {0}")]
    InvalidQuantity(i64),
    #[error("product {0} is not in the cart")]
    ProductNotInCart(ProductId),
    #[error("only {available} of product {product_id} in stock, {requested} requested")]
    InsufficientInventory { product_id: ProductId, requested: u32, available: u32 },
}
