//! Product Aggregate

use serde::Serialize;
use thiserror::Error;

use crate::domain::value_objects::{Money, ProductId};

/// A watch in the catalog. Read-only once loaded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    brand: String,
    category: String,
    price: Money,
    description: String,
    image_url: String,
    stock: u32,
    features: Vec<String>,
}

impl Product {
    pub fn create(
        id: ProductId,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Result<Self, ProductError> {
        let (name, brand, category) = (name.into(), brand.into(), category.into());
        if !id.is_valid() { return Err(ProductError::InvalidId(id)); }
        if name.trim().is_empty() { return Err(ProductError::MissingName); }
        if brand.trim().is_empty() { return Err(ProductError::MissingBrand); }
        if category.trim().is_empty() { return Err(ProductError::MissingCategory); }
        if price.is_negative() { return Err(ProductError::NegativePrice(price)); }
        Ok(Self {
            id, name, brand, category, price,
            description: String::new(), image_url: String::new(), stock: 0, features: vec![],
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> ProductId { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn brand(&self) -> &str { &self.brand }
    pub fn category(&self) -> &str { &self.category }
    pub fn price(&self) -> Money { self.price }
    pub fn description(&self) -> &str { &self.description }
    pub fn image_url(&self) -> &str { &self.image_url }
    pub fn stock(&self) -> u32 { self.stock }
    pub fn features(&self) -> &[String] { &self.features }
    pub fn is_in_stock(&self) -> bool { self.stock > 0 }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("product id must be positive, got {0}")]
    InvalidId(ProductId),
    #[error("missing name")]
    MissingName,
    #[error("missing brand")]
    MissingBrand,
    #[error("missing category")]
    MissingCategory,
    #[error("price must not be negative, got {0}")]
    NegativePrice(Money),
}
