//! Luxury watch storefront
//!
//! A demo shop for luxury watches: a SQLite-backed catalog, a cart per browsing
//! session and a mock checkout that issues an order number and empties the cart.
//!
//! ## Features
//! - Catalog browsing by category, brand and price range
//! - Session cart with exact decimal pricing (shipping threshold, sales tax)
//! - Mock checkout with order events published to NATS when configured
//!
//! Payment, order history and inventory reservation are out of scope.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod domain;
pub mod publisher;
pub mod session;
pub mod state;

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ProductError;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid product record {id}: {source}")]
    InvalidProduct { id: i64, source: ProductError },

    #[error("invalid stock level {stock} for product {id}")]
    InvalidStock { id: i64, stock: i64 },

    #[error("Storage error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
