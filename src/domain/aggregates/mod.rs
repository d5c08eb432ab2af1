//! Aggregates module
pub mod product;
pub mod order;
pub mod cart;

pub use product::{Product, ProductError};
pub use order::{CheckoutError, Order, OrderNumber, ShippingDetails};
pub use cart::{Cart, CartError, LineItem, ProductLookup};
