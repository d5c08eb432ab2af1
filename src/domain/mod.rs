//! Storefront domain: catalog products, the session cart, pricing and checkout.
pub mod aggregates;
pub mod events;
pub mod pricing;
pub mod value_objects;

pub use aggregates::{Cart, CartError, CheckoutError, LineItem, Order, OrderNumber, Product, ProductError, ProductLookup, ShippingDetails};
pub use pricing::{compute_breakdown, price_lines, PriceBreakdown, PricingError, PricingPolicy};
pub use value_objects::{Money, MoneyError, ProductId, Quantity};
