//! Order Aggregate
//!
//! A placed order is a receipt: it snapshots the cart, prices it, empties the
//! cart and records an event. Nothing is persisted.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::aggregates::{Cart, LineItem};
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::pricing::{price_lines, PriceBreakdown, PricingPolicy};

/// Customer-facing order reference, `ORD-` followed by six digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self(format!("ORD-{}", rng.gen_range(100_000..=999_999)))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub zip: String,
    pub country: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Order {
    id: Uuid,
    order_number: OrderNumber,
    shipping: ShippingDetails,
    items: Vec<LineItem>,
    item_count: u64,
    breakdown: PriceBreakdown,
    placed_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Order {
    /// Turns the cart into an order and empties it. An empty cart cannot be ordered.
    pub fn place(
        cart: &mut Cart,
        policy: &PricingPolicy,
        shipping: ShippingDetails,
        order_number: OrderNumber,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() { return Err(CheckoutError::EmptyCart); }
        let items = cart.items().to_vec();
        let item_count = cart.item_count();
        let breakdown = price_lines(&items, policy);
        cart.clear();

        let mut order = Self {
            id: Uuid::new_v4(), order_number, shipping, items, item_count, breakdown,
            placed_at: Utc::now(), events: vec![],
        };
        order.raise_event(DomainEvent::Order(OrderEvent::Placed {
            order_id: order.id,
            order_number: order.order_number.to_string(),
            item_count,
            total: breakdown.total.amount(),
        }));
        Ok(order)
    }

    pub fn id(&self) -> Uuid { self.id }
    pub fn order_number(&self) -> &OrderNumber { &self.order_number }
    pub fn shipping(&self) -> &ShippingDetails { &self.shipping }
    pub fn items(&self) -> &[LineItem] { &self.items }
    pub fn item_count(&self) -> u64 { self.item_count }
    pub fn breakdown(&self) -> &PriceBreakdown { &self.breakdown }
    pub fn placed_at(&self) -> DateTime<Utc> { self.placed_at }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cannot check out an empty cart")]
    EmptyCart,
}
