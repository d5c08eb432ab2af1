use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{compute_breakdown, Cart, LineItem, Money, PriceBreakdown, PricingPolicy, ProductId};
use crate::session::SessionId;
use crate::state::AppState;

/// Cart contents with the price summary shown beside them.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub session: String,
    pub items: Vec<LineItem>,
    pub item_count: u64,
    pub line_count: usize,
    pub summary: CartSummary,
}

#[derive(Debug, Serialize)]
pub struct CartSummary {
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
    pub free_shipping: bool,
    pub free_shipping_threshold: Money,
    pub formatted: FormattedBreakdown,
}

/// Display strings, e.g. `$1,234.56`. Shipping reads `Free` when waived.
#[derive(Debug, Serialize)]
pub struct FormattedBreakdown {
    pub subtotal: String,
    pub shipping_fee: String,
    pub tax: String,
    pub total: String,
}

impl CartSummary {
    pub fn new(breakdown: PriceBreakdown, policy: &PricingPolicy) -> Self {
        let formatted = FormattedBreakdown {
            subtotal: breakdown.subtotal.to_string(),
            shipping_fee: if breakdown.has_free_shipping() { "Free".to_string() } else { breakdown.shipping_fee.to_string() },
            tax: breakdown.tax.to_string(),
            total: breakdown.total.to_string(),
        };
        Self {
            breakdown,
            free_shipping: breakdown.has_free_shipping(),
            free_shipping_threshold: policy.free_shipping_threshold(),
            formatted,
        }
    }
}

impl CartView {
    pub fn new(session: &SessionId, cart: &Cart, policy: &PricingPolicy) -> Self {
        Self {
            session: session.to_string(),
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            line_count: cart.line_count(),
            summary: CartSummary::new(compute_breakdown(cart, policy), policy),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: Number,
}

fn default_quantity() -> Number { Number::from(1) }

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: Number,
}

/// Quantities arrive as any JSON number so that fractions are reported as bad
/// quantities rather than as unreadable bodies.
fn whole_quantity(quantity: &Number) -> ApiResult<i64> {
    quantity.as_i64().ok_or_else(|| ApiError::MalformedQuantity(quantity.clone()))
}

#[derive(Debug, Serialize)]
pub struct RemoveItemResponse {
    pub removed: bool,
    pub cart: CartView,
}

pub async fn get_cart(State(s): State<AppState>, Path(session): Path<String>) -> ApiResult<Json<CartView>> {
    let session = SessionId::parse(&session)?;
    let view = match s.sessions.existing(&session).await {
        Some(cart) => {
            let cart = cart.lock().await;
            CartView::new(&session, &cart, &s.pricing)
        }
        None => CartView::new(&session, &Cart::new(), &s.pricing),
    };
    Ok(Json(view))
}

pub async fn add_item(
    State(s): State<AppState>,
    Path(session): Path<String>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> ApiResult<Json<CartView>> {
    let session = SessionId::parse(&session)?;
    let Json(r) = payload?;
    let quantity = whole_quantity(&r.quantity)?;
    let product_id = ProductId::new(r.product_id);

    let cart = s.sessions.cart(&session).await;
    let outcome = {
        let mut cart = cart.lock().await;
        match cart.add_item(s.catalog.as_ref(), product_id, quantity) {
            Ok(line) => {
                tracing::info!(%session, %product_id, quantity = line.quantity, "item added to cart");
                Ok(CartView::new(&session, &cart, &s.pricing))
            }
            Err(e) => Err(e),
        }
    };
    drop(cart);
    // A rejected first add leaves nothing worth keeping.
    s.sessions.release_if_empty(&session).await;
    Ok(Json(outcome?))
}

pub async fn update_quantity(
    State(s): State<AppState>,
    Path((session, product_id)): Path<(String, i64)>,
    payload: Result<Json<UpdateQuantityRequest>, JsonRejection>,
) -> ApiResult<Json<CartView>> {
    let session = SessionId::parse(&session)?;
    let Json(r) = payload?;
    let quantity = whole_quantity(&r.quantity)?;
    let product_id = ProductId::new(product_id);

    let Some(cart) = s.sessions.existing(&session).await else {
        // Same outcome as updating an empty cart, without registering the session.
        let mut empty = Cart::new();
        empty.update_quantity(product_id, quantity)?;
        return Ok(Json(CartView::new(&session, &empty, &s.pricing)));
    };
    let view = {
        let mut cart = cart.lock().await;
        match cart.update_quantity(product_id, quantity)? {
            Some(line) => tracing::info!(%session, %product_id, quantity = line.quantity, "cart quantity updated"),
            None => tracing::info!(%session, %product_id, "item removed by quantity update"),
        }
        CartView::new(&session, &cart, &s.pricing)
    };
    drop(cart);
    s.sessions.release_if_empty(&session).await;
    Ok(Json(view))
}

pub async fn remove_item(
    State(s): State<AppState>,
    Path((session, product_id)): Path<(String, i64)>,
) -> ApiResult<Json<RemoveItemResponse>> {
    let session = SessionId::parse(&session)?;
    let Some(cart) = s.sessions.existing(&session).await else {
        return Ok(Json(RemoveItemResponse { removed: false, cart: CartView::new(&session, &Cart::new(), &s.pricing) }));
    };
    let response = {
        let mut cart = cart.lock().await;
        let removed = cart.remove_item(ProductId::new(product_id));
        tracing::info!(%session, product_id, removed, "remove item from cart");
        RemoveItemResponse { removed, cart: CartView::new(&session, &cart, &s.pricing) }
    };
    drop(cart);
    s.sessions.release_if_empty(&session).await;
    Ok(Json(response))
}

pub async fn clear_cart(State(s): State<AppState>, Path(session): Path<String>) -> ApiResult<StatusCode> {
    let session = SessionId::parse(&session)?;
    if let Some(cart) = s.sessions.existing(&session).await {
        cart.lock().await.clear();
        drop(cart);
        s.sessions.release_if_empty(&session).await;
        tracing::info!(%session, "cart cleared");
    }
    Ok(StatusCode::NO_CONTENT)
}
