use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use crate::api::error::ApiResult;
use crate::domain::{CheckoutError, Order, OrderNumber, ShippingDetails};
use crate::session::SessionId;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub address_line1: String,
    #[validate(length(max = 200))]
    pub address_line2: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    pub state: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub zip: String,
    #[serde(default = "default_country")]
    #[validate(length(min = 1, max = 100))]
    pub country: String,
}

fn default_country() -> String { "United States".to_string() }

impl From<CheckoutRequest> for ShippingDetails {
    fn from(r: CheckoutRequest) -> Self {
        Self {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
            address_line1: r.address_line1,
            address_line2: r.address_line2,
            city: r.city,
            state: r.state,
            zip: r.zip,
            country: r.country,
        }
    }
}

/// Places a mock order for the session's cart and empties it.
pub async fn checkout(
    State(s): State<AppState>,
    Path(session): Path<String>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let session = SessionId::parse(&session)?;
    let Json(r) = payload?;
    r.validate()?;
    let order_number = OrderNumber::generate(&mut rand::thread_rng());

    let Some(cart) = s.sessions.existing(&session).await else {
        return Err(CheckoutError::EmptyCart.into());
    };
    let placed = {
        let mut cart = cart.lock().await;
        Order::place(&mut cart, &s.pricing, r.into(), order_number)
    };
    drop(cart);
    s.sessions.release_if_empty(&session).await;
    let mut order = placed?;
    tracing::info!(
        %session,
        order_number = %order.order_number(),
        total = %order.breakdown().total,
        "order placed"
    );
    for event in order.take_events() {
        s.events.publish(&event).await;
    }
    Ok((StatusCode::CREATED, Json(order)))
}
