//! HTTP surface: catalog browsing, session carts and checkout.

pub mod cart;
pub mod checkout;
pub mod error;
pub mod products;

use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db;
use crate::state::AppState;

pub use error::{ApiError, ApiResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list_products))
        .route("/products/featured", get(products::featured_products))
        .route("/products/:id", get(products::get_product))
        .route("/products/:id/related", get(products::related_products))
        .route("/categories", get(products::list_categories))
        .route("/brands", get(products::list_brands))
        .route("/price-ranges", get(products::list_price_ranges))
        .route("/cart/:session", get(cart::get_cart).delete(cart::clear_cart))
        .route("/cart/:session/items", post(cart::add_item))
        .route("/cart/:session/items/:product_id", put(cart::update_quantity).delete(cart::remove_item))
        .route("/checkout/:session", post(checkout::checkout))
}

async fn health(State(s): State<AppState>) -> Json<serde_json::Value> {
    let db_healthy = db::health_check(&s.db).await;
    Json(serde_json::json!({
        "status": if db_healthy { "healthy" } else { "degraded" },
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
        "products": s.catalog.len(),
    }))
}
