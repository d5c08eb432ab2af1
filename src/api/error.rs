use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::catalog::PriceRangeError;
use crate::domain::{CartError, CheckoutError, ProductId};
use crate::session::SessionIdError;

/// Error returned by HTTP handlers, rendered as `{"error": .., "code": ..}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error(transparent)]
    Session(#[from] SessionIdError),

    #[error(transparent)]
    PriceRange(#[from] PriceRangeError),

    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("quantity must be a positive whole number, got {0}")]
    MalformedQuantity(serde_json::Number),

    #[error(transparent)]
    Body(#[from] JsonRejection),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Cart(CartError::ProductNotFound(_)) | ApiError::ProductNotFound(_) => {
                (StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND")
            }
            ApiError::Cart(CartError::ProductNotInCart(_)) => (StatusCode::NOT_FOUND, "PRODUCT_NOT_IN_CART"),
            ApiError::Cart(CartError::InvalidQuantity(_)) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_QUANTITY"),
            ApiError::Cart(CartError::InsufficientInventory { .. }) => (StatusCode::CONFLICT, "INSUFFICIENT_INVENTORY"),
            ApiError::Checkout(CheckoutError::EmptyCart) => (StatusCode::CONFLICT, "EMPTY_CART"),
            ApiError::Session(_) => (StatusCode::BAD_REQUEST, "INVALID_SESSION"),
            ApiError::PriceRange(_) => (StatusCode::BAD_REQUEST, "INVALID_PRICE_RANGE"),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::MalformedQuantity(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_QUANTITY"),
            ApiError::Body(rejection) => (rejection.status(), "INVALID_BODY"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        tracing::debug!(error = %self, code, "request rejected");
        (status, Json(json!({ "error": self.to_string(), "code": code }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_errors_map_to_statuses() {
        let id = ProductId::new(3);
        let cases = [
            (ApiError::from(CartError::ProductNotFound(id)), StatusCode::NOT_FOUND),
            (ApiError::from(CartError::ProductNotInCart(id)), StatusCode::NOT_FOUND),
            (ApiError::from(CartError::InvalidQuantity(-1)), StatusCode::UNPROCESSABLE_ENTITY),
            (
                ApiError::from(CartError::InsufficientInventory { product_id: id, requested: 11, available: 10 }),
                StatusCode::CONFLICT,
            ),
            (ApiError::from(CheckoutError::EmptyCart), StatusCode::CONFLICT),
            (ApiError::from(SessionIdError::Charset), StatusCode::BAD_REQUEST),
            (ApiError::from(PriceRangeError::Negative(-1)), StatusCode::BAD_REQUEST),
            (ApiError::MalformedQuantity(serde_json::Number::from_f64(1.5).unwrap()), StatusCode::UNPROCESSABLE_ENTITY),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
