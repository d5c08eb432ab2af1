//! Integration tests for catalog browsing and health.

mod common;

use axum::http::StatusCode;
use common::{amount, build_test_app, dollars, get};
use serde_json::Value;

fn ids(list: &Value) -> Vec<i64> {
    list["data"].as_array().unwrap().iter().map(|p| p["id"].as_i64().unwrap()).collect()
}

#[tokio::test]
async fn health_reports_catalog() {
    let app = build_test_app().await;
    let (status, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["products"], 12);
}

#[tokio::test]
async fn lists_all_products() {
    let app = build_test_app().await;
    let (status, list) = get(&app, "/api/v1/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 12);
    assert_eq!(ids(&list), (1..=12).collect::<Vec<_>>());
}

#[tokio::test]
async fn filters_by_category_brand_and_price() {
    let app = build_test_app().await;

    let (_, dive) = get(&app, "/api/v1/products?category=Dive").await;
    assert_eq!(ids(&dive), vec![1, 10, 11]);

    let (_, omega) = get(&app, "/api/v1/products?brand=omega").await;
    assert_eq!(ids(&omega), vec![2, 11]);

    let (_, budget) = get(&app, "/api/v1/products?price_range=0-1000").await;
    assert_eq!(ids(&budget), vec![6]);

    let (_, mid) = get(&app, "/api/v1/products?price_range=1000-5000").await;
    assert_eq!(ids(&mid), vec![4, 8, 10]);

    let (_, combined) = get(&app, "/api/v1/products?category=Dive&brand=Seiko").await;
    assert_eq!(ids(&combined), vec![10]);
}

#[tokio::test]
async fn malformed_price_range_is_bad_request() {
    let app = build_test_app().await;
    let (status, body) = get(&app, "/api/v1/products?price_range=cheap").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PRICE_RANGE");
}

#[tokio::test]
async fn product_detail_and_related() {
    let app = build_test_app().await;

    let (status, product) = get(&app, "/api/v1/products/5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["name"], "Nautilus");
    assert_eq!(product["brand"], "Patek Philippe");
    assert_eq!(amount(&product["price"]), dollars(35_000));
    assert_eq!(product["stock"], 10);
    assert!(!product["features"].as_array().unwrap().is_empty());

    let (_, related) = get(&app, "/api/v1/products/1/related").await;
    assert_eq!(ids(&related), vec![10, 11]);

    let (status, body) = get(&app, "/api/v1/products/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PRODUCT_NOT_FOUND");

    let (status, _) = get(&app, "/api/v1/products/999/related").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn featured_shelf_holds_eight() {
    let app = build_test_app().await;
    let (_, featured) = get(&app, "/api/v1/products/featured").await;
    assert_eq!(ids(&featured), (1..=8).collect::<Vec<_>>());
}

#[tokio::test]
async fn categories_brands_and_price_ranges() {
    let app = build_test_app().await;

    let (_, categories) = get(&app, "/api/v1/categories").await;
    assert_eq!(categories, serde_json::json!(["Dive", "Chronograph", "Luxury", "Dress"]));

    let (_, brands) = get(&app, "/api/v1/brands").await;
    assert_eq!(brands.as_array().unwrap().len(), 9);
    assert_eq!(brands[0], "Rolex");

    let (_, ranges) = get(&app, "/api/v1/price-ranges").await;
    let labels: Vec<&str> = ranges.as_array().unwrap().iter().map(|r| r["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["Under $1,000", "$1,000 - $5,000", "$5,000 - $10,000", "$10,000 - $20,000", "$20,000+"]);
    assert_eq!(ranges[1]["slug"], "1000-5000");
}
