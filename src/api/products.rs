use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::catalog::{PriceRange, ProductFilter};
use crate::domain::{Product, ProductId};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    /// Bucket slug such as `1000-5000`.
    pub price_range: Option<String>,
}

impl ProductQuery {
    fn into_filter(self) -> ApiResult<ProductFilter> {
        let price_range = self.price_range.as_deref().map(str::parse::<PriceRange>).transpose()?;
        Ok(ProductFilter { category: self.category, brand: self.brand, price_range })
    }
}

#[derive(Debug, Serialize)]
pub struct ProductList {
    pub data: Vec<Product>,
    pub total: usize,
}

impl<'a> FromIterator<&'a Product> for ProductList {
    fn from_iter<I: IntoIterator<Item = &'a Product>>(iter: I) -> Self {
        let data: Vec<Product> = iter.into_iter().cloned().collect();
        Self { total: data.len(), data }
    }
}

pub async fn list_products(State(s): State<AppState>, Query(q): Query<ProductQuery>) -> ApiResult<Json<ProductList>> {
    let filter = q.into_filter()?;
    Ok(Json(s.catalog.filter(&filter).into_iter().collect()))
}

pub async fn featured_products(State(s): State<AppState>) -> Json<ProductList> {
    Json(s.catalog.featured().iter().collect())
}

pub async fn get_product(State(s): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Product>> {
    let id = ProductId::new(id);
    s.catalog.get(id).cloned().map(Json).ok_or(ApiError::ProductNotFound(id))
}

pub async fn related_products(State(s): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<ProductList>> {
    let id = ProductId::new(id);
    if s.catalog.get(id).is_none() {
        return Err(ApiError::ProductNotFound(id));
    }
    Ok(Json(s.catalog.related(id).into_iter().collect()))
}

pub async fn list_categories(State(s): State<AppState>) -> Json<Vec<String>> {
    Json(s.catalog.categories().into_iter().map(str::to_string).collect())
}

pub async fn list_brands(State(s): State<AppState>) -> Json<Vec<String>> {
    Json(s.catalog.brands().into_iter().map(str::to_string).collect())
}

pub async fn list_price_ranges() -> Json<[PriceRange; 5]> {
    Json(PriceRange::storefront_buckets())
}
