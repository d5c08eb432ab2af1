//! SQLite storage for the product catalog.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::catalog::seed::{sample_watches, SAMPLE_STOCK};
use crate::domain::{Money, Product, ProductId};
use crate::StoreError;

/// Separator used for the `features` column.
const FEATURE_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price_cents: i64,
    pub description: String,
    pub image_url: String,
    pub stock: i64,
    pub features: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let stock = u32::try_from(row.stock).map_err(|_| StoreError::InvalidStock { id: row.id, stock: row.stock })?;
        let features: Vec<String> = row
            .features
            .as_deref()
            .unwrap_or_default()
            .split(FEATURE_SEPARATOR)
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        let product = Product::create(ProductId::new(row.id), row.name, row.brand, row.category, Money::from_cents(row.price_cents))
            .map_err(|source| StoreError::InvalidProduct { id: row.id, source })?;
        Ok(product
            .with_description(row.description)
            .with_image_url(row.image_url)
            .with_stock(stock)
            .with_features(features))
    }
}

pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new().max_connections(max_connections).connect(url).await
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Writes the sample collection if the catalog is empty. Returns the number of rows inserted.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products").fetch_one(pool).await?;
    if count > 0 {
        tracing::debug!(existing = count, "catalog already populated, skipping seed");
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for watch in sample_watches() {
        inserted += sqlx::query(
            "INSERT INTO products (name, brand, category, price_cents, description, image_url, stock, features) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(watch.name)
        .bind(watch.brand)
        .bind(watch.category)
        .bind(watch.price_cents)
        .bind(watch.description)
        .bind(watch.image_url)
        .bind(i64::from(SAMPLE_STOCK))
        .bind(watch.features.join(FEATURE_SEPARATOR))
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }
    tx.commit().await?;
    tracing::info!(inserted, "seeded sample catalog");
    Ok(inserted)
}

pub async fn load_products(pool: &SqlitePool) -> Result<Vec<Product>, StoreError> {
    let rows = sqlx::query_as::<_, ProductRow>("SELECT * FROM products ORDER BY id").fetch_all(pool).await?;
    rows.into_iter().map(Product::try_from).collect()
}

pub async fn health_check(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ProductRow {
        ProductRow {
            id: 7,
            name: "Tank Solo".into(),
            brand: "Cartier".into(),
            category: "Dress".into(),
            price_cents: 274_000,
            description: "Rectangular".into(),
            image_url: "https://img.example/tank.jpg".into(),
            stock: 3,
            features: Some("Swiss made, Sapphire crystal, ".into()),
        }
    }

    #[test]
    fn test_row_converts_to_product() {
        let p = Product::try_from(row()).unwrap();
        assert_eq!(p.id(), ProductId::new(7));
        assert_eq!(p.price(), Money::from_dollars(2_740));
        assert_eq!(p.stock(), 3);
        assert_eq!(p.features(), ["Swiss made".to_string(), "Sapphire crystal".to_string()]);
    }

    #[test]
    fn test_row_without_features() {
        let p = Product::try_from(ProductRow { features: None, ..row() }).unwrap();
        assert!(p.features().is_empty());
    }

    #[test]
    fn test_negative_stock_is_rejected() {
        let err = Product::try_from(ProductRow { stock: -1, ..row() }).unwrap_err();
        assert!(matches!(err, StoreError::InvalidStock { id: 7, stock: -1 }));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        migrate(&pool).await.unwrap();
        let first = seed_sample_data(&pool).await.unwrap();
        assert_eq!(first as usize, sample_watches().len());
        assert_eq!(seed_sample_data(&pool).await.unwrap(), 0);

        let products = load_products(&pool).await.unwrap();
        assert_eq!(products.len(), sample_watches().len());
        assert!(products.iter().all(|p| p.stock() == SAMPLE_STOCK));
        assert!(health_check(&pool).await);
    }
}
