use std::sync::Arc;

use sqlx::SqlitePool;

use crate::catalog::Catalog;
use crate::config::StoreConfig;
use crate::db;
use crate::domain::PricingPolicy;
use crate::publisher::EventPublisher;
use crate::session::SessionStore;
use crate::Result;

/// Shared state handed to every handler. Cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<SessionStore>,
    pub pricing: PricingPolicy,
    pub events: EventPublisher,
}

impl AppState {
    /// Connects and migrates the database, seeds an empty catalog, loads it into
    /// memory and connects the event publisher.
    pub async fn bootstrap(config: &StoreConfig) -> Result<Self> {
        let db = db::connect(&config.database_url, config.database_max_connections).await?;
        tracing::info!("database connection pool created");
        db::migrate(&db).await?;
        tracing::info!("database migrations applied");
        db::seed_sample_data(&db).await?;

        let catalog = Catalog::new(db::load_products(&db).await?);
        tracing::info!(products = catalog.len(), "catalog loaded");

        let events = EventPublisher::connect(config.nats_url.as_deref()).await;

        Ok(Self {
            db,
            catalog: Arc::new(catalog),
            sessions: Arc::new(SessionStore::new()),
            pricing: config.pricing,
            events,
        })
    }
}
