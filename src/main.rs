//! Luxury watch storefront server

use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use watch_store::api;
use watch_store::config::StoreConfig;
use watch_store::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watch_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StoreConfig::from_env()?;
    tracing::info!(
        address = %config.bind_address(),
        database = %config.database_url,
        free_shipping_threshold = %config.pricing.free_shipping_threshold(),
        tax_rate = %config.pricing.tax_rate(),
        "loaded store configuration"
    );

    let state = AppState::bootstrap(&config).await?;

    // Drop abandoned carts once a minute.
    let sessions = state.sessions.clone();
    let max_idle = config.cart_idle_timeout();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        loop {
            ticker.tick().await;
            sessions.evict_idle(max_idle).await;
        }
    });

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "watch store listening");
    axum::serve(listener, app).await?;
    Ok(())
}
