use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use meal_planner::{
    config::Config,
    db::{create_pool, MemoryStore, PgStore, Store},
    create_router, AppState,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let store = PgStore::new(create_pool(url).await?);
            store.migrate().await?;
            tracing::info!("Using PostgreSQL store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, data is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, config.planner(), config.share_base_url.clone());

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let app = create_router(Arc::new(state)).layer(cors);

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app).await?;
    Ok(())
}
