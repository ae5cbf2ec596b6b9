//! Catalog server binary
//!
//! Serves the library catalog workflows over HTTP. Runs against the
//! in-memory store by default; build with `--features database` and set
//! `DATABASE_URL` to run against Postgres.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use library_catalog::routes::{create_router, AppState};
use library_catalog::store::CatalogStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("library_catalog=info,catalog_server=info,tower_http=debug")
        .init();

    dotenvy::dotenv().ok();

    let store = build_store().await?;
    let app = create_router(AppState { store });

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    let addr = format!("0.0.0.0:{}", port);
    info!("Starting catalog server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "database")]
async fn build_store() -> Result<Arc<dyn CatalogStore>> {
    use library_catalog::store::PgCatalogStore;

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost:5432/library-catalog".to_string());
    info!("Connecting to database: {}", database_url);
    let pool = sqlx::PgPool::connect(&database_url).await?;
    Ok(Arc::new(PgCatalogStore::new(pool)))
}

#[cfg(not(feature = "database"))]
async fn build_store() -> Result<Arc<dyn CatalogStore>> {
    use library_catalog::store::MemoryStore;

    info!("Using in-memory store");
    Ok(Arc::new(MemoryStore::new()))
}
