mod error;
mod routes;
mod storage;

use axum::{routing::get, Router};
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saleslens_server=info,tower_http=info".into()),
        )
        .init();

    // Data directory
    let data_dir = std::env::var("SALESLENS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));

    tracing::info!("data directory: {}", data_dir.display());

    // Initialize database
    let db = storage::init_db(&data_dir)?;
    tracing::info!("database initialized");

    // Seed demo data unless disabled
    let seed_enabled = std::env::var("SALESLENS_SEED")
        .map(|v| v != "0" && v.to_lowercase() != "false")
        .unwrap_or(true);
    if seed_enabled && storage::seed_if_empty(&db)? {
        tracing::info!("seeded demo data");
    }

    // Build API routes
    let api = Router::new()
        // Health
        .route("/health", get(routes::health::health))
        // Users
        .route("/users", get(routes::users::list_users))
        .route("/users/{id}", get(routes::users::get_user))
        .route("/users/{id}/revenue", get(routes::revenue::user_revenue))
        // Groups
        .route("/groups", get(routes::groups::list_groups))
        .route("/groups/{id}", get(routes::groups::get_group))
        .route("/groups/{id}/revenue", get(routes::revenue::group_revenue))
        // Sales (raw passthrough)
        .route("/sales", get(routes::sales::list_sales));

    let app = Router::new()
        .nest("/api", api)
        // Docs
        .route("/docs", get(routes::docs::handle))
        .route("/llms.txt", get(routes::docs::llms_txt))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(db);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("listening on port {port}");
    axum::serve(listener, app).await?;

    Ok(())
}
