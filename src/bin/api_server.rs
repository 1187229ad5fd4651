// src/bin/api_server.rs

use game_library_api::infra::logging;
use game_library_api::transport;
use game_library_api::{AppConfig, LibraryService, Stores};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // --- Logger ---
    // Scoped to this thread only; the library service gets its own handle.
    let logger = logging::build_dispatch(&config.log_filter)?;
    let _logger_guard = tracing::dispatcher::set_default(&logger);

    // --- Storage ---
    tracing::info!(backend = ?config.storage, "opening storage");
    let stores = Stores::open(&config).await?;

    // --- Service ---
    let library = Arc::new(LibraryService::new(
        stores.developers,
        stores.games,
        logger.clone(),
    ));
    let app_state = transport::http::AppState {
        library,
        request_timeout: config.request_timeout,
    };

    // --- API Server ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "API server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received, draining in-flight requests");
}
