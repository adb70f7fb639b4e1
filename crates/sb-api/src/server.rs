//! HTTP API Server
//!
//! Starts and manages the axum-based HTTP server.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use sb_core::{ApiConfig, ConversationHandler};

use crate::error::{ApiError, Result};
use crate::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<ConversationHandler>,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP API server and run until `shutdown` resolves
pub async fn start_server<F>(
    config: &ApiConfig,
    handler: Arc<ConversationHandler>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(AppState { handler });

    // ホスト名も解決してバインドする
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|e| ApiError::Bind(format!("{}:{} ({})", config.host, config.port, e)))?;
    info!("HTTP API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
