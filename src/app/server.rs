//! HTTP surface: `GET /search?model=...` and `GET /health`.

use crate::core::aggregator::Aggregator;
use crate::core::Query;
use crate::utils::error::Result;
use axum::{
    extract::{Query as QueryParams, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    model: Option<String>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(search_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Provider failures never reach the caller; only a broken aggregation does.
async fn search_handler(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Response {
    let Some(query) = params.model.and_then(|model| Query::new(model).ok()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Phone model required" })),
        )
            .into_response();
    };

    match state.aggregator.aggregate(&query).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            tracing::error!("Search for \"{}\" failed: {}", query, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Scraping failed", "details": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "providers": state.aggregator.provider_ids(),
    }))
}

pub async fn serve(aggregator: Aggregator, addr: SocketAddr) -> Result<()> {
    let app = create_router(AppState {
        aggregator: Arc::new(aggregator),
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
