//! HTTP server for the radar snapshot API.
//!
//! Endpoints:
//! - `GET /api/radar/latest` - current snapshot (live or generated)
//! - `GET /api/health` - liveness plus cache state

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::pipeline;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub cached: bool,
    #[serde(rename = "cacheAge")]
    pub cache_age: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

// ============================================================================
// Router
// ============================================================================

/// Create the API router with CORS and request tracing.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/api/radar/latest", get(latest_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

/// Build the CORS layer from the explicit origin allow-list. Origins
/// that fail to parse as header values are dropped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Dropping unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/radar/latest - current reflectivity snapshot.
async fn latest_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    match pipeline::latest_snapshot(&state).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to produce radar snapshot");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to produce radar snapshot".to_string(),
                    details: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/health - liveness and cache state.
async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let age = state.cache.age().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        cached: age.is_some(),
        cache_age: age.map(|d| d.as_secs()),
    })
}

// ============================================================================
// Server
// ============================================================================

/// Bind and serve until ctrl-c.
pub async fn run_server(state: Arc<AppState>) -> anyhow::Result<()> {
    let port = state.config.port;
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    info!(port = port, "Starting radar snapshot server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Received shutdown signal");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_shape() {
        let response = HealthResponse {
            status: "ok".to_string(),
            timestamp: "2024-01-15T12:00:00+00:00".to_string(),
            cached: true,
            cache_age: Some(42),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["cached"], true);
        assert_eq!(json["cacheAge"], 42);
    }

    #[test]
    fn test_health_response_null_cache_age() {
        let response = HealthResponse {
            status: "ok".to_string(),
            timestamp: "2024-01-15T12:00:00+00:00".to_string(),
            cached: false,
            cache_age: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["cacheAge"].is_null());
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Failed to produce radar snapshot".to_string(),
            details: "Internal error: cache poisoned".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"error\""));
        assert!(json.contains("\"details\""));
    }

    #[test]
    fn test_cors_layer_accepts_valid_origins() {
        // Exercises the parse/filter path; unparsable entries must not
        // panic the router construction.
        let origins = vec![
            "http://localhost:5173".to_string(),
            "not a header value\u{0}".to_string(),
        ];
        let _ = cors_layer(&origins);
    }
}
