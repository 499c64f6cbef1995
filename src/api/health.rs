use axum::{routing::get, Json, Router};

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /api/health - Liveness check, independent of mail configuration
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
