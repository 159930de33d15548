//! Liveness of the two things a map upload depends on: the database and the
//! media directory.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is reachable, otherwise `degraded`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether uploaded map images can currently be stored.
    pub media_healthy: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = mapboard_db::health_check(&state.pool).await.is_ok();
    let media_healthy = match state.assets.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Media store health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy && media_healthy {
            "ok"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        media_healthy,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
