use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::GlobalState;

pub fn misc_routes() -> Router<GlobalState> {
    Router::new()
        .route("/version", get(version))
        .route("/health/liveness", get(|| async { Json(json!({ "status": "UP" })) }))
        .route("/health/readiness", get(readiness))
}

async fn version(State(state): State<GlobalState>) -> Json<Value> {
    Json(json!({ "version": state.settings.version }))
}

async fn readiness(State(state): State<GlobalState>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").execute(state.db.pool()).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "UP" }))),
        Err(e) => {
            tracing::warn!("[readiness] Database is not reachable: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "DOWN" })))
        }
    }
}
