use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tokatsu_core::store::ContentStore;

use crate::error::ApiResult;
use crate::state::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/ping", get(ping))
}

/// Full health check: the content store must answer.
async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state.store().ping().await?;

    Ok(Json(json!({
        "status": "ok",
        "store": "connected",
    })))
}

/// Lightweight ping, no store round trip.
async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
