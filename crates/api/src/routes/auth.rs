use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokatsu_core::auth::{AdminUser, Session};

use crate::error::ApiResult;
use crate::middleware::auth::AdminSession;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// POST /api/auth/login
///
/// Exchange admin credentials for a session token.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<Session>> {
    let user = state.authenticator().sign_in(&body.email, &body.password)?;
    let session = state.sessions().issue(&user)?;
    Ok(Json(session))
}

/// GET /api/auth/me
async fn me(AdminSession(user): AdminSession) -> Json<AdminUser> {
    Json(user)
}
