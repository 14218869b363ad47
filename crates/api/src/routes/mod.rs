pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(public::routes())
        .merge(auth::routes())
        .merge(admin::routes());

    Router::new()
        .merge(health::routes())
        .nest("/api", api)
        .with_state(state)
}
