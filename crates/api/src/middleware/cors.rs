use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer. Admin calls authenticate with a Bearer header, not
/// cookies.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT_LANGUAGE])
}
