pub mod auth;
pub mod cors;
pub mod request_tracing;

use tower_http::limit::RequestBodyLimitLayer;

/// Largest accepted request body. Admin payloads are text and small JSON.
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}
