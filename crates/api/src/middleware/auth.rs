//! Bearer-token extractor for admin handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use tokatsu_core::auth::AdminUser;

use crate::error::ApiError;
use crate::state::AppState;

/// The administrator behind a request, from `Authorization: Bearer <token>`.
///
/// Add it to a handler's arguments to require a valid session; anything
/// else is rejected with 401 and the client sends the user to sign in.
#[derive(Debug, Clone)]
pub struct AdminSession(pub AdminUser);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Unauthorized("missing bearer token".into()))?;

        let user = state.sessions().verify(bearer.token())?;
        Ok(AdminSession(user))
    }
}
