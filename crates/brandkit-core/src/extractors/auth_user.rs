use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth;
use crate::controllers::AppState;
use crate::error::BrandkitError;

/// Extractor that validates the session cookie and provides the logged-in
/// user's id. Handlers taking it are login-gated.
///
/// ```rust,ignore
/// async fn dashboard(AuthUser(user_id): AuthUser) -> impl IntoResponse {
///     // user_id is the authenticated user's ID
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub i32);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BrandkitError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = auth::session_token_from_headers(&parts.headers)
            .ok_or_else(|| BrandkitError::Unauthorized("Login required".to_string()))?;

        let user_id = auth::validate_session(&state.db, &token).await?;
        Ok(AuthUser(user_id))
    }
}
