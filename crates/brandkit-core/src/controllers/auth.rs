use axum::{
    Router,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde::{Deserialize, Serialize};

use crate::auth::{self as session_auth, clear_session_cookie, session_cookie};
use crate::error::BrandkitError;
use crate::extractors::{AuthUser, Form};
use crate::models::business::Entity as Business;
use crate::models::product::Entity as Product;
use crate::models::user::{Entity as User, UserResponse};
use crate::response::ApiResponse;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user: UserResponse,
    pub businesses: u64,
    pub products: u64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/dashboard", get(dashboard))
}

async fn home() -> Redirect {
    Redirect::to("/dashboard")
}

/// Log in and receive the session cookie.
async fn login(
    State(state): State<AppState>,
    Form(payload): Form<LoginForm>,
) -> Result<impl IntoResponse, BrandkitError> {
    let security = &state.config.security;

    if security.enable_rate_limit {
        if let Err(retry_after) = state.rate_limiter.check(&payload.username) {
            tracing::warn!(username = %payload.username, "Login rate limited");
            return Err(BrandkitError::TooManyRequests(retry_after));
        }
    }

    let user = match session_auth::authenticate(&state.db, &payload.username, &payload.password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::info!(username = %payload.username, "Failed login");
            return Err(e);
        }
    };

    if security.enable_rate_limit {
        state.rate_limiter.reset(&payload.username);
    }

    let token =
        session_auth::create_session(&state.db, user.id, security.session_expiry_hours).await?;
    let cookie = session_cookie(&token, security.session_expiry_hours.saturating_mul(3600));

    tracing::info!(user_id = user.id, "User logged in");
    Ok((
        [(SET_COOKIE, cookie)],
        ApiResponse::success(UserResponse::from(user)),
    ))
}

/// Revoke the current session and clear the cookie.
async fn logout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    headers: HeaderMap,
) -> Result<impl IntoResponse, BrandkitError> {
    if let Some(token) = session_auth::session_token_from_headers(&headers) {
        session_auth::revoke_session(&state.db, &token).await?;
    }

    tracing::info!(user_id, "User logged out");
    Ok((
        [(SET_COOKIE, clear_session_cookie())],
        ApiResponse::success(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<ApiResponse<DashboardResponse>, BrandkitError> {
    let user = User::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| BrandkitError::Unauthorized("User no longer exists".to_string()))?;

    let businesses = Business::find().count(&state.db).await?;
    let products = Product::find().count(&state.db).await?;

    Ok(ApiResponse::success(DashboardResponse {
        user: user.into(),
        businesses,
        products,
    }))
}
